// Remote content API client: URL builders, the retrying JSON fetch, and the
// single-shot frame GET.

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{FRAME_TIMEOUT, JSON_RETRY_ATTEMPTS, JSON_RETRY_DELAY, JSON_TIMEOUT};

pub struct ApiClient {
    client: Client,
    base: String,
}

/// Body and declared content type of one fetched frame image.
pub struct FrameBody {
    pub bytes: Bytes,
    pub content_type: String,
}

impl ApiClient {
    pub fn new(base: String) -> Self {
        Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn mob_list_url(&self) -> String {
        format!("{}/mob", self.base)
    }

    pub fn mob_detail_url(&self, mob_id: u32) -> String {
        format!("{}/mob/{}", self.base, mob_id)
    }

    pub fn render_url(&self, mob_id: u32, anim: &str, frame: u32) -> String {
        format!("{}/mob/{}/render/{}/{}", self.base, mob_id, anim, frame)
    }

    /// GET a JSON document. Every failure (connect error, non-2xx status,
    /// decode error) is retried identically, up to `JSON_RETRY_ATTEMPTS`
    /// total attempts with a fixed delay in between. Exhaustion returns an
    /// error carrying the URL and the last underlying failure.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let mut attempt = 1;
        loop {
            match self.try_get_json(url).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "json fetch failed (attempt {}/{}) url={}: {}",
                        attempt, JSON_RETRY_ATTEMPTS, url, e
                    );
                    if attempt >= JSON_RETRY_ATTEMPTS {
                        return Err(e).with_context(|| {
                            format!("GET JSON failed after {} attempts: {}", attempt, url)
                        });
                    }
                    tokio::time::sleep(JSON_RETRY_DELAY).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn try_get_json(&self, url: &str) -> Result<Value> {
        let resp = self.client.get(url).timeout(JSON_TIMEOUT).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP {}", status.as_u16()));
        }
        let value = resp.json::<Value>().await?;
        Ok(value)
    }

    /// GET one frame image. No retry at this layer; a non-success status is
    /// an error the caller tallies without aborting the run.
    pub async fn get_frame(&self, url: &str) -> Result<FrameBody> {
        let resp = self.client.get(url).timeout(FRAME_TIMEOUT).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("frame fetch failed status={} url={}", status.as_u16(), url);
            return Err(anyhow!("frame fetch failed: HTTP {}", status.as_u16()));
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = resp.bytes().await?;
        debug!("frame fetched ({} bytes) url={}", bytes.len(), url);
        Ok(FrameBody {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_builders() {
        let api = ApiClient::new("https://maplestory.io/api/GMS/83/".to_string());
        assert_eq!(api.mob_list_url(), "https://maplestory.io/api/GMS/83/mob");
        assert_eq!(
            api.mob_detail_url(100100),
            "https://maplestory.io/api/GMS/83/mob/100100"
        );
        assert_eq!(
            api.render_url(100100, "walk1", 3),
            "https://maplestory.io/api/GMS/83/mob/100100/render/walk1/3"
        );
    }
}
