// Run orchestration. Drives the pipeline once: list fetch, per-mob
// framebook resolution, frame writes, tallying.

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::catalog::normalize_mob_list;
use crate::config::{FetchConfig, FRAME_SLEEP, PROGRESS_EVERY};
use crate::stats::{framebook_from_value, load_stats_cache, Framebook};
use crate::writer::write_frame;

/// Aggregate counts for one run. A skipped-already-on-disk frame counts as
/// downloaded; only a failed render request counts as failed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub mobs: usize,
    pub downloaded: u64,
    pub failed: u64,
}

pub struct FrameFetcher {
    config: FetchConfig,
    api: ApiClient,
    stats_cache: HashMap<u32, Framebook>,
}

impl FrameFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let api = ApiClient::new(config.base_url());
        Self {
            config,
            api,
            stats_cache: HashMap::new(),
        }
    }

    /// Execute the pipeline once. Failure to obtain or recognize the mob
    /// list aborts the run; per-frame failures are tallied and the run
    /// continues best-effort.
    pub async fn run(mut self) -> Result<RunSummary> {
        fs::create_dir_all(&self.config.out_dir)
            .with_context(|| format!("create output root {}", self.config.out_dir.display()))?;
        self.stats_cache = load_stats_cache(&self.config.stats_path)?;

        let raw = self
            .api
            .get_json(&self.api.mob_list_url())
            .await
            .context("mob list fetch failed")?;
        let mob_ids = normalize_mob_list(&raw)?;
        info!("mobs: {}", mob_ids.len());

        let mut summary = RunSummary {
            mobs: mob_ids.len(),
            ..RunSummary::default()
        };

        for &mid in &mob_ids {
            let framebooks = self.resolve_framebook(mid).await?;
            if framebooks.is_empty() {
                debug!("mob {} has no framebooks, skipping", mid);
                continue;
            }

            for (anim, count) in &framebooks {
                let anim_dir = self.config.out_dir.join(mid.to_string()).join(anim);
                for frame in 0..*count {
                    let url = self.api.render_url(mid, anim, frame);
                    match write_frame(&self.api, &url, &anim_dir, frame).await {
                        Ok(_) => summary.downloaded += 1,
                        Err(e) => {
                            debug!("frame {}/{}/{} failed: {}", mid, anim, frame, e);
                            summary.failed += 1;
                        }
                    }
                    tokio::time::sleep(FRAME_SLEEP).await;
                }
            }

            if mid % PROGRESS_EVERY == 0 {
                info!(
                    "progress mid={} downloaded={} failed={}",
                    mid, summary.downloaded, summary.failed
                );
            }
        }

        info!(
            "done: downloaded={} failed={} out={}",
            summary.downloaded,
            summary.failed,
            self.config.out_dir.display()
        );
        Ok(summary)
    }

    /// Framebook for one mob: a non-empty stats-cache entry wins (no
    /// network), otherwise the detail endpoint's `framebooks` field,
    /// defaulting to empty when absent.
    async fn resolve_framebook(&self, mid: u32) -> Result<Framebook> {
        if let Some(book) = self.stats_cache.get(&mid) {
            if !book.is_empty() {
                return Ok(book.clone());
            }
        }

        let detail = self.api.get_json(&self.api.mob_detail_url(mid)).await?;
        Ok(framebook_from_value(detail.get("framebooks")))
    }
}
