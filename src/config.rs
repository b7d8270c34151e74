use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Timeout for JSON endpoints (mob list and mob detail).
pub const JSON_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for binary frame fetches.
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(60);

/// Total attempts for a JSON fetch before giving up.
pub const JSON_RETRY_ATTEMPTS: u32 = 3;

/// Fixed delay between JSON fetch attempts.
pub const JSON_RETRY_DELAY: Duration = Duration::from_millis(400);

/// Pacing sleep between frame requests.
pub const FRAME_SLEEP: Duration = Duration::from_millis(20);

/// Emit a progress line whenever a mob id is a multiple of this.
pub const PROGRESS_EVERY: u32 = 100;

/// Fixed configuration for one fetch run, built once at startup and
/// threaded through the components.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Root of the content API, without trailing slash.
    pub api_host: String,
    /// Game region, e.g. "GMS".
    pub region: String,
    /// Game data version, e.g. "83".
    pub version: String,
    /// Root directory frames are written under.
    pub out_dir: PathBuf,
    /// Optional pre-fetched mob stats file with embedded framebooks.
    pub stats_path: PathBuf,
}

impl FetchConfig {
    /// Base URL all endpoints hang off: `{api_host}/{region}/{version}`.
    pub fn base_url(&self) -> String {
        format!("{}/{}/{}", self.api_host, self.region, self.version)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_host: "https://maplestory.io/api".to_string(),
            region: "GMS".to_string(),
            version: "83".to_string(),
            out_dir: PathBuf::from("game/assets/mobs"),
            stats_path: PathBuf::from("stats/mobs_stats.json"),
        }
    }
}
