use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mobframes::config::FetchConfig;
use mobframes::fetcher::FrameFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = FetchConfig::default();
    info!(
        "fetching mob frames from {} into {}",
        config.base_url(),
        config.out_dir.display()
    );

    let summary = FrameFetcher::new(config).run().await?;
    info!(
        "downloaded={} failed={} across {} mobs",
        summary.downloaded, summary.failed, summary.mobs
    );
    Ok(())
}
