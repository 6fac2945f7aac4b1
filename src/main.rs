use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use boxcat::{CatboxClient, Config, UploadEvent, UploadManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load(Path::new(&config_path))?;
    let request = config.to_request()?;

    let client = Arc::new(CatboxClient::new()?);
    let mut manager = UploadManager::new(client);
    if let Some(secs) = config.timeout_secs {
        manager = manager.with_timeout(Duration::from_secs(secs));
    }

    let mut upload = manager.start(request)?;
    while let Some(event) = upload.next_event().await {
        match event {
            UploadEvent::Progress { percent } => info!("uploaded {percent}%"),
            UploadEvent::Completed { link } => info!(%link, "upload finished"),
            UploadEvent::Failed { error } => error!(%error, "upload failed"),
        }
    }

    let link = upload.wait().await?;
    println!("{link}");

    Ok(())
}
