mod config;
mod host;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    match host::run(&config).await {
        Ok(summary) => {
            let json = serde_json::to_string(&summary).unwrap_or_default();
            tracing::info!(summary = %json, "viewfinder detached");
        }
        Err(e) => {
            tracing::error!(error = %e, "viewfinder run failed");
            std::process::exit(1);
        }
    }
}
