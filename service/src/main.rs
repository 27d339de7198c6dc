use std::env;

use abi::Config;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let filename =
        env::var("RIDESHARE_CONFIG").unwrap_or_else(|_| "fixtures/config.yml".to_string());
    let config = Config::load(&filename)?.with_env()?;

    rideshare_service::start_server(&config).await
}
