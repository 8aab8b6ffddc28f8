use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vet_clinic_backend::{run_server, CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_args(CliArgs::parse())?;
    config.validate()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting vet clinic backend v{}", env!("CARGO_PKG_VERSION"));
    run_server(config).await
}
