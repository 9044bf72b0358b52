use go_cloud::{Config, DrainOutcome, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    tracing::info!(
        "Configuration: port={} ready={} shutdown_grace={:?}",
        config.port,
        config.ready,
        config.shutdown_grace
    );

    match go_cloud::run(config).await? {
        DrainOutcome::Graceful => tracing::info!("All connections drained"),
        DrainOutcome::Forced { abandoned } => {
            tracing::warn!("Exited with {} connection(s) force-closed", abandoned)
        }
    }

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; "info" otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
