use dp_core::DoppelConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = DoppelConfig::default();
    if let Ok(host) = std::env::var("DOPPEL_HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("DOPPEL_PORT") {
        config.server.port = port.parse()?;
    }

    dp_server::serve(config).await
}
