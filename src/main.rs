use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sign_translate::{routes, AppState, Config, ConnectionStatus};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sign_translate=debug,tower_http=debug")),
        )
        .init();

    // CONFIG_PATH wins; otherwise an optional conf.yaml next to the working directory
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "conf.yaml".to_string());
    let config = Config::load(Some(&config_path))?;
    info!(
        "Loaded configuration from {} (translation service: {})",
        config_path, config.api.base_url
    );

    let app_state = AppState::new(config.clone())?;

    let probe_state = app_state.clone();
    tokio::spawn(async move {
        let connected = probe_state.probe.check_health().await;
        let status = ConnectionStatus::from_probe(connected);
        probe_state.set_connection_status(status).await;
        info!("Initial connection test: {:?}", status);
    });

    let app = routes::app(app_state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
