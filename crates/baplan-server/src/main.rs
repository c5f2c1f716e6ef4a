use tracing::info;
use tracing_subscriber::EnvFilter;

use baplan_server::config::ServerConfig;
use baplan_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, model = %state.generator.model_id(), "survey service listening");

    axum::serve(listener, baplan_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("survey service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
