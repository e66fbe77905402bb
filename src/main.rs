use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use carllm_session::adapters::http::app_router;
use carllm_session::application::{AppShell, SessionFacade};
use carllm_session::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    match config.server.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }

    config.validate()?;

    let facade = SessionFacade::from_config(&config.auth)?;
    let shell = Arc::new(AppShell::new(facade));
    let app = app_router(shell, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
