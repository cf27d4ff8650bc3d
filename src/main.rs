use fitness_tracker::{router, AppState, Config, HttpGateway, StaticToken};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if config.api_token.is_none() {
        warn!("FITNESS_API_TOKEN is not set; every API call will be rejected as unauthenticated");
    }

    let tokens = Arc::new(StaticToken::new(config.api_token.clone()));
    let gateway = Arc::new(HttpGateway::new(config.api_url.clone(), tokens)?);
    let app = router(AppState::new(gateway));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("using fitness API at {}", config.api_url);
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
