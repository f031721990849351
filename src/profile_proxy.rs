use mini_linkedin::app_system::{setup_tracing, shutdown_signal, SystemError};
use mini_linkedin::config::Config;
use mini_linkedin::proxy::{self, ProxyState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    info!("Starting profile proxy");
    let config = Config::from_env()?;

    let state = ProxyState::new(&config.api_base_url)?;
    info!(upstream = %state.base_url, "Forwarding user requests");
    let app = proxy::router(state);

    let address = format!("0.0.0.0:{}", config.proxy_port);
    let listener = TcpListener::bind(&address).await?;
    info!("Proxy running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proxy shut down");
    Ok(())
}
