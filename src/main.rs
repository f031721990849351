use mini_linkedin::app_system::{setup_tracing, shutdown_signal, ProfileSystem, SystemError};
use mini_linkedin::config::Config;
use mini_linkedin::http::{self, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    info!("Starting user profile service");
    let config = Config::from_env()?;

    let system = ProfileSystem::start(&config).await?;
    let state = AppState::new(system.user_client.clone(), config.environment.clone());
    let app = http::router(state, &config.cors_origins);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!(environment = %config.environment, "Server running on {address}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    system.shutdown().await?;
    served?;

    info!("Application completed successfully");
    Ok(())
}
