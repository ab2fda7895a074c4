use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use events_api::{AppState, Config, build_app};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config)?;
    info!(
        store = %state.store.path().display(),
        "Serving events catalogue"
    );

    let app = build_app(&state).await?;

    info!("Starting Events API with production-ready shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: no connections to drain");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
