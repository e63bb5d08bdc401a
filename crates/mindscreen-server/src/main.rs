use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mindscreen_instruments::instruments::bdi2::Bdi2;
use mindscreen_server::config;
use mindscreen_server::state::{AppState, spawn_idle_sweep};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = config::load_or_init(&config::config_dir()?)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let speech = mindscreen_speech::detect_backend(config.narration.backend);
    let state = AppState::new(
        Arc::new(Bdi2),
        speech,
        config.default_mode,
        config.narration_by_default(),
    );
    spawn_idle_sweep(state.clone(), config.session_idle());

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "mindscreen listening");

    axum::serve(listener, mindscreen_server::router(state)).await?;
    Ok(())
}
