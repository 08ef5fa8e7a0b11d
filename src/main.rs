use anyhow::Result;
use axum::Router;
use energy_prediction_service::{api, config, state, telemetry};
use config::Config;
use state::AppState;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let app_state = AppState::new(&cfg);

    let loaded = app_state.registry.loaded_count();
    if loaded == 0 {
        warn!(
            "no model artifacts could be loaded - every prediction route will answer 503 \
            until the files in [models] exist and the server is restarted"
        );
    } else {
        info!(loaded, total = 3, "model artifacts ready");
    }

    let app: Router = api::router(app_state, &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!(
            "WARNING: Server binding to 0.0.0.0 - service will be accessible from network! \
            For production, bind to 127.0.0.1 unless behind a firewall/reverse proxy."
        );
    }

    info!(%addr, "starting energy prediction service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
