pub mod debug;
pub mod error;
pub mod health;
pub mod predict;

use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, state::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(health::home))
        .route("/predict_solar", post(predict::predict_solar))
        .route("/predict_electricity", post(predict::predict_electricity))
        .route("/debug_models", get(debug::debug_models))
        .with_state(state);

    if cfg.server.enable_cors {
        use tower_http::cors::Any;
        // browser dashboards call this API directly, from any origin
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}
