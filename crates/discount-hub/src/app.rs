use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, hub_handler};
use crate::state::AppState;

pub const HUB_PATH: &str = "/discountHub";
pub const HEALTH_PATH: &str = "/health";

pub struct App {}

impl App {
    /// Builds the hub router.
    ///
    /// Browser clients are only admitted from `allowed_origins`, both for
    /// plain HTTP (CORS) and for the hub handshake. Credentials are allowed,
    /// so wildcard origins must be filtered out by the caller.
    pub fn router(state: AppState, allowed_origins: &[HeaderValue]) -> Router {
        let state = state.with_allowed_origins(allowed_origins);
        Router::new()
            .route(HEALTH_PATH, get(health_handler))
            .route(HUB_PATH, get(hub_handler))
            .layer(Self::cors(allowed_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn cors(allowed_origins: &[HeaderValue]) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}
