//! HTTP surface of the trip planner: account registration/login and
//! itinerary generation.

pub mod auth;
pub mod config;
mod docs;
pub mod error;
pub mod extract;
mod health;
pub mod itinerary;
pub mod state;

use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::axum::routing::{get, post};
use aide::openapi::OpenApi;
use aide::transform::TransformOpenApi;
use axum::http::Method;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::routes::auth_routes;
use crate::docs::docs_routes;
use crate::health::health_handler;
use crate::itinerary::post_handler::post_handler;
use crate::state::AppState;

pub fn router() -> ApiRouter<Arc<AppState>> {
    aide::generate::infer_responses(true);

    let router = ApiRouter::new()
        .nest_api_service("/docs", docs_routes())
        .api_route("/health", get(health_handler))
        .api_route("/generate-itinerary", post(post_handler))
        .nest("/auth", auth_routes());

    aide::generate::infer_responses(false);

    router
}

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Voyage Open API")
}

/// The browser client is served from another origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any)
}

pub fn app(state: Arc<AppState>) -> Router {
    let mut api = OpenApi::default();

    router()
        .finish_api_with(&mut api, api_docs)
        .layer(ServiceBuilder::new().layer(cors_layer()))
        .layer(Extension(Arc::new(api)))
        .with_state(state)
}
