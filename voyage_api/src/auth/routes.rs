use std::sync::Arc;

use aide::axum::ApiRouter;
use axum::routing::post;

use crate::{
    auth::{login::login_handler, register::register_handler},
    state::AppState,
};

pub fn auth_routes() -> ApiRouter<Arc<AppState>> {
    ApiRouter::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}
