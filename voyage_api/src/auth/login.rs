use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{Level, info, instrument};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

use super::{AuthRequest, MessageResponse};

#[instrument(skip_all, level = Level::INFO)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AuthRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let credentials = body.into_credentials()?;

    if let Err(error) = state.accounts.login(credentials).await {
        info!("Login rejected: {}", error);
        return Err(error.into());
    }

    Ok(Json(MessageResponse {
        message: "Login successful",
    }))
}
