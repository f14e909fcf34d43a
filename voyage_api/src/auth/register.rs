use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{Level, instrument};

use crate::{error::ApiError, extract::JsonBody, state::AppState};

use super::{AuthRequest, MessageResponse};

pub struct RegisterResponse;

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "User registered successfully",
            }),
        )
            .into_response()
    }
}

#[instrument(skip_all, level = Level::INFO)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<AuthRequest>,
) -> Result<RegisterResponse, ApiError> {
    let credentials = body.into_credentials()?;

    state.accounts.register(credentials).await?;

    Ok(RegisterResponse)
}
