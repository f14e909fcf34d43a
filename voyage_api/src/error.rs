use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::error;
use voyage_accounts::AccountError;
use voyage_narrative::GenerationFailure;
use voyage_sequencer::SequencerError;

#[derive(Serialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    BadGateway(String),
    InternalServerError(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::MissingCredentials | AccountError::EmailAlreadyRegistered => {
                ApiError::BadRequest(error.to_string())
            }
            AccountError::UserNotFound | AccountError::InvalidPassword => {
                ApiError::Unauthorized(error.to_string())
            }
            error => {
                error!("Account operation failed: {}", error);
                ApiError::InternalServerError(String::from("Internal server error"))
            }
        }
    }
}

impl From<GenerationFailure> for ApiError {
    fn from(error: GenerationFailure) -> Self {
        error!("Itinerary generation failed: {}", error);
        ApiError::BadGateway(String::from("Itinerary generation failed"))
    }
}

impl From<SequencerError> for ApiError {
    fn from(error: SequencerError) -> Self {
        ApiError::BadRequest(format!("Invalid stops: {error}"))
    }
}

impl aide::OperationOutput for ApiError {
    type Inner = ErrorResponse;
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::BadGateway(message)
            | ApiError::InternalServerError(message) => message,
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
