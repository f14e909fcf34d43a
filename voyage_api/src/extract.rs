use aide::OperationIo;
use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections are reported as an [`ApiError`] body.
#[derive(FromRequest, OperationIo)]
#[from_request(via(axum::Json), rejection(ApiError))]
#[aide(input_with = "axum::Json<T>", json_schema)]
pub struct JsonBody<T>(pub T);
