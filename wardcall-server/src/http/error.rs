use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wardcall_core::SignalError;

/// Maps store failures onto the HTTP surface: missing rooms are 404,
/// fail-closed offer/answer slots are 409.
#[derive(Debug)]
pub struct ApiError(pub SignalError);

impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SignalError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            SignalError::OfferAlreadySet(_) | SignalError::AnswerAlreadySet(_) => {
                StatusCode::CONFLICT
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
