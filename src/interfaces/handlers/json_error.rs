use std::fmt;

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

pub const MSG_INVALID_BODY: &str = "Invalid request body";

/// Malformed or undeserializable request bodies get one generic 400. The
/// parser's own message can name internal types, so it goes to the logs only.
#[derive(Debug)]
pub struct JsonError {
    detail: String,
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        tracing::debug!(detail = %self.detail, "rejecting malformed request body");
        HttpResponse::build(self.status_code()).json(json!({ "error": MSG_INVALID_BODY }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        JsonError {
            detail: err.to_string(),
        }
    }
}
