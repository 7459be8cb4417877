use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use serde_json::json;

pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const MSG_DISPATCH_FAILED: &str = "Failed to send email. Please try again.";
pub const MSG_MAILER_CONFIGURATION: &str =
    "Email service configuration error. Please contact support.";
pub const MSG_TIMEOUT: &str = "Request timeout. Please try again.";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Every expected failure of the contact pipeline, mapped onto an HTTP
/// response by the `ResponseError` impl. Response bodies stay short and
/// actionable; internal detail only ever reaches the logs.
#[derive(Debug, Display)]
pub enum AppError {
    #[display("Validation failed on {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[display("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[display("Email dispatch failed")]
    DispatchFailed,

    #[display("Mail relay configuration error")]
    MailerConfiguration,

    #[display("Email dispatch timed out")]
    DispatchTimeout,

    #[display("Internal error: {_0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation { message, .. } => json!({ "error": message }),
            AppError::RateLimited { retry_after_secs } => {
                json!({ "error": MSG_RATE_LIMITED, "retryAfter": retry_after_secs })
            }
            AppError::DispatchFailed => json!({ "error": MSG_DISPATCH_FAILED }),
            AppError::MailerConfiguration => json!({ "error": MSG_MAILER_CONFIGURATION }),
            AppError::DispatchTimeout => json!({ "error": MSG_TIMEOUT }),
            AppError::Internal(detail) => {
                tracing::error!(%detail, "unexpected internal error");
                json!({ "error": MSG_INTERNAL })
            }
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::DispatchFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MailerConfiguration => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DispatchTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
