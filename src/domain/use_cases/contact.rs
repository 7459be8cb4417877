use std::{sync::Arc, time::Duration};

use crate::{
    entities::contact::{ContactForm, ContactResponse, ContactSubmission},
    errors::AppError,
    limiter::rate_limiter::FixedWindowLimiter,
    mailer::{DispatchOutcome, Mailer},
    validation,
};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

/// Orchestrates one contact submission end to end: validate, admit, dispatch
/// under a deadline, map the outcome.
pub struct ContactHandler {
    mailer: Arc<dyn Mailer>,
    limiter: FixedWindowLimiter,
    dispatch_timeout: Duration,
}

impl ContactHandler {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        limiter: FixedWindowLimiter,
        dispatch_timeout: Duration,
    ) -> Self {
        ContactHandler {
            mailer,
            limiter,
            dispatch_timeout,
        }
    }

    pub async fn submit(
        &self,
        form: ContactForm,
        client_id: &str,
    ) -> Result<ContactResponse, AppError> {
        let submission = validate(form)?;

        let decision = self.limiter.check(client_id);
        if !decision.allowed {
            tracing::warn!(client = %client_id, "submission rejected by rate limiter");
            return Err(AppError::RateLimited {
                retry_after_secs: decision.retry_after_secs.unwrap_or(1),
            });
        }

        let mailer = Arc::clone(&self.mailer);
        let mut dispatch = tokio::spawn(async move { mailer.send_notification(submission).await });

        let outcome = tokio::select! {
            joined = &mut dispatch => {
                joined.map_err(|e| AppError::Internal(format!("dispatch task failed: {e}")))?
            }
            _ = tokio::time::sleep(self.dispatch_timeout) => {
                // Stop waiting without cancelling: the spawned send keeps
                // running, so the relay may still deliver after the caller
                // has been told the request timed out.
                tracing::warn!(client = %client_id, "dispatch exceeded its time budget");
                return Err(AppError::DispatchTimeout);
            }
        };

        match outcome {
            DispatchOutcome::Sent => Ok(ContactResponse {
                message: SUCCESS_MESSAGE.to_string(),
            }),
            DispatchOutcome::ConfigurationMissing | DispatchOutcome::AuthFailure => {
                Err(AppError::MailerConfiguration)
            }
            DispatchOutcome::TransportFailure => Err(AppError::DispatchFailed),
        }
    }
}

/// First failing rule wins; the order is fixed so clients see deterministic
/// messages: name required, email required, email shape, phone, details.
fn validate(form: ContactForm) -> Result<ContactSubmission, AppError> {
    if !validation::is_non_empty(&form.name) {
        return Err(AppError::Validation {
            field: "name",
            message: validation::MSG_NAME_REQUIRED,
        });
    }
    if !validation::is_non_empty(&form.email) {
        return Err(AppError::Validation {
            field: "email",
            message: validation::MSG_EMAIL_REQUIRED,
        });
    }
    if !validation::is_valid_email(&form.email) {
        return Err(AppError::Validation {
            field: "email",
            message: validation::MSG_EMAIL_INVALID,
        });
    }
    if !validation::is_valid_phone(form.phone.as_deref().unwrap_or("")) {
        return Err(AppError::Validation {
            field: "phone",
            message: validation::MSG_PHONE_INVALID,
        });
    }
    if !validation::is_valid_project_details(form.project_details.as_deref().unwrap_or("")) {
        return Err(AppError::Validation {
            field: "projectDetails",
            message: validation::MSG_PROJECT_DETAILS_TOO_LONG,
        });
    }

    Ok(ContactSubmission {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: trimmed_optional(form.phone),
        project_details: trimmed_optional(form.project_details),
    })
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
