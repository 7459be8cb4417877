//! Contact-form controller for site frontends.
//!
//! Mirrors the server's validation rules through the shared
//! [`crate::validation`] module so visitors get instant feedback, while the
//! server still re-validates every submission it receives.

use std::collections::HashMap;

use serde::Deserialize;

use crate::validation;

pub const MSG_SUBMIT_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    ProjectDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_details: String,
}

/// One of editing / submitting / submitted / error, flattened into flags the
/// way a view layer consumes them.
#[derive(Debug, Default)]
pub struct FormState {
    pub fields: FormFields,
    pub errors: HashMap<Field, &'static str>,
    pub is_submitting: bool,
    pub is_submitted: bool,
    pub submit_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    error: Option<String>,
}

pub struct ContactFormController {
    endpoint: String,
    http: reqwest::Client,
    state: FormState,
}

impl ContactFormController {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ContactFormController {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Editing a field clears that field's error immediately; nothing is
    /// re-validated until the next submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.state.fields.name = value,
            Field::Email => self.state.fields.email = value,
            Field::Phone => self.state.fields.phone = value,
            Field::ProjectDetails => self.state.fields.project_details = value,
        }
        self.state.errors.remove(&field);
    }

    /// Same rules as the server, but every failing field is collected so the
    /// form can show all inline errors at once.
    fn validate_locally(&mut self) -> bool {
        let fields = &self.state.fields;
        let mut errors = HashMap::new();

        if !validation::is_non_empty(&fields.name) {
            errors.insert(Field::Name, validation::MSG_NAME_REQUIRED);
        }
        if !validation::is_non_empty(&fields.email) {
            errors.insert(Field::Email, validation::MSG_EMAIL_REQUIRED);
        } else if !validation::is_valid_email(&fields.email) {
            errors.insert(Field::Email, validation::MSG_EMAIL_INVALID);
        }
        if !validation::is_valid_phone(&fields.phone) {
            errors.insert(Field::Phone, validation::MSG_PHONE_INVALID);
        }
        if !validation::is_valid_project_details(&fields.project_details) {
            errors.insert(Field::ProjectDetails, validation::MSG_PROJECT_DETAILS_TOO_LONG);
        }

        let valid = errors.is_empty();
        self.state.errors = errors;
        valid
    }

    /// Validate locally, then POST the submission. Client-invalid input never
    /// produces a request; a second submit while one is in flight is ignored.
    pub async fn submit(&mut self) {
        if self.state.is_submitting {
            return;
        }

        self.state.submit_error = None;
        if !self.validate_locally() {
            return;
        }

        self.state.is_submitting = true;

        let fields = &self.state.fields;
        let mut payload = serde_json::json!({
            "name": fields.name,
            "email": fields.email,
        });
        if validation::is_non_empty(&fields.phone) {
            payload["phone"] = serde_json::json!(fields.phone);
        }
        if validation::is_non_empty(&fields.project_details) {
            payload["projectDetails"] = serde_json::json!(fields.project_details);
        }

        match self.http.post(&self.endpoint).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                self.state.fields = FormFields::default();
                self.state.is_submitted = true;
            }
            Ok(response) => {
                let message = response
                    .json::<ServerError>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .unwrap_or_else(|| MSG_SUBMIT_FAILURE.to_string());
                self.state.submit_error = Some(message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "contact submission never reached the server");
                self.state.submit_error = Some(MSG_SUBMIT_FAILURE.to_string());
            }
        }

        self.state.is_submitting = false;
    }

    /// Dismiss the success confirmation and return to an empty form.
    pub fn dismiss_confirmation(&mut self) {
        self.state.is_submitted = false;
    }
}
