use serde::{Deserialize, Serialize};

/// Contact form payload as it arrives on the wire.
///
/// `name` and `email` default to empty strings so that an absent field is
/// reported as a missing required field rather than failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub project_details: Option<String>,
}

/// A submission that passed validation. Fields are trimmed; optional fields
/// that were absent or whitespace-only are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}
