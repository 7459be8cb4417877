use std::env;

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::Serialize;

use super::{template, DispatchOutcome, Mailer};
use crate::entities::contact::ContactSubmission;

const DEFAULT_RELAY_HOST: &str = "smtp.gmail.com";
const DEFAULT_RELAY_PORT: u16 = 587;

pub const ENV_RELAY_USER: &str = "SMTP_USERNAME";
pub const ENV_RELAY_CREDENTIAL: &str = "SMTP_PASSWORD";
pub const ENV_DESTINATION: &str = "CONTACT_RECIPIENT";
pub const ENV_RELAY_HOST: &str = "SMTP_HOST";
pub const ENV_RELAY_PORT: &str = "SMTP_PORT";
pub const ENV_SITE_URL: &str = "SITE_URL";

/// Relay settings, resolved from the environment at dispatch time rather than
/// cached at startup so credentials can be rotated without a restart.
#[derive(Debug, Clone)]
pub struct MailerSettings {
    pub relay_host: String,
    pub relay_port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
    pub site_url: Option<String>,
}

impl MailerSettings {
    /// `None` when any of the three required values (relay user, relay
    /// credential, destination address) is absent or blank.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let username = non_blank(lookup(ENV_RELAY_USER))?;
        let password = non_blank(lookup(ENV_RELAY_CREDENTIAL))?;
        let recipient = non_blank(lookup(ENV_DESTINATION))?;

        Some(MailerSettings {
            relay_host: non_blank(lookup(ENV_RELAY_HOST))
                .unwrap_or_else(|| DEFAULT_RELAY_HOST.to_string()),
            relay_port: lookup(ENV_RELAY_PORT)
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(DEFAULT_RELAY_PORT),
            username,
            password,
            recipient,
            site_url: non_blank(lookup(ENV_SITE_URL)),
        })
    }
}

/// Presence booleans for the required relay settings, reported by the health
/// endpoint without revealing any values.
#[derive(Debug, Serialize)]
pub struct MailerPresence {
    pub relay_user: bool,
    pub relay_credential: bool,
    pub destination: bool,
}

impl MailerPresence {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        MailerPresence {
            relay_user: non_blank(lookup(ENV_RELAY_USER)).is_some(),
            relay_credential: non_blank(lookup(ENV_RELAY_CREDENTIAL)).is_some(),
            destination: non_blank(lookup(ENV_DESTINATION)).is_some(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// SMTP implementation of [`Mailer`]. Opens a fresh relay connection for each
/// send and tears it down afterwards; suitable for low-volume notification
/// traffic, not batch sending.
pub struct SmtpMailer;

impl SmtpMailer {
    pub fn new() -> Self {
        SmtpMailer
    }
}

impl Default for SmtpMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_notification(&self, submission: ContactSubmission) -> DispatchOutcome {
        let Some(settings) = MailerSettings::from_env() else {
            tracing::warn!("mail relay configuration incomplete, notification not sent");
            return DispatchOutcome::ConfigurationMissing;
        };

        let message = match build_message(&settings, &submission) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "failed to assemble notification message");
                return DispatchOutcome::TransportFailure;
            }
        };

        let transport =
            match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.relay_host) {
                Ok(builder) => builder
                    .port(settings.relay_port)
                    .credentials(Credentials::new(
                        settings.username.clone(),
                        settings.password.clone(),
                    ))
                    .build(),
                Err(e) => {
                    tracing::error!(error = %e, "failed to open relay transport");
                    return DispatchOutcome::TransportFailure;
                }
            };

        match transport.send(message).await {
            Ok(_) => {
                tracing::info!(to = %settings.recipient, "contact notification sent");
                DispatchOutcome::Sent
            }
            Err(e) => {
                let detail = e.to_string();
                tracing::error!(error = %detail, "relay rejected the notification");
                if is_auth_error(&detail) {
                    DispatchOutcome::AuthFailure
                } else {
                    DispatchOutcome::TransportFailure
                }
            }
        }
    }
}

/// Reply-To carries the submitter's address so operators can answer directly.
fn build_message(
    settings: &MailerSettings,
    submission: &ContactSubmission,
) -> anyhow::Result<Message> {
    let message = Message::builder()
        .from(settings.username.parse()?)
        .reply_to(submission.email.parse()?)
        .to(settings.recipient.parse()?)
        .subject(template::subject(submission))
        .header(ContentType::TEXT_HTML)
        .body(template::html_body(submission, settings.site_url.as_deref()))?;

    Ok(message)
}

/// Credential-rejection markers in relay error text. SMTP libraries surface
/// 535-class failures as strings, so classification happens here, once,
/// instead of leaking the heuristic into the request pipeline.
fn is_auth_error(detail: &str) -> bool {
    let detail = detail.to_lowercase();
    detail.contains("authentication")
        || detail.contains("credentials")
        || detail.contains("password")
        || detail.contains("535")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn settings_require_user_credential_and_destination() {
        assert!(MailerSettings::from_lookup(lookup(&[])).is_none());
        assert!(MailerSettings::from_lookup(lookup(&[
            (ENV_RELAY_USER, "ops@studio.example"),
            (ENV_RELAY_CREDENTIAL, "secret"),
        ]))
        .is_none());
        // Blank counts as absent.
        assert!(MailerSettings::from_lookup(lookup(&[
            (ENV_RELAY_USER, "ops@studio.example"),
            (ENV_RELAY_CREDENTIAL, "   "),
            (ENV_DESTINATION, "hello@studio.example"),
        ]))
        .is_none());
    }

    #[test]
    fn settings_apply_relay_defaults() {
        let settings = MailerSettings::from_lookup(lookup(&[
            (ENV_RELAY_USER, "ops@studio.example"),
            (ENV_RELAY_CREDENTIAL, "secret"),
            (ENV_DESTINATION, "hello@studio.example"),
        ]))
        .unwrap();

        assert_eq!(settings.relay_host, DEFAULT_RELAY_HOST);
        assert_eq!(settings.relay_port, DEFAULT_RELAY_PORT);
        assert_eq!(settings.site_url, None);
    }

    #[test]
    fn settings_honor_overrides() {
        let settings = MailerSettings::from_lookup(lookup(&[
            (ENV_RELAY_USER, "ops@studio.example"),
            (ENV_RELAY_CREDENTIAL, "secret"),
            (ENV_DESTINATION, "hello@studio.example"),
            (ENV_RELAY_HOST, "smtp.mailhost.example"),
            (ENV_RELAY_PORT, "2525"),
            (ENV_SITE_URL, "https://studio.example"),
        ]))
        .unwrap();

        assert_eq!(settings.relay_host, "smtp.mailhost.example");
        assert_eq!(settings.relay_port, 2525);
        assert_eq!(settings.site_url.as_deref(), Some("https://studio.example"));
    }

    #[test]
    fn presence_reports_each_required_value() {
        let presence = MailerPresence::from_lookup(lookup(&[
            (ENV_RELAY_USER, "ops@studio.example"),
            (ENV_DESTINATION, "  "),
        ]));

        assert!(presence.relay_user);
        assert!(!presence.relay_credential);
        assert!(!presence.destination);
    }

    #[test]
    fn auth_markers_are_recognized() {
        assert!(is_auth_error("535 5.7.8 Username and Password not accepted"));
        assert!(is_auth_error("SMTP authentication failed"));
        assert!(is_auth_error("Invalid credentials (Failure)"));
        assert!(!is_auth_error("connection refused"));
        assert!(!is_auth_error("lost connection to relay"));
    }

    #[test]
    fn message_builds_with_reply_to_set_to_submitter() {
        let settings = MailerSettings {
            relay_host: DEFAULT_RELAY_HOST.to_string(),
            relay_port: DEFAULT_RELAY_PORT,
            username: "ops@studio.example".to_string(),
            password: "secret".to_string(),
            recipient: "hello@studio.example".to_string(),
            site_url: None,
        };
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            project_details: None,
        };

        let message = build_message(&settings, &submission).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Reply-To: ada@example.com"));
        assert!(rendered.contains("Subject: New project inquiry from Ada"));
    }
}
