use async_trait::async_trait;

use crate::entities::contact::ContactSubmission;

pub mod smtp;
pub mod template;

/// Result of one delivery attempt. Timeouts are not represented here; the
/// submission pipeline races the dispatch against its own deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// A required relay setting (user, credential, destination) is absent.
    ConfigurationMissing,
    /// The relay rejected our credentials. Operator-actionable, surfaced
    /// distinctly from transient transport trouble.
    AuthFailure,
    TransportFailure,
}

/// Delivers the notification for one validated submission.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_notification(&self, submission: ContactSubmission) -> DispatchOutcome;
}
