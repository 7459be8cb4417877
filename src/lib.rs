use std::sync::Arc;

mod domain;
mod infrastructure;
mod interfaces;
pub mod client;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases, validation};
pub use infrastructure::{limiter, mailer, utils};
pub use interfaces::{handlers, routes};

use limiter::rate_limiter::FixedWindowLimiter;
use mailer::{smtp::SmtpMailer, Mailer};
use settings::AppConfig;
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: ContactHandler,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_mailer(config, Arc::new(SmtpMailer::new()))
    }

    /// Build the state around a specific mailer; tests substitute stubs here.
    pub fn with_mailer(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let limiter = FixedWindowLimiter::new(
            config.rate_limit_max_requests,
            config.rate_limit_window(),
        );
        let contact_handler = ContactHandler::new(mailer, limiter, config.dispatch_timeout());

        AppState {
            contact_handler,
            config: config.clone(),
        }
    }
}
