#![allow(dead_code)]

use std::{net::TcpListener, sync::Arc, time::Duration};

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use studio_backend::{
    entities::contact::ContactSubmission,
    mailer::{DispatchOutcome, Mailer},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState,
};

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Studio Backend Test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        worker_count: 1,
        ..AppConfig::default()
    }
}

impl TestApp {
    pub async fn spawn(mailer: Arc<dyn Mailer>) -> Self {
        Self::spawn_with_config(test_config(), mailer).await
    }

    pub async fn spawn_with_config(config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = web::Data::new(AppState::with_mailer(&config, mailer));
        let workers = config.worker_count;

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(workers)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client
            .get(format!("{}/api/health", address))
            .send()
            .await
            .is_err()
        {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp { address, client }
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/contact", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to send contact request")
    }
}

/// Mailer double that records every submission and resolves with a fixed
/// outcome.
pub struct StubMailer {
    outcome: DispatchOutcome,
    pub calls: Mutex<Vec<ContactSubmission>>,
}

impl StubMailer {
    pub fn new(outcome: DispatchOutcome) -> Arc<Self> {
        Arc::new(StubMailer {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send_notification(&self, submission: ContactSubmission) -> DispatchOutcome {
        self.calls.lock().push(submission);
        self.outcome
    }
}

/// Mailer double that never resolves, for exercising the dispatch deadline.
pub struct NeverMailer;

#[async_trait]
impl Mailer for NeverMailer {
    async fn send_notification(&self, _submission: ContactSubmission) -> DispatchOutcome {
        std::future::pending().await
    }
}

/// Mailer double that panics, standing in for a dispatcher that throws.
pub struct PanickingMailer;

#[async_trait]
impl Mailer for PanickingMailer {
    async fn send_notification(&self, _submission: ContactSubmission) -> DispatchOutcome {
        panic!("relay client exploded");
    }
}
