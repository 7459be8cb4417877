use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use sysinfo::System;

use crate::{constants::START_TIME, mailer::smtp::MailerPresence, AppState};

#[derive(Serialize)]
struct SystemInfo {
    os: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    environment: String,
    timestamp: String,
    version: String,
    mailer: MailerPresence,

    #[serde(skip_serializing_if = "Option::is_none")]
    uptime: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    start_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<SystemInfo>,
}

/// Liveness plus mail-relay configuration presence. Outside production the
/// response also carries uptime and host detail; production gets booleans
/// only.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();

    let mut response = HealthCheckResponse {
        status: "ok".to_string(),
        environment: state.config.env.to_string(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mailer: MailerPresence::from_env(),
        uptime: None,
        start_at: None,
        system: None,
    };

    if !state.config.is_production() {
        let uptime = now.signed_duration_since(*START_TIME);
        response.uptime = Some(
            format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64)).to_string(),
        );
        response.start_at = Some(START_TIME.to_rfc3339());

        let mut sys = System::new_all();
        sys.refresh_all();
        response.system = Some(SystemInfo {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
            memory_total: format!(
                "{:.2} GB",
                sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0
            ),
        });
    }

    HttpResponse::Ok().json(response)
}
