use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use studio_backend::{
    graceful_shutdown::shutdown_signal, routes::configure_routes, settings::AppConfig, AppState,
};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));

    let server_addr = format!("{}:{}", config.host, config.port);
    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let cors = if cors_origins.iter().any(|origin| origin == "*") {
            Cors::permissive()
        } else {
            let cors = Cors::default()
                .allowed_methods(vec!["GET", "POST"])
                .allowed_header(header::CONTENT_TYPE)
                .max_age(3600);
            cors_origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin))
        };

        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        signal = shutdown_signal() => {
            tracing::warn!(%signal, "shutdown signal received, stopping server");
            Ok(())
        }
    }
}
