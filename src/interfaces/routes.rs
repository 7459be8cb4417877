use actix_web::web;

use crate::handlers::{
    contact::submit_contact, home::home, json_error::JsonError, system::health_check,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| JsonError::from(err).into()),
    );

    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .service(submit_contact)
            .service(health_check),
    );
}
