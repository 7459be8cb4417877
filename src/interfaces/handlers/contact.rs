use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    entities::contact::ContactForm, errors::AppError, utils::get_client_ip::get_client_ip,
    AppState,
};

#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    let client_ip = get_client_ip(&req, state.config.trust_x_forwarded_for);

    let response = state
        .contact_handler
        .submit(form.into_inner(), &client_ip)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
