use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, Responder};
use log;

use crate::invoice::issue_invoice;
use crate::order::RawInputs;
use crate::routes::form::{self, PHONE_FIELD};
use crate::AppState;

pub async fn order_form(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(form::order_form_page(&state.catalog, &state.services))
}

/// Handles the urlencoded order form. Always answers with an HTML page.
pub async fn submit_order(
    state: web::Data<AppState>,
    fields: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let fields = fields.into_inner();
    let phone = fields
        .iter()
        .rev()
        .find(|(name, _)| name == PHONE_FIELD)
        .map(|(_, value)| value.clone());
    let raw = RawInputs::from_form_fields(fields);
    log::info!("Order form submitted with {} item input(s)", raw.len());

    match issue_invoice(&state, &raw, phone.as_deref()).await {
        Ok(issued) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(form::issued_page(&issued)),
        Err(e) => {
            log::error!("Failed to issue invoice from form: {}", e);
            HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(form::error_page(&e.to_string()))
        }
    }
}
