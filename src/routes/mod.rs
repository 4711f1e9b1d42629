//! Routes module - HTTP surface of the invoice server.
//!
//! - `form` - HTML order form and result pages
//! - `handlers` - form routes (`/`, `/invoices`)
//! - `api` - JSON routes under `/api`
//!
//! Published PDFs are served by `actix_files` from `run()`, because the
//! directory comes from configuration.

pub mod api;
pub mod form;
pub mod handlers;

use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::ErrorResponse;

const FORM_LIMIT_BYTES: usize = 64 * 1024;

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    log::debug!("Rejected JSON body: {}", message);
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
    )
    .into()
}

/// Form routes answer with a notice page even when the body is rejected.
fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    log::debug!("Rejected form body: {}", message);
    let response = HttpResponse::build(err.status_code())
        .content_type(ContentType::html())
        .body(form::error_page(&message));
    InternalError::from_response(err, response).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(
            web::FormConfig::default()
                .limit(FORM_LIMIT_BYTES)
                .error_handler(form_error_handler),
        )
        .service(
            web::resource("/")
                .route(web::get().to(handlers::order_form))
                .route(web::post().to(handlers::submit_order)),
        )
        .service(web::resource("/invoices").route(web::post().to(handlers::submit_order)))
        .service(
            web::scope("/api")
                .service(web::resource("/catalog").route(web::get().to(api::get_catalog)))
                .service(web::resource("/orders/quote").route(web::post().to(api::quote_order)))
                .service(web::resource("/invoices").route(web::post().to(api::create_invoice))),
        );
}
