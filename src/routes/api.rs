use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use log;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{CatalogEntry, ServiceLevel};
use crate::invoice::{issue_invoice, DeliveryStatus, IssuedInvoice};
use crate::order::{build_order, Order, RawInputs};
use crate::{AppState, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub items: Vec<CatalogEntry>,
    pub services: Vec<ServiceLevel>,
    #[schema(example = "wash")]
    pub default_service: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: RawInputs,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceRequest {
    #[serde(default)]
    pub items: RawInputs,
    /// Customer phone number. Falls back to the configured default recipient.
    #[serde(default)]
    #[schema(example = "+965 1234 5678")]
    pub recipient: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    #[schema(example = "INV-20261019-4F1C2A9E")]
    pub invoice_number: String,
    pub issued_on: NaiveDate,
    pub order: Order,
    pub filename: String,
    pub document_url: String,
    pub delivery: DeliveryStatus,
    /// Human-readable delivery outcome.
    pub notice: String,
}

impl From<IssuedInvoice> for InvoiceResponse {
    fn from(issued: IssuedInvoice) -> Self {
        Self {
            notice: issued.delivery.notice(),
            invoice_number: issued.invoice.number,
            issued_on: issued.invoice.issued_on,
            order: issued.invoice.order,
            filename: issued.document.filename,
            document_url: issued.document.url,
            delivery: issued.delivery,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "Catalog",
    responses(
        (status = 200, description = "Billable items and service levels", body = CatalogResponse)
    )
)]
pub async fn get_catalog(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CatalogResponse {
        items: state.catalog.entries().to_vec(),
        services: state.services.levels().to_vec(),
        default_service: state.services.default_service().to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/orders/quote",
    tag = "Orders",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Priced order, nothing is rendered or stored", body = Order),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse)
    )
)]
pub async fn quote_order(
    state: web::Data<AppState>,
    request: web::Json<QuoteRequest>,
) -> impl Responder {
    let order = build_order(&state.catalog, &state.services, &request.items);
    log::debug!(
        "Quoted {} line(s), total {}",
        order.lines().len(),
        order.total()
    );
    HttpResponse::Ok().json(order)
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = InvoiceRequest,
    responses(
        (status = 200, description = "Invoice rendered and published; see `delivery` for the WhatsApp outcome", body = InvoiceResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 500, description = "Rendering or storage failed", body = ErrorResponse)
    )
)]
pub async fn create_invoice(
    state: web::Data<AppState>,
    request: web::Json<InvoiceRequest>,
) -> impl Responder {
    let request = request.into_inner();
    match issue_invoice(&state, &request.items, request.recipient.as_deref()).await {
        Ok(issued) => HttpResponse::Ok().json(InvoiceResponse::from(issued)),
        Err(e) => {
            log::error!("Failed to issue invoice: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}
