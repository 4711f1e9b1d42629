//! Invoice module - rendering priced orders into PDF documents.
//!
//! - `layout` - text lines of an invoice, with labels shaped for display
//! - `pdf` - printpdf renderer placing those lines on A4 pages
//! - `service` - the full issue flow: price, render, publish, deliver

pub mod layout;
pub mod pdf;
pub mod service;

pub use layout::{format_amount, InvoiceLayout};
pub use pdf::PdfInvoiceRenderer;
pub use service::{issue_invoice, DeliveryStatus, IssueError, IssuedInvoice};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::order::Order;

/// Errors that can occur while rendering an invoice.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load invoice font {path}: {message}")]
    Font { path: String, message: String },
    #[error("failed to produce PDF: {0}")]
    Pdf(String),
}

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub pdf: Vec<u8>,
    pub issued_on: NaiveDate,
}

/// An order with an invoice number and issue date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Invoice {
    #[schema(example = "INV-20261019-4F1C2A9E")]
    pub number: String,
    pub issued_on: NaiveDate,
    pub order: Order,
}

impl Invoice {
    pub fn new(order: Order, issued_on: NaiveDate) -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase();
        Self {
            number: format!("INV-{}-{}", issued_on.format("%Y%m%d"), suffix),
            issued_on,
            order,
        }
    }
}

pub trait InvoiceRenderer {
    fn render(&self, invoice: &Invoice) -> Result<GeneratedDocument, RenderError>;
}
