//! The invoice issue flow shared by the HTML form and the JSON API.

use actix_web::web;
use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::{format_amount, Invoice, RenderError};
use crate::delivery::{DeliveryError, DeliveryMessage, PhoneNumber};
use crate::order::{build_order, RawInputs};
use crate::state::AppState;
use crate::storage::{unique_document_name, StorageError, StoredDocument};

#[derive(Debug, Error)]
pub enum IssueError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invoice rendering was cancelled")]
    Cancelled,
}

/// Outcome of the delivery step. Delivery problems never fail an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent { recipient: String, message_id: String },
    Failed { recipient: String, reason: String },
    InvalidRecipient { input: String, reason: String },
    NoRecipient,
    Disabled,
}

impl DeliveryStatus {
    /// Short text for the customer-facing result page.
    pub fn notice(&self) -> String {
        match self {
            DeliveryStatus::Sent { recipient, .. } => {
                format!("Invoice sent via WhatsApp to {recipient}.")
            }
            DeliveryStatus::Failed { recipient, reason } => {
                format!("Could not send the invoice to {recipient}: {reason}")
            }
            DeliveryStatus::InvalidRecipient { input, reason } => {
                format!("'{input}' is not a usable phone number: {reason}")
            }
            DeliveryStatus::NoRecipient => "No phone number given, invoice not sent.".to_string(),
            DeliveryStatus::Disabled => "WhatsApp delivery is not configured.".to_string(),
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent { .. })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedInvoice {
    pub invoice: Invoice,
    pub document: StoredDocument,
    pub delivery: DeliveryStatus,
}

pub fn message_body(invoice: &Invoice) -> String {
    format!(
        "Laundry invoice {}. Total: {}",
        invoice.number,
        format_amount(invoice.order.total())
    )
}

/// Price `raw`, render and publish the invoice, then try to deliver it.
///
/// `recipient` falls back to the configured default recipient when absent or
/// blank.
pub async fn issue_invoice(
    state: &AppState,
    raw: &RawInputs,
    recipient: Option<&str>,
) -> Result<IssuedInvoice, IssueError> {
    let order = build_order(&state.catalog, &state.services, raw);
    let invoice = Invoice::new(order, Local::now().date_naive());
    log::info!(
        "Issuing invoice {} with {} line(s), total {}",
        invoice.number,
        invoice.order.lines().len(),
        format_amount(invoice.order.total())
    );

    let renderer = state.renderer.clone();
    let to_render = invoice.clone();
    let rendered = web::block(move || renderer.render(&to_render))
        .await
        .map_err(|_| IssueError::Cancelled)??;

    let document = state
        .store
        .publish(&unique_document_name(rendered.issued_on), &rendered.pdf)
        .await?;

    let delivery = deliver(state, recipient, &invoice, &document).await;
    match &delivery {
        DeliveryStatus::Sent { .. } => {}
        other => log::warn!("Invoice {} not delivered: {}", invoice.number, other.notice()),
    }

    Ok(IssuedInvoice {
        invoice,
        document,
        delivery,
    })
}

async fn deliver(
    state: &AppState,
    recipient: Option<&str>,
    invoice: &Invoice,
    document: &StoredDocument,
) -> DeliveryStatus {
    let Some(channel) = &state.delivery else {
        return DeliveryStatus::Disabled;
    };

    let input = recipient
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .or_else(|| state.default_recipient.as_deref());
    let Some(input) = input else {
        return DeliveryStatus::NoRecipient;
    };

    let phone = match PhoneNumber::normalize(input, &state.default_country_code) {
        Ok(phone) => phone,
        Err(DeliveryError::InvalidRecipient { input, reason }) => {
            return DeliveryStatus::InvalidRecipient { input, reason }
        }
        Err(e) => {
            return DeliveryStatus::InvalidRecipient {
                input: input.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let message = DeliveryMessage {
        body: message_body(invoice),
        media_url: document.url.clone(),
    };

    match channel.send(&phone, &message).await {
        Ok(receipt) => DeliveryStatus::Sent {
            recipient: phone.to_string(),
            message_id: receipt.message_id,
        },
        Err(e) => {
            log::error!("Delivery of invoice {} to {} failed: {}", invoice.number, phone, e);
            DeliveryStatus::Failed {
                recipient: phone.to_string(),
                reason: e.to_string(),
            }
        }
    }
}
