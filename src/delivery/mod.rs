//! Delivery module - sends published invoices to customers.
//!
//! - `phone` - recipient normalization
//! - `twilio` - WhatsApp delivery through the Twilio Messages API

pub mod phone;
pub mod twilio;

pub use phone::PhoneNumber;
pub use twilio::{TwilioConfig, TwilioWhatsAppChannel};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid recipient '{input}': {reason}")]
    InvalidRecipient { input: String, reason: String },
    #[error("failed to reach messaging provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("messaging provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// What gets sent to the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryMessage {
    pub body: String,
    pub media_url: String,
}

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeliveryReceipt {
    #[schema(example = "SM1f0e2d3c4b5a69788796a5b4c3d2e1f0")]
    pub message_id: String,
}

#[async_trait]
pub trait DeliveryChannel {
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &DeliveryMessage,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}
