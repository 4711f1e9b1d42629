//! WhatsApp delivery through the Twilio Messages API.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt, PhoneNumber};

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number, with or without the `whatsapp:` prefix.
    pub from: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

pub struct TwilioWhatsAppChannel {
    config: TwilioConfig,
    http_client: reqwest::Client,
}

impl TwilioWhatsAppChannel {
    pub fn new(config: TwilioConfig) -> Result<Self, DeliveryError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent("laundry-invoice-server/1.0")
            .build()?;
        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: TwilioConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    fn sender(&self) -> String {
        if self.config.from.starts_with("whatsapp:") {
            self.config.from.clone()
        } else {
            format!("whatsapp:{}", self.config.from)
        }
    }
}

#[async_trait]
impl DeliveryChannel for TwilioWhatsAppChannel {
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &DeliveryMessage,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let to = recipient.whatsapp_address();
        let from = self.sender();
        let form = [
            ("From", from.as_str()),
            ("To", to.as_str()),
            ("Body", message.body.as_str()),
            ("MediaUrl", message.media_url.as_str()),
        ];

        log::debug!("Sending WhatsApp message to {}", recipient);
        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form[..])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(ApiError {
                    code: Some(code),
                    message: Some(message),
                }) => format!("{message} (code {code})"),
                Ok(ApiError {
                    message: Some(message),
                    ..
                }) => message,
                _ => body,
            };
            log::warn!(
                "Twilio rejected message to {}: {} {}",
                recipient,
                status,
                message
            );
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let resource: MessageResource = response.json().await?;
        log::info!("WhatsApp message {} queued for {}", resource.sid, recipient);
        Ok(DeliveryReceipt {
            message_id: resource.sid,
        })
    }
}
