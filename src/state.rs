use std::sync::Arc;

use crate::catalog::{loader, Catalog, ServiceTable};
use crate::config::AppConfig;
use crate::delivery::{DeliveryChannel, TwilioWhatsAppChannel};
use crate::invoice::{InvoiceRenderer, PdfInvoiceRenderer};
use crate::storage::{DocumentStore, LocalDocumentStore};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub services: Arc<ServiceTable>,
    pub renderer: Arc<dyn InvoiceRenderer + Send + Sync>,
    pub store: Arc<dyn DocumentStore + Send + Sync>,
    /// `None` when no messaging provider is configured.
    pub delivery: Option<Arc<dyn DeliveryChannel + Send + Sync>>,
    pub default_country_code: String,
    pub default_recipient: Option<String>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let (catalog, services) = match &config.catalog_path {
            Some(path) => loader::load_tables(path)?,
            None => {
                log::info!("No CATALOG_PATH set, using the built-in price list");
                (Catalog::builtin(), ServiceTable::builtin())
            }
        };

        let delivery: Option<Arc<dyn DeliveryChannel + Send + Sync>> = match &config.twilio {
            Some(twilio) => Some(Arc::new(TwilioWhatsAppChannel::new(twilio.clone())?)),
            None => {
                log::warn!("Twilio is not configured, invoices will not be delivered");
                None
            }
        };

        let store = LocalDocumentStore::new(&config.invoice_dir, &config.public_base_url);

        Ok(Self::new(
            catalog,
            services,
            Arc::new(PdfInvoiceRenderer::new(&config.font_path)),
            Arc::new(store),
        )
        .with_delivery(delivery)
        .with_default_country_code(&config.default_country_code)
        .with_default_recipient(config.default_recipient.clone()))
    }

    pub fn new(
        catalog: Catalog,
        services: ServiceTable,
        renderer: Arc<dyn InvoiceRenderer + Send + Sync>,
        store: Arc<dyn DocumentStore + Send + Sync>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            services: Arc::new(services),
            renderer,
            store,
            delivery: None,
            default_country_code: "965".to_string(),
            default_recipient: None,
        }
    }

    pub fn with_delivery(mut self, delivery: Option<Arc<dyn DeliveryChannel + Send + Sync>>) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_default_country_code(mut self, code: &str) -> Self {
        self.default_country_code = code.to_string();
        self
    }

    pub fn with_default_recipient(mut self, recipient: Option<String>) -> Self {
        self.default_recipient = recipient;
        self
    }
}
