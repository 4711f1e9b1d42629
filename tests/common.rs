#![allow(dead_code)]

use async_trait::async_trait;
use laundry_invoice_server::catalog::{Catalog, ServiceTable};
use laundry_invoice_server::delivery::{
    DeliveryChannel, DeliveryError, DeliveryMessage, DeliveryReceipt, PhoneNumber,
};
use laundry_invoice_server::invoice::{GeneratedDocument, Invoice, InvoiceRenderer, RenderError};
use laundry_invoice_server::storage::{DocumentStore, StorageError, StoredDocument, PUBLIC_PREFIX};
use laundry_invoice_server::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_BASE_URL: &str = "http://test.example.com";

/// Renderer double producing a tiny fake PDF.
pub struct StubRenderer;

impl InvoiceRenderer for StubRenderer {
    fn render(&self, invoice: &Invoice) -> Result<GeneratedDocument, RenderError> {
        Ok(GeneratedDocument {
            pdf: format!("%PDF-stub {}", invoice.number).into_bytes(),
            issued_on: invoice.issued_on,
        })
    }
}

pub struct FailingRenderer;

impl InvoiceRenderer for FailingRenderer {
    fn render(&self, _invoice: &Invoice) -> Result<GeneratedDocument, RenderError> {
        Err(RenderError::Pdf("renderer offline".to_string()))
    }
}

/// In-memory storage for testing
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    files: Arc<tokio::sync::Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn file(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(filename).cloned()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn publish(&self, filename: &str, bytes: &[u8]) -> Result<StoredDocument, StorageError> {
        let mut files = self.files.lock().await;
        files.insert(filename.to_string(), bytes.to_vec());
        Ok(StoredDocument {
            filename: filename.to_string(),
            url: self.public_url(filename),
        })
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", TEST_BASE_URL, PUBLIC_PREFIX, filename)
    }
}

pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn publish(&self, filename: &str, _bytes: &[u8]) -> Result<StoredDocument, StorageError> {
        Err(StorageError::Write {
            path: filename.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", TEST_BASE_URL, PUBLIC_PREFIX, filename)
    }
}

/// Delivery double that records every message it accepts.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    sent: Arc<Mutex<Vec<(String, DeliveryMessage)>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, DeliveryMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    async fn send(
        &self,
        recipient: &PhoneNumber,
        message: &DeliveryMessage,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((recipient.to_string(), message.clone()));
        Ok(DeliveryReceipt {
            message_id: format!("SM{:04}", sent.len()),
        })
    }
}

pub struct FailingChannel;

#[async_trait]
impl DeliveryChannel for FailingChannel {
    async fn send(
        &self,
        _recipient: &PhoneNumber,
        _message: &DeliveryMessage,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        Err(DeliveryError::Rejected {
            status: 400,
            message: "Invalid 'To' Phone Number".to_string(),
        })
    }
}

pub fn test_state(
    renderer: Arc<dyn InvoiceRenderer + Send + Sync>,
    store: Arc<dyn DocumentStore + Send + Sync>,
    delivery: Option<Arc<dyn DeliveryChannel + Send + Sync>>,
) -> AppState {
    AppState::new(Catalog::builtin(), ServiceTable::builtin(), renderer, store)
        .with_delivery(delivery)
}

/// Stub renderer, in-memory store, and the given delivery channel.
pub fn state_with_delivery(delivery: Option<Arc<dyn DeliveryChannel + Send + Sync>>) -> AppState {
    test_state(
        Arc::new(StubRenderer),
        Arc::new(MemoryDocumentStore::new()),
        delivery,
    )
}
