//! Publishing of rendered invoices.
//!
//! Documents are written into a static folder that the HTTP server also
//! serves under `/invoices`, so every stored file has a stable public URL.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use utoipa::ToSchema;
use uuid::Uuid;

/// URL path under which published documents are served.
pub const PUBLIC_PREFIX: &str = "/invoices";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create invoice directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write document {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document name '{0}'")]
    InvalidName(String),
}

/// A published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoredDocument {
    #[schema(example = "invoice-20261019-4f1c2a9e8b7d4c3e9a0b1c2d3e4f5a6b.pdf")]
    pub filename: String,
    #[schema(example = "https://laundry.example.com/invoices/invoice-20261019-4f1c2a9e8b7d4c3e9a0b1c2d3e4f5a6b.pdf")]
    pub url: String,
}

#[async_trait]
pub trait DocumentStore {
    /// Persist `bytes` under `filename` and return its public reference.
    async fn publish(&self, filename: &str, bytes: &[u8]) -> Result<StoredDocument, StorageError>;

    fn public_url(&self, filename: &str) -> String;
}

/// Collision-resistant file name for an invoice issued on `issued_on`.
pub fn unique_document_name(issued_on: NaiveDate) -> String {
    format!(
        "invoice-{}-{}.pdf",
        issued_on.format("%Y%m%d"),
        Uuid::new_v4().simple()
    )
}

/// Stores documents on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalDocumentStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into();
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn document_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn publish(&self, filename: &str, bytes: &[u8]) -> Result<StoredDocument, StorageError> {
        let safe_name = sanitize_filename::sanitize(filename);
        if safe_name.is_empty() || safe_name != filename {
            return Err(StorageError::InvalidName(filename.to_string()));
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.display().to_string(),
                source,
            })?;

        let path = self.document_path(&safe_name);
        fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.display().to_string(),
                source,
            })?;

        log::info!("Stored document {} ({} bytes)", path.display(), bytes.len());

        Ok(StoredDocument {
            url: self.public_url(&safe_name),
            filename: safe_name,
        })
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.public_base_url, PUBLIC_PREFIX, filename)
    }
}
