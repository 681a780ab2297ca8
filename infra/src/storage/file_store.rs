//! File-backed key-value store
//!
//! All keys live in one JSON object document. Every write rewrites the
//! document through a sibling temporary file followed by a rename, so a
//! crash mid-write leaves the previous document intact.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use otp_core::errors::DomainResult;
use otp_core::repositories::KeyValueStore;

use crate::InfrastructureError;

type Document = BTreeMap<String, String>;

/// Key-value store persisted as a JSON document on local disk
#[derive(Debug)]
pub struct FileKeyValueStore {
    /// Location of the JSON document
    path: PathBuf,
    /// Serializes document rewrites within this process
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open (or lazily create) a store at `path`
    ///
    /// Missing parent directories are created. The document itself is only
    /// written on the first `set`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        info!(path = %path.display(), "Opened file key-value store");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, InfrastructureError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Store document not found, starting empty");
                return Ok(Document::new());
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Document::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_document(&self, document: &Document) -> Result<(), InfrastructureError> {
        let contents = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &self.path).await?;

        debug!(path = %self.path.display(), keys = document.len(), "Store document written");
        Ok(())
    }

    async fn update<F>(&self, mutate: F) -> Result<(), InfrastructureError>
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let _guard = self.write_lock.lock().await;

        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(InfrastructureError::Serialization(e)) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    event = "file_store_corrupt",
                    "Store document is not a JSON object, overwriting"
                );
                Document::new()
            }
            Err(e) => return Err(e),
        };

        if mutate(&mut document) {
            self.write_document(&document).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.update(|document| {
            document.insert(key.to_string(), value.to_string());
            true
        })
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.update(|document| document.remove(key).is_some()).await?;
        Ok(())
    }
}
