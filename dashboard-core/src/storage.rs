use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod azure;

#[cfg(test)]
pub(crate) mod memory;

pub use azure::AzureBlobStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage connection string: {0}")]
    InvalidConnectionString(String),

    #[error("storage service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    pub fn service(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StorageError::Service(Box::new(err))
    }
}

/// Blob-style object store organised by container.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError>;

    async fn create_container(&self, container: &str) -> Result<(), StorageError>;

    /// Write `body` under `key`, replacing whatever is there.
    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> Result<(), StorageError>;
}
