use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::UploadError,
    model::{StoredBlob, WeatherReading, blob_key, capture_timestamp},
    storage::{BlobStore, StorageError},
};

const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Existing,
    Created,
}

/// Writes readings into one container of a [`BlobStore`].
///
/// The container is checked (and created if absent) once, in [`Uploader::prepare`];
/// uploads never re-check it.
#[derive(Debug, Clone)]
pub struct Uploader {
    store: Arc<dyn BlobStore>,
    container: String,
    status: ContainerStatus,
}

impl Uploader {
    pub async fn prepare(
        store: Arc<dyn BlobStore>,
        container: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let container = container.into();

        let status = if store.container_exists(&container).await? {
            debug!(container = %container, "container already exists");
            ContainerStatus::Existing
        } else {
            store.create_container(&container).await?;
            info!(container = %container, "container created");
            ContainerStatus::Created
        };

        Ok(Self { store, container, status })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn container_status(&self) -> ContainerStatus {
        self.status
    }

    /// Stamp `reading` with the capture time and store it under
    /// `weather-data/{city}-{YYYYMMDD-HHMMSS}.json`, overwriting any previous blob.
    pub async fn upload(
        &self,
        mut reading: WeatherReading,
        city: &str,
        captured_at: NaiveDateTime,
    ) -> Result<StoredBlob, UploadError> {
        let timestamp = capture_timestamp(captured_at);
        let key = blob_key(city, &timestamp);

        reading.stamp(&timestamp);
        let body = serde_json::to_vec(&reading)?;

        self.store.put_blob(&self.container, &key, body, CONTENT_TYPE).await?;
        debug!(city, key = %key, container = %self.container, "reading uploaded");

        Ok(StoredBlob { container: self.container.clone(), key })
    }
}
