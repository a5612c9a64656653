//! In-memory [`BlobStore`] used by the uploader and driver tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{BlobStore, StorageError};

#[derive(Debug, Default)]
pub(crate) struct MemoryBlobStore {
    containers: Mutex<HashSet<String>>,
    blobs: Mutex<BTreeMap<(String, String), (Vec<u8>, &'static str)>>,
    /// Keys whose writes are refused.
    failing_keys: Mutex<Vec<String>>,
    pub exists_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn with_container(name: &str) -> Self {
        let store = Self::default();
        store.containers.lock().unwrap().insert(name.to_string());
        store
    }

    /// Refuse writes to any key containing `fragment`.
    pub fn fail_writes_matching(&self, fragment: &str) {
        self.failing_keys.lock().unwrap().push(fragment.to_string());
    }

    pub fn blob(&self, container: &str, key: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap()
            .get(&(container.to_string(), key.to_string()))
            .map(|(body, _)| body.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().map(|(_, key)| key.clone()).collect()
    }

    pub fn content_type(&self, container: &str, key: &str) -> Option<&'static str> {
        self.blobs
            .lock()
            .unwrap()
            .get(&(container.to_string(), key.to_string()))
            .map(|(_, ct)| *ct)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.containers.lock().unwrap().contains(container))
    }

    async fn create_container(&self, container: &str) -> Result<(), StorageError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.containers.lock().unwrap().insert(container.to_string());
        Ok(())
    }

    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> Result<(), StorageError> {
        if !self.containers.lock().unwrap().contains(container) {
            return Err(StorageError::service(io::Error::new(
                io::ErrorKind::NotFound,
                format!("container '{container}' does not exist"),
            )));
        }
        if self.failing_keys.lock().unwrap().iter().any(|f| key.contains(f.as_str())) {
            return Err(StorageError::service(io::Error::other("write refused")));
        }

        self.blobs
            .lock()
            .unwrap()
            .insert((container.to_string(), key.to_string()), (body, content_type));
        Ok(())
    }
}
