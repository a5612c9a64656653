use async_trait::async_trait;
use azure_storage::{CloudLocation, ConnectionString};
use azure_storage_blobs::prelude::{BlobServiceClient, ClientBuilder, ContainerClient};
use reqwest::Url;
use std::net::IpAddr;
use tracing::debug;

use super::{BlobStore, StorageError};

/// Azure Blob Storage account, addressed through a connection string.
#[derive(Clone)]
pub struct AzureBlobStore {
    account: String,
    service: BlobServiceClient,
}

impl std::fmt::Debug for AzureBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobStore").field("account", &self.account).finish_non_exhaustive()
    }
}

impl AzureBlobStore {
    /// Build a client from an Azure Storage connection string.
    ///
    /// Accepts account-key strings (`AccountName=..;AccountKey=..`, optionally with
    /// `EndpointSuffix` or `BlobEndpoint`), SAS strings (`BlobEndpoint=..;SharedAccessSignature=..`)
    /// and `UseDevelopmentStorage=true` for the local emulator.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, StorageError> {
        let parsed = ConnectionString::new(connection_string)
            .map_err(|e| StorageError::InvalidConnectionString(e.to_string()))?;

        if parsed.use_development_storage == Some(true) {
            let service = ClientBuilder::emulator().blob_service_client();
            return Ok(Self { account: EMULATOR_ACCOUNT.to_string(), service });
        }

        let (account, location) = cloud_location(&parsed)?;
        let credentials = parsed
            .storage_credentials()
            .map_err(|e| StorageError::InvalidConnectionString(e.to_string()))?;

        let service = ClientBuilder::with_location(location, credentials).blob_service_client();

        Ok(Self { account, service })
    }

    fn container(&self, container: &str) -> ContainerClient {
        self.service.container_client(container)
    }
}

const EMULATOR_ACCOUNT: &str = "devstoreaccount1";
const PUBLIC_ENDPOINT_SUFFIX: &str = "core.windows.net";

fn cloud_location(parsed: &ConnectionString<'_>) -> Result<(String, CloudLocation), StorageError> {
    if let Some(endpoint) = parsed.blob_endpoint {
        let uri = endpoint.trim_end_matches('/').to_string();
        let account = match parsed.account_name {
            Some(account) => account.to_string(),
            None => account_from_endpoint(&uri)?,
        };
        return Ok((account.clone(), CloudLocation::Custom { account, uri }));
    }

    let account = parsed
        .account_name
        .ok_or_else(|| {
            StorageError::InvalidConnectionString("missing AccountName or BlobEndpoint".into())
        })?
        .to_string();

    match parsed.endpoint_suffix {
        Some(suffix) if suffix != PUBLIC_ENDPOINT_SUFFIX => {
            let uri = format!("https://{account}.blob.{suffix}");
            Ok((account.clone(), CloudLocation::Custom { account, uri }))
        }
        _ => Ok((account.clone(), CloudLocation::Public { account })),
    }
}

/// `https://acct.blob.core.windows.net` names the account in the host;
/// `http://127.0.0.1:10000/acct` (emulator style) names it in the first path segment.
fn account_from_endpoint(endpoint: &str) -> Result<String, StorageError> {
    let invalid = || {
        StorageError::InvalidConnectionString(format!(
            "cannot derive account from BlobEndpoint '{endpoint}'"
        ))
    };

    let url = Url::parse(endpoint).map_err(|_| invalid())?;
    let host = url.host_str().ok_or_else(invalid)?;
    let path_style = host == "localhost"
        || host.trim_start_matches('[').trim_end_matches(']').parse::<IpAddr>().is_ok();

    let account = if path_style {
        url.path_segments().and_then(|mut segments| segments.next()).unwrap_or_default()
    } else {
        host.split('.').next().unwrap_or_default()
    };

    if account.is_empty() { Err(invalid()) } else { Ok(account.to_string()) }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool, StorageError> {
        self.container(container).exists().await.map_err(StorageError::service)
    }

    async fn create_container(&self, container: &str) -> Result<(), StorageError> {
        self.container(container).create().await.map(|_| ()).map_err(StorageError::service)
    }

    async fn put_blob(
        &self,
        container: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> Result<(), StorageError> {
        debug!(account = %self.account, container, key, bytes = body.len(), "putting block blob");

        self.container(container)
            .blob_client(key)
            .put_block_blob(body)
            .content_type(content_type)
            .await
            .map(|_| ())
            .map_err(StorageError::service)
    }
}
