use thiserror::Error;

use crate::storage::StorageError;

/// Why a city's current weather could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to OpenWeather failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("OpenWeather response is not a JSON object: {0}")]
    Decode(#[source] serde_json::Error),

    /// Valid JSON, but without the fields the report needs.
    #[error("OpenWeather response is malformed: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Transport errors carry the request URL, which includes the API key.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url())
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = FetchError::Status { status: 401, body: "Invalid API key".into() };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[test]
    fn storage_error_is_transparent_inside_upload_error() {
        let err: UploadError = StorageError::InvalidConnectionString("no AccountName".into()).into();
        assert_eq!(err.to_string(), "invalid storage connection string: no AccountName");
    }
}
