//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherSource`] seam
//! - Blob storage behind the [`BlobStore`] seam, with an Azure implementation
//! - The per-city fetch → report → upload driver
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod storage;
pub mod upload;

pub use config::Config;
pub use driver::{CityOutcome, DEFAULT_CITIES, Dashboard, RunSummary};
pub use error::{FetchError, UploadError};
pub use model::{Conditions, StoredBlob, WeatherReading};
pub use provider::{WeatherSource, source_from_config};
pub use report::Reporter;
pub use storage::{AzureBlobStore, BlobStore, StorageError};
pub use upload::{ContainerStatus, Uploader};
