use crate::{
    error::{FetchError, UploadError},
    model::{Conditions, StoredBlob},
};

/// Receives progress from [`crate::Dashboard::run`], one city at a time.
pub trait Reporter {
    fn fetching(&mut self, city: &str);

    fn conditions(&mut self, city: &str, conditions: &Conditions);

    /// Covers transport failures as well as responses missing the expected fields.
    fn fetch_failed(&mut self, city: &str, error: &FetchError);

    fn uploaded(&mut self, city: &str, blob: &StoredBlob);

    fn upload_failed(&mut self, city: &str, error: &UploadError);
}
