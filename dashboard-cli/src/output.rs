use std::io::Write;
use tracing::debug;

use dashboard_core::{Conditions, FetchError, Reporter, StoredBlob, UploadError};

/// Prints the per-city report lines.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    #[cfg(test)]
    fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{text}") {
            debug!(error = %err, "console write failed");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn fetching(&mut self, city: &str) {
        self.line(format_args!("\nFetching weather for {city}..."));
    }

    fn conditions(&mut self, _city: &str, c: &Conditions) {
        self.line(format_args!("Temperature: {}°F", c.temperature));
        self.line(format_args!("Feels like: {}°F", c.feels_like));
        self.line(format_args!("Humidity: {}%", c.humidity));
        self.line(format_args!("Conditions: {}", c.description));
    }

    fn fetch_failed(&mut self, city: &str, error: &FetchError) {
        self.line(format_args!("Failed to fetch weather data for {city}: {error}"));
    }

    fn uploaded(&mut self, city: &str, blob: &StoredBlob) {
        self.line(format_args!("File '{}' uploaded to container '{}'", blob.key, blob.container));
        self.line(format_args!("Weather data for {city} saved to {}", blob.container));
    }

    fn upload_failed(&mut self, city: &str, error: &UploadError) {
        self.line(format_args!("Error uploading blob for {city}: {error}"));
    }
}
