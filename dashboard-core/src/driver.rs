use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::{model::StoredBlob, provider::WeatherSource, report::Reporter, upload::Uploader};

pub const DEFAULT_CITIES: [&str; 5] = ["Philadelphia", "Seattle", "Lagos", "London", "Bozeman"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityOutcome {
    Saved(StoredBlob),
    FetchFailed,
    UploadFailed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub failed: usize,
}

/// Fetches each city's weather and stores it, one city after another.
#[derive(Debug)]
pub struct Dashboard {
    source: Box<dyn WeatherSource>,
    uploader: Uploader,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Dashboard {
    pub fn new(source: Box<dyn WeatherSource>, uploader: Uploader) -> Self {
        Self { source, uploader, clock: local_now }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Process every city in order. A failure for one city never stops the rest.
    pub async fn run<C, R>(&self, cities: &[C], reporter: &mut R) -> RunSummary
    where
        C: AsRef<str>,
        R: Reporter + ?Sized,
    {
        let mut summary = RunSummary::default();

        for city in cities {
            match self.process_city(city.as_ref(), reporter).await {
                CityOutcome::Saved(_) => summary.saved += 1,
                CityOutcome::FetchFailed | CityOutcome::UploadFailed => summary.failed += 1,
            }
        }

        info!(saved = summary.saved, failed = summary.failed, "run finished");
        summary
    }

    pub async fn process_city<R>(&self, city: &str, reporter: &mut R) -> CityOutcome
    where
        R: Reporter + ?Sized,
    {
        reporter.fetching(city);

        let reading = match self.source.current(city).await {
            Ok(reading) => reading,
            Err(err) => {
                reporter.fetch_failed(city, &err);
                return CityOutcome::FetchFailed;
            }
        };

        let conditions = match reading.conditions() {
            Ok(conditions) => conditions,
            Err(err) => {
                warn!(city, error = %err, "skipping city with malformed response");
                reporter.fetch_failed(city, &err);
                return CityOutcome::FetchFailed;
            }
        };
        reporter.conditions(city, &conditions);

        match self.uploader.upload(reading, city, (self.clock)()).await {
            Ok(blob) => {
                reporter.uploaded(city, &blob);
                CityOutcome::Saved(blob)
            }
            Err(err) => {
                warn!(city, error = %err, "error uploading blob");
                reporter.upload_failed(city, &err);
                CityOutcome::UploadFailed
            }
        }
    }
}
