use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::error::LoadError;
use crate::parser::{LoadedTrips, parse_trips, parse_trips_csv};
use crate::services::TripSource;

/// Loads trips from a local `.json` or `.csv` file.
pub struct FileTripSource {
    path: PathBuf,
}

impl FileTripSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_csv(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    }
}

#[async_trait]
impl TripSource for FileTripSource {
    async fn load(&self) -> Result<LoadedTrips, LoadError> {
        let bytes = tokio::fs::read(&self.path).await?;

        let loaded = if self.is_csv() {
            parse_trips_csv(bytes.as_slice())?
        } else {
            parse_trips(&bytes)?
        };

        info!(
            path = %self.path.display(),
            accepted = loaded.trips.len(),
            rejected = loaded.rejected.len(),
            "Trips loaded"
        );
        Ok(loaded)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
