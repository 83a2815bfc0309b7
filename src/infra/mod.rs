//! Concrete trip sources.

mod api;
mod file;
mod mock;

pub use api::HttpTripSource;
pub use file::FileTripSource;
pub use mock::{DEFAULT_MOCK_COUNT, MOCK_LOCATIONS, MockTripSource};

use crate::config::Config;
use crate::services::TripSource;

/// Picks a source from a CLI argument.
///
/// `mock` generates trips, `api` uses the configured endpoint, anything
/// starting with `http` is fetched as-is, and everything else is a file path.
pub fn source_from_arg(arg: &str, config: &Config) -> Box<dyn TripSource> {
    match arg {
        "mock" => Box::new(MockTripSource::new(DEFAULT_MOCK_COUNT, config.mock_seed)),
        "api" => Box::new(HttpTripSource::new(config.trips_endpoint())),
        url if url.starts_with("http") => Box::new(HttpTripSource::new(url)),
        path => Box::new(FileTripSource::new(path)),
    }
}
