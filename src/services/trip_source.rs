//! Trait for anything that can supply the trip collection.

use crate::error::LoadError;
use crate::parser::LoadedTrips;

/// Abstraction over a trip provider (HTTP API, local file, generator).
///
/// Each call to [`TripSource::load`] yields a full replacement collection or
/// a failure. Partial loads are not supported.
#[async_trait::async_trait]
pub trait TripSource: Send + Sync {
    async fn load(&self) -> Result<LoadedTrips, LoadError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}
