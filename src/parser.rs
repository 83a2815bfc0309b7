//! Payload parsing and validation at the load boundary.
//!
//! Malformed payloads fail the whole load. Individual records that do not
//! validate are quarantined and logged, never handed to the engines.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{LoadError, TripError};
use crate::trip::{Trip, TripRecord};

/// A record that was dropped at the load boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: String,
}

/// Result of one successful load: accepted trips plus quarantined records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTrips {
    pub trips: Vec<Trip>,
    pub rejected: Vec<RejectedRecord>,
}

/// Collects validation results, rejecting any id already accepted.
#[derive(Default)]
struct Quarantine {
    loaded: LoadedTrips,
    seen: HashSet<String>,
}

impl Quarantine {
    fn accept(&mut self, id: String, result: Result<Trip, TripError>) {
        let result = result.and_then(|trip| {
            if self.seen.insert(trip.id.clone()) {
                Ok(trip)
            } else {
                Err(TripError::DuplicateId(trip.id))
            }
        });

        match result {
            Ok(trip) => self.loaded.trips.push(trip),
            Err(e) => {
                warn!(trip_id = %id, reason = %e, "Quarantined trip record");
                self.loaded.rejected.push(RejectedRecord {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn finish(self) -> LoadedTrips {
        self.loaded
    }
}

/// Validates already-decoded records.
pub fn validate_records(records: impl IntoIterator<Item = TripRecord>) -> LoadedTrips {
    let mut quarantine = Quarantine::default();
    for record in records {
        let id = record.id.clone();
        quarantine.accept(id, Trip::try_from(record));
    }
    quarantine.finish()
}

/// Decodes a JSON array of trip objects.
///
/// # Errors
///
/// Returns [`LoadError::Payload`] if the bytes are not a JSON array of
/// objects. Objects that do not match the trip schema are quarantined.
pub fn parse_trips(bytes: &[u8]) -> Result<LoadedTrips, LoadError> {
    let objects: Vec<Map<String, Value>> = serde_json::from_slice(bytes)?;
    debug!(records = objects.len(), "Trip payload decoded");

    let mut quarantine = Quarantine::default();
    for object in objects {
        let id = object
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();

        let result = serde_json::from_value::<TripRecord>(Value::Object(object))
            .map_err(|e| TripError::Schema(e.to_string()))
            .and_then(Trip::try_from);
        quarantine.accept(id, result);
    }

    Ok(quarantine.finish())
}

/// Decodes CSV trip rows with a header line.
///
/// Rows that fail to deserialize are quarantined; I/O and encoding errors
/// fail the load.
pub fn parse_trips_csv<R: Read>(reader: R) -> Result<LoadedTrips, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut quarantine = Quarantine::default();

    for (row, result) in rdr.deserialize::<TripRecord>().enumerate() {
        match result {
            Ok(record) => {
                let id = record.id.clone();
                quarantine.accept(id, Trip::try_from(record));
            }
            Err(e) if matches!(e.kind(), csv::ErrorKind::Deserialize { .. }) => {
                let reason = TripError::Schema(e.to_string());
                quarantine.accept(format!("<row {}>", row + 1), Err(reason));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(quarantine.finish())
}
