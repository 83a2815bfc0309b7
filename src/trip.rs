//! Taxi trip records.
//!
//! [`TripRecord`] is the untrusted shape that arrives from a trip source.
//! [`Trip`] is the validated value the filter and aggregation engines work on.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzers::utility::round_to;
use crate::error::TripError;

pub const BOROUGHS: [&str; 5] = ["Manhattan", "Brooklyn", "Queens", "Bronx", "Staten Island"];

pub const PAYMENT_METHODS: [&str; 3] = ["Credit Card", "Cash", "Mobile"];

/// A trip as delivered by a source, before validation.
///
/// Field names follow the dashboard API (camelCase); snake_case column
/// headers are accepted for CSV files. Any `total` on the wire is ignored
/// and recomputed from `fare + tip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    #[serde(alias = "pickup_time")]
    pub pickup_time: String,
    #[serde(alias = "pickup_location")]
    pub pickup_location: String,
    #[serde(alias = "dropoff_location")]
    pub dropoff_location: String,
    pub borough: String,
    pub distance: f64,
    pub fare: f64,
    pub tip: f64,
    pub payment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
}

/// A validated taxi trip.
///
/// `total` always equals `fare + tip` rounded to cents. `hour` is kept as
/// supplied by the source and is not required to match `pickup_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub pickup_time: DateTime<Utc>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub borough: String,
    pub distance: f64,
    pub fare: f64,
    pub tip: f64,
    pub total: f64,
    pub payment: String,
    pub hour: u8,
}

impl TryFrom<TripRecord> for Trip {
    type Error = TripError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(TripError::EmptyId);
        }

        let pickup_time = DateTime::parse_from_rfc3339(&record.pickup_time)
            .map_err(|_| TripError::InvalidPickupTime(record.pickup_time.clone()))?
            .with_timezone(&Utc);

        let distance = non_negative("distance", record.distance)?;
        let fare = non_negative("fare", record.fare)?;
        let tip = non_negative("tip", record.tip)?;

        // Sources that omit the hour get the UTC hour of the pickup.
        let hour = match record.hour {
            Some(h) if (0..=23).contains(&h) => h as u8,
            Some(h) => return Err(TripError::HourOutOfRange(h)),
            None => pickup_time.hour() as u8,
        };

        Ok(Trip {
            id: record.id,
            pickup_time,
            pickup_location: record.pickup_location,
            dropoff_location: record.dropoff_location,
            borough: record.borough,
            distance,
            fare,
            tip,
            total: round_to(fare + tip, 2),
            payment: record.payment,
            hour,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, TripError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TripError::InvalidAmount { field, value })
    }
}
