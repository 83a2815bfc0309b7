use serde::Serialize;

use crate::analyzers::utility::{mean, round_to};
use crate::trip::Trip;

/// Headline numbers for a trip collection.
///
/// Values keep full precision; use the `display_*` helpers for output.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TripStats {
    pub count: usize,
    pub avg_fare: f64,
    pub avg_distance: f64,
    pub total_revenue: f64,
}

impl TripStats {
    /// An empty collection gives all zeros.
    pub fn from_trips(trips: &[Trip]) -> Self {
        let fares: Vec<f64> = trips.iter().map(|t| t.fare).collect();
        let distances: Vec<f64> = trips.iter().map(|t| t.distance).collect();

        TripStats {
            count: trips.len(),
            avg_fare: mean(&fares),
            avg_distance: mean(&distances),
            total_revenue: trips.iter().map(|t| t.total).sum(),
        }
    }

    pub fn display_avg_fare(&self) -> f64 {
        round_to(self.avg_fare, 2)
    }

    pub fn display_avg_distance(&self) -> f64 {
        round_to(self.avg_distance, 2)
    }

    /// Total revenue rounded to whole dollars.
    pub fn display_total_revenue(&self) -> f64 {
        round_to(self.total_revenue, 0)
    }
}
