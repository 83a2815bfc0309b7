use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::analyzers::utility::round_to;
use crate::error::LoadError;
use crate::parser::{LoadedTrips, validate_records};
use crate::services::TripSource;
use crate::trip::{BOROUGHS, PAYMENT_METHODS, TripRecord};

pub const MOCK_LOCATIONS: [&str; 7] = [
    "Times Square",
    "Central Park",
    "JFK Airport",
    "Brooklyn Bridge",
    "Flushing",
    "Port Richmond",
    "Yankee Stadium",
];

pub const DEFAULT_MOCK_COUNT: usize = 100;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Generates plausible trips for demos and tests.
///
/// Output is fully determined by `count`, `seed` and `now`. The `hour`
/// field is drawn independently of the pickup time.
pub struct MockTripSource {
    count: usize,
    seed: u64,
    now: DateTime<Utc>,
}

impl MockTripSource {
    pub fn new(count: usize, seed: u64) -> Self {
        Self::at(count, seed, Utc::now())
    }

    /// Pickups land in the seven days before `now`.
    pub fn at(count: usize, seed: u64, now: DateTime<Utc>) -> Self {
        Self { count, seed, now }
    }

    pub fn generate(&self) -> Vec<TripRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        (0..self.count)
            .map(|i| {
                let distance = round_to(rng.gen_range(0.0..45.0) + 0.5, 2);
                let fare = round_to(distance * 3.5 + rng.gen_range(0.0..10.0) + 5.0, 2);
                let tip = round_to(fare * 0.15 + rng.gen_range(0.0..5.0), 2);
                let pickup = self.now - Duration::milliseconds(rng.gen_range(0..WEEK_MS));

                TripRecord {
                    id: format!("NYC-{:06}", i + 1000),
                    pickup_time: pickup.to_rfc3339_opts(SecondsFormat::Millis, true),
                    pickup_location: pick(&mut rng, &MOCK_LOCATIONS),
                    dropoff_location: pick(&mut rng, &MOCK_LOCATIONS),
                    borough: pick(&mut rng, &BOROUGHS),
                    distance,
                    fare,
                    tip,
                    payment: pick(&mut rng, &PAYMENT_METHODS),
                    hour: Some(rng.gen_range(0..24)),
                }
            })
            .collect()
    }
}

fn pick(rng: &mut StdRng, choices: &[&str]) -> String {
    choices[rng.gen_range(0..choices.len())].to_string()
}

#[async_trait]
impl TripSource for MockTripSource {
    async fn load(&self) -> Result<LoadedTrips, LoadError> {
        let loaded = validate_records(self.generate());
        info!(accepted = loaded.trips.len(), seed = self.seed, "Mock trips generated");
        Ok(loaded)
    }

    fn describe(&self) -> String {
        format!("mock (count={}, seed={})", self.count, self.seed)
    }
}
