use crate::analyzers::types::{ChartSummaries, Summary};
use crate::trip::Trip;
use chrono::{Local, NaiveDate, TimeZone};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Half-open distance buckets `[lower, upper)` in miles, in display order.
pub const DISTANCE_BUCKETS: [(&str, f64, f64); 5] = [
    ("0-2 mi", 0.0, 2.0),
    ("2-5 mi", 2.0, 5.0),
    ("5-10 mi", 5.0, 10.0),
    ("10-20 mi", 10.0, 20.0),
    ("20+ mi", 20.0, f64::INFINITY),
];

pub const HOURS_PER_DAY: usize = 24;

impl ChartSummaries {
    /// Computes every chart summary over `trips`.
    pub fn from_trips(trips: &[Trip]) -> Self {
        ChartSummaries {
            daily_trips: daily_trip_counts(trips),
            revenue_by_borough: revenue_by_borough(trips),
            trips_by_borough: trips_by_borough(trips),
            avg_fare_by_hour: average_fare_by_hour(trips),
            distance_distribution: distance_distribution(trips),
            payment_methods: payment_method_counts(trips),
        }
    }
}

/// Trips per calendar day in the local time zone, oldest day first.
pub fn daily_trip_counts(trips: &[Trip]) -> Summary {
    daily_trip_counts_in(trips, &Local)
}

/// Trips per calendar day in `tz`, oldest day first. Labels are `YYYY-MM-DD`.
pub fn daily_trip_counts_in<Tz: TimeZone>(trips: &[Trip], tz: &Tz) -> Summary {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for trip in trips {
        let date = trip.pickup_time.with_timezone(tz).date_naive();
        *days.entry(date).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, count)| (date.format("%Y-%m-%d").to_string(), count as f64))
        .collect()
}

/// Sum of `total` per borough, boroughs in first-seen order.
///
/// Boroughs are grouped by their exact stored spelling.
pub fn revenue_by_borough(trips: &[Trip]) -> Summary {
    group_first_seen(trips, |t| &t.borough, |t| t.total)
}

/// Number of trips per borough, boroughs in first-seen order.
pub fn trips_by_borough(trips: &[Trip]) -> Summary {
    group_first_seen(trips, |t| &t.borough, |_| 1.0)
}

/// Mean fare for each hour 0-23. Hours without trips report 0.
pub fn average_fare_by_hour(trips: &[Trip]) -> Summary {
    let mut sums = [0.0f64; HOURS_PER_DAY];
    let mut counts = [0usize; HOURS_PER_DAY];

    for trip in trips {
        let hour = usize::from(trip.hour);
        if hour < HOURS_PER_DAY {
            sums[hour] += trip.fare;
            counts[hour] += 1;
        }
    }

    (0..HOURS_PER_DAY)
        .map(|hour| {
            let avg = if counts[hour] == 0 {
                0.0
            } else {
                sums[hour] / counts[hour] as f64
            };
            (format!("{hour}:00"), avg)
        })
        .collect()
}

/// Trip counts per [`DISTANCE_BUCKETS`] entry, always five entries.
pub fn distance_distribution(trips: &[Trip]) -> Summary {
    let mut counts = [0usize; DISTANCE_BUCKETS.len()];

    for trip in trips {
        if let Some(i) = distance_bucket(trip.distance) {
            counts[i] += 1;
        }
    }

    DISTANCE_BUCKETS
        .iter()
        .zip(counts)
        .map(|((label, _, _), count)| (*label, count as f64))
        .collect()
}

/// Index into [`DISTANCE_BUCKETS`] for `distance`.
pub fn distance_bucket(distance: f64) -> Option<usize> {
    DISTANCE_BUCKETS
        .iter()
        .position(|(_, lower, upper)| distance >= *lower && distance < *upper)
}

/// Number of trips per payment method, methods in first-seen order.
pub fn payment_method_counts(trips: &[Trip]) -> Summary {
    group_first_seen(trips, |t| &t.payment, |_| 1.0)
}

/// Sums `value` per `key`, keeping keys in the order they first appear.
pub(crate) fn group_first_seen<'a, K, V>(trips: &'a [Trip], key: K, value: V) -> Summary
where
    K: Fn(&'a Trip) -> &'a String,
    V: Fn(&Trip) -> f64,
{
    let mut groups: IndexMap<&str, f64> = IndexMap::new();

    for trip in trips {
        *groups.entry(key(trip).as_str()).or_insert(0.0) += value(trip);
    }

    groups.into_iter().collect()
}
