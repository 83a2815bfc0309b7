//! Top-N rankings over a trip collection.

use crate::analyzers::aggregate::group_first_seen;
use crate::analyzers::types::Summary;
use crate::trip::Trip;

/// The `n` trips with the highest `total`, highest first.
///
/// Equal totals keep their input order.
pub fn top_earning_trips(trips: &[Trip], n: usize) -> Vec<Trip> {
    let mut ranked: Vec<&Trip> = trips.iter().collect();
    ranked.sort_by(|a, b| b.total.total_cmp(&a.total));
    ranked.into_iter().take(n).cloned().collect()
}

/// Pickup locations by trip count, busiest first, at most `n` entries.
///
/// Equal counts keep first-seen order.
pub fn busiest_pickup_zones(trips: &[Trip], n: usize) -> Summary {
    let counts = group_first_seen(trips, |t| &t.pickup_location, |_| 1.0);

    let mut ranked: Vec<(&str, f64)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).collect()
}
