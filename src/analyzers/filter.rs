//! Trip filtering by date range, borough, distance and fare.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::CriteriaError;
use crate::trip::Trip;

/// Upper end of the distance control, in miles.
pub const DEFAULT_MAX_DISTANCE: f64 = 50.0;

/// Upper end of the fare control, in dollars.
pub const DEFAULT_MAX_FARE: f64 = 200.0;

/// Borough value meaning "no borough constraint".
pub const ALL_BOROUGHS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BoroughFilter {
    All,
    Named(String),
}

impl BoroughFilter {
    /// `"all"` (any case) and blank input select every borough.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case(ALL_BOROUGHS) {
            BoroughFilter::All
        } else {
            BoroughFilter::Named(input.to_string())
        }
    }

    /// Compares ignoring case; the stored borough is never rewritten.
    pub fn matches(&self, borough: &str) -> bool {
        match self {
            BoroughFilter::All => true,
            BoroughFilter::Named(name) => name.to_lowercase() == borough.to_lowercase(),
        }
    }
}

/// The constraints of one filter action.
///
/// Every bound is inclusive. [`Default`] gives the dashboard's reset state:
/// no dates, every borough, 50 miles and $200.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub borough: BoroughFilter,
    pub max_distance: f64,
    pub max_fare: f64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            borough: BoroughFilter::All,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_fare: DEFAULT_MAX_FARE,
        }
    }
}

impl FilterCriteria {
    /// Criteria that accept every trip.
    pub fn unbounded() -> Self {
        Self {
            max_distance: f64::INFINITY,
            max_fare: f64::INFINITY,
            ..Self::default()
        }
    }

    /// Builds criteria from raw user input, rejecting what cannot be parsed.
    pub fn from_inputs(
        start_date: Option<&str>,
        end_date: Option<&str>,
        borough: &str,
        max_distance: f64,
        max_fare: f64,
    ) -> Result<Self, CriteriaError> {
        let criteria = Self {
            start_date: start_date.map(parse_date_bound).transpose()?,
            end_date: end_date.map(parse_date_bound).transpose()?,
            borough: BoroughFilter::parse(borough),
            max_distance,
            max_fare,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        check_bound("max_distance", self.max_distance)?;
        check_bound("max_fare", self.max_fare)
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        if self.start_date.is_some_and(|start| trip.pickup_time < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| trip.pickup_time > end) {
            return false;
        }
        self.borough.matches(&trip.borough)
            && trip.distance <= self.max_distance
            && trip.fare <= self.max_fare
    }
}

fn check_bound(field: &'static str, value: f64) -> Result<(), CriteriaError> {
    if value.is_nan() || value < 0.0 {
        Err(CriteriaError::InvalidBound { field, value })
    } else {
        Ok(())
    }
}

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as
/// midnight UTC.
pub fn parse_date_bound(input: &str) -> Result<DateTime<Utc>, CriteriaError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CriteriaError::InvalidDate(input.to_string()))
}

/// Returns the trips matching `criteria`, in input order.
pub fn filter_trips(trips: &[Trip], criteria: &FilterCriteria) -> Vec<Trip> {
    trips
        .iter()
        .filter(|trip| criteria.matches(trip))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(filter_trips(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_unbounded_returns_everything_in_order() {
        let trips = vec![
            trip("a", 1, "Queens", 60.0, 300.0),
            trip("b", 2, "Bronx", 1.0, 5.0),
            trip("c", 3, "Manhattan", 0.0, 0.0),
        ];

        assert_eq!(filter_trips(&trips, &FilterCriteria::unbounded()), trips);
    }

    #[test]
    fn test_max_fare_keeps_order() {
        let trips = vec![
            trip("a", 1, "Queens", 1.0, 10.0),
            trip("b", 1, "Queens", 1.0, 20.0),
            trip("c", 1, "Queens", 1.0, 5.0),
        ];
        let criteria = FilterCriteria {
            max_fare: 15.0,
            ..FilterCriteria::unbounded()
        };

        let fares: Vec<f64> = filter_trips(&trips, &criteria)
            .iter()
            .map(|t| t.fare)
            .collect();
        assert_eq!(fares, vec![10.0, 5.0]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let trips = vec![trip("a", 1, "Queens", 50.0, 200.0)];

        assert_eq!(filter_trips(&trips, &FilterCriteria::default()).len(), 1);
    }

    #[test]
    fn test_max_distance_excludes_longer_trips() {
        let trips = vec![
            trip("a", 1, "Queens", 2.0, 10.0),
            trip("b", 1, "Queens", 12.0, 10.0),
        ];
        let criteria = FilterCriteria {
            max_distance: 10.0,
            ..FilterCriteria::default()
        };

        let kept = filter_trips(&trips, &criteria);
        assert_eq!(kept.len(), 1);
        assert!(kept.iter().all(|t| t.distance <= criteria.max_distance));
    }

    #[test]
    fn test_borough_is_case_insensitive() {
        let trips = vec![
            trip("a", 1, "Manhattan", 1.0, 10.0),
            trip("b", 1, "Brooklyn", 1.0, 10.0),
            trip("c", 1, "MANHATTAN", 1.0, 10.0),
        ];
        let criteria = FilterCriteria {
            borough: BoroughFilter::parse("manhattan"),
            ..FilterCriteria::default()
        };

        let ids: Vec<String> = filter_trips(&trips, &criteria)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_all_sentinel_any_case() {
        assert_eq!(BoroughFilter::parse("ALL"), BoroughFilter::All);
        assert_eq!(BoroughFilter::parse(""), BoroughFilter::All);
        assert_eq!(
            BoroughFilter::parse("Queens"),
            BoroughFilter::Named("Queens".to_string())
        );
    }

    #[test]
    fn test_date_range_inclusive() {
        let trips = vec![
            trip("a", 1, "Queens", 1.0, 10.0),
            trip("b", 2, "Queens", 1.0, 10.0),
            trip("c", 3, "Queens", 1.0, 10.0),
            trip("d", 4, "Queens", 1.0, 10.0),
        ];
        let criteria = FilterCriteria {
            start_date: Some(day(2)),
            end_date: Some(day(3)),
            ..FilterCriteria::default()
        };

        let ids: Vec<String> = filter_trips(&trips, &criteria)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let trips = vec![
            trip("a", 1, "Manhattan", 3.0, 10.0),
            trip("b", 2, "Brooklyn", 30.0, 90.0),
            trip("c", 5, "Manhattan", 1.0, 150.0),
        ];
        let criteria = FilterCriteria {
            start_date: Some(day(2)),
            borough: BoroughFilter::parse("manhattan"),
            max_distance: 20.0,
            ..FilterCriteria::default()
        };

        let once = filter_trips(&trips, &criteria);
        let twice = filter_trips(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_date_bound_formats() {
        assert_eq!(parse_date_bound("2024-03-02").unwrap(), day(2));
        assert_eq!(parse_date_bound("2024-03-02T00:00:00+00:00").unwrap(), day(2));
        assert_eq!(
            parse_date_bound("03/02/2024"),
            Err(CriteriaError::InvalidDate("03/02/2024".to_string()))
        );
    }

    #[test]
    fn test_from_inputs_rejects_bad_bounds() {
        let err = FilterCriteria::from_inputs(None, None, "all", f64::NAN, 10.0).unwrap_err();
        assert!(matches!(
            err,
            CriteriaError::InvalidBound {
                field: "max_distance",
                ..
            }
        ));

        let err = FilterCriteria::from_inputs(None, None, "all", 10.0, -1.0).unwrap_err();
        assert!(matches!(err, CriteriaError::InvalidBound { field: "max_fare", .. }));
    }

    #[test]
    fn test_from_inputs() {
        let criteria =
            FilterCriteria::from_inputs(Some("2024-03-02"), None, "Bronx", 10.0, 20.0).unwrap();

        assert_eq!(criteria.start_date, Some(day(2)));
        assert_eq!(criteria.end_date, None);
        assert_eq!(criteria.borough, BoroughFilter::Named("Bronx".to_string()));
    }

    // Helper functions for tests
    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn trip(id: &str, d: u32, borough: &str, distance: f64, fare: f64) -> Trip {
        Trip {
            id: id.to_string(),
            pickup_time: day(d),
            pickup_location: "Times Square".to_string(),
            dropoff_location: "Central Park".to_string(),
            borough: borough.to_string(),
            distance,
            fare,
            tip: 0.0,
            total: fare,
            payment: "Cash".to_string(),
            hour: 0,
        }
    }
}
