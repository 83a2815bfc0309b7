//! Data types shared by the aggregation engine and its consumers.

use serde::Serialize;

use crate::analyzers::utility::{pct, round_to};

/// An ordered label/value pairing, ready for a chart.
///
/// `labels[i]` names `values[i]`; both vectors always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Summary {
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Value for `label`, matched exactly.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Copy with every value rounded for display.
    pub fn rounded(&self, places: u32) -> Summary {
        Summary {
            labels: self.labels.clone(),
            values: self.values.iter().map(|v| round_to(*v, places)).collect(),
        }
    }

    /// Copy with every value expressed as a percentage of the total.
    pub fn shares(&self) -> Summary {
        let total = self.total();
        Summary {
            labels: self.labels.clone(),
            values: self.values.iter().map(|v| pct(*v, total)).collect(),
        }
    }
}

impl<L: Into<String>> FromIterator<(L, f64)> for Summary {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        let mut summary = Summary::default();
        for (label, value) in iter {
            summary.push(label, value);
        }
        summary
    }
}

/// The six chart summaries computed over one trip collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSummaries {
    pub daily_trips: Summary,
    pub revenue_by_borough: Summary,
    pub trips_by_borough: Summary,
    pub avg_fare_by_hour: Summary,
    pub distance_distribution: Summary,
    pub payment_methods: Summary,
}
