//! Application state for the dashboard.
//!
//! [`Dashboard`] owns the loaded trip collection, the active filter criteria
//! and the current filtered subset. Every user action is a [`Command`]; each
//! one replaces the filtered subset wholesale, so observers never see a
//! partial update.

use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::filter::{FilterCriteria, filter_trips};
use crate::analyzers::types::ChartSummaries;
use crate::error::{CriteriaError, LoadError};
use crate::parser::LoadedTrips;
use crate::services::TripSource;
use crate::stats::TripStats;
use crate::trip::Trip;

/// A user action that moves the dashboard to a new state.
#[derive(Debug, Clone)]
pub enum Command {
    /// Replace the trip store and clear any active filters.
    LoadData(LoadedTrips),
    ApplyFilters(FilterCriteria),
    ResetFilters,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    trips: Vec<Trip>,
    criteria: FilterCriteria,
    filtered: Vec<Trip>,
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    pub stats: TripStats,
    pub charts: ChartSummaries,
    /// The first rows of the filtered set, in filtered order.
    pub preview: Vec<Trip>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads from `source` and dispatches [`Command::LoadData`].
    ///
    /// On failure the current state is left untouched.
    pub async fn load(&mut self, source: &dyn TripSource) -> Result<usize, LoadError> {
        info!(source = %source.describe(), "Loading trips");
        let loaded = source.load().await?;
        self.replace_store(loaded);
        Ok(self.trips.len())
    }

    /// Applies `command` and returns the new filtered subset.
    ///
    /// # Errors
    ///
    /// [`Command::ApplyFilters`] with invalid criteria is rejected and leaves
    /// the state unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<&[Trip], CriteriaError> {
        match command {
            Command::LoadData(loaded) => self.replace_store(loaded),
            Command::ApplyFilters(criteria) => {
                criteria.validate()?;
                self.filtered = filter_trips(&self.trips, &criteria);
                self.criteria = criteria;
                info!("Filters applied: {} trips found", self.filtered.len());
            }
            Command::ResetFilters => {
                self.criteria = FilterCriteria::default();
                self.filtered = self.trips.clone();
                info!("Filters reset");
            }
        }

        Ok(&self.filtered)
    }

    fn replace_store(&mut self, loaded: LoadedTrips) {
        if !loaded.rejected.is_empty() {
            warn!(rejected = loaded.rejected.len(), "Some trip records were quarantined");
        }
        self.trips = loaded.trips;
        self.criteria = FilterCriteria::default();
        self.filtered = self.trips.clone();
        info!(trips = self.trips.len(), "Data loaded");
    }

    /// The full, unfiltered trip store.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn filtered(&self) -> &[Trip] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Statistics, charts and the first `preview_rows` filtered trips.
    pub fn view(&self, preview_rows: usize) -> DashboardView {
        DashboardView {
            criteria: self.criteria.clone(),
            stats: TripStats::from_trips(&self.filtered),
            charts: ChartSummaries::from_trips(&self.filtered),
            preview: self.filtered.iter().take(preview_rows).cloned().collect(),
        }
    }
}
