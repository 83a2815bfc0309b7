//! Taxi trip analytics: load trip records, filter them, and reduce them to
//! chart-ready summaries.

pub mod analyzers;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod parser;
pub mod services;
pub mod stats;
pub mod trip;
