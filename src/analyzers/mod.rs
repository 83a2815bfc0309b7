//! Filtering and aggregation over trip collections.
//!
//! Everything here is a pure function of its input: filters narrow a trip
//! slice, aggregations reduce one into label/value [`types::Summary`] pairs
//! for charting, and rankings pick out top-N entries.

pub mod aggregate;
pub mod filter;
pub mod ranking;
pub mod types;
pub mod utility;
