pub mod trip_source;

pub use trip_source::TripSource;
