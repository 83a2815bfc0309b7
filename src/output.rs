//! Output formatting and persistence for dashboard data.
//!
//! Supports text rendering, JSON serialization, and CSV export. This is the
//! only place values are rounded for display.

use anyhow::Result;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::Summary;
use crate::analyzers::utility::round_to;
use crate::dashboard::DashboardView;
use crate::stats::TripStats;
use crate::trip::Trip;

/// Serializes a dashboard view as pretty-printed JSON.
pub fn render_json(view: &DashboardView) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

/// Formats the headline statistics the way the dashboard cards show them.
pub fn render_stats(stats: &TripStats) -> String {
    format!(
        "Total trips:   {}\nAvg fare:      ${:.2}\nAvg distance:  {:.2} mi\nTotal revenue: ${}\n",
        group_thousands(stats.count as i64),
        stats.display_avg_fare(),
        stats.display_avg_distance(),
        group_thousands(stats.display_total_revenue() as i64),
    )
}

/// Formats one summary as an aligned two-column table.
pub fn render_summary(title: &str, summary: &Summary, places: u32) -> String {
    let width = summary.labels.iter().map(String::len).max().unwrap_or(0);
    let mut out = format!("{title}\n");

    if summary.is_empty() {
        out.push_str("  (no trips)\n");
        return out;
    }

    for (label, value) in summary.iter() {
        let _ = writeln!(
            out,
            "  {label:<width$}  {:.prec$}",
            round_to(value, places),
            prec = places as usize
        );
    }
    out
}

/// Renders every chart of `view` plus the stats block.
pub fn render_dashboard(view: &DashboardView) -> String {
    let charts = &view.charts;
    let mut out = render_stats(&view.stats);

    for section in [
        render_summary("Daily trips", &charts.daily_trips, 0),
        render_summary("Revenue by borough ($)", &charts.revenue_by_borough, 0),
        render_summary("Trip share by borough (%)", &charts.trips_by_borough.shares(), 1),
        render_summary("Average fare by hour ($)", &charts.avg_fare_by_hour, 2),
        render_summary("Distance distribution", &charts.distance_distribution, 0),
        render_summary("Payment methods", &charts.payment_methods, 0),
    ] {
        out.push('\n');
        out.push_str(&section);
    }
    out
}

/// Formats trips as the preview table: one row per trip.
pub fn render_trip_table(trips: &[Trip]) -> String {
    let mut out = format!(
        "{:<12} {:<20} {:<16} {:<16} {:>9} {:>9} {:>8} {:>9}  {}\n",
        "ID", "Pickup", "From", "To", "Distance", "Fare", "Tip", "Total", "Payment"
    );

    for trip in trips {
        let _ = writeln!(
            out,
            "{:<12} {:<20} {:<16} {:<16} {:>6.2} mi {:>9} {:>8} {:>9}  {}",
            trip.id,
            trip.pickup_time.format("%Y-%m-%d %H:%M:%S"),
            trip.pickup_location,
            trip.dropoff_location,
            trip.distance,
            format!("${:.2}", trip.fare),
            format!("${:.2}", trip.tip),
            format!("${:.2}", trip.total),
            trip.payment,
        );
    }
    out
}

/// Writes trips as CSV with a header row, gzip-compressed when `gzip` is set.
///
/// Returns the number of rows written.
pub fn write_trips_csv(path: &str, trips: &[Trip], gzip: bool) -> Result<usize> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    debug!(path, gzip, rows = trips.len(), "Writing trips CSV");

    if gzip {
        let encoder = GzEncoder::new(file, Compression::default());
        let encoder = write_csv_rows(encoder, trips)?;
        encoder.finish()?;
    } else {
        write_csv_rows(file, trips)?;
    }

    info!(path, rows = trips.len(), "Trips exported");
    Ok(trips.len())
}

fn write_csv_rows<W: Write>(inner: W, trips: &[Trip]) -> Result<W> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(inner);
    for trip in trips {
        writer.serialize(trip)?;
    }
    writer.flush()?;
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Writes trips as a pretty-printed JSON array in the API's shape.
pub fn write_trips_json(path: &str, trips: &[Trip]) -> Result<usize> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, trips)?;

    info!(path, rows = trips.len(), "Trips written");
    Ok(trips.len())
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Command, Dashboard};
    use crate::parser::{LoadedTrips, parse_trips_csv};
    use chrono::{TimeZone, Utc};
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_render_json_contains_charts() {
        let json = render_json(&view()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["count"], 2);
        assert_eq!(value["charts"]["revenue_by_borough"]["labels"][0], "Manhattan");
        assert_eq!(value["preview"][0]["pickupLocation"], "Times Square");
    }

    #[test]
    fn test_render_stats() {
        let stats = TripStats {
            count: 1234,
            avg_fare: 12.345,
            avg_distance: 3.0,
            total_revenue: 15_234.5,
        };

        let text = render_stats(&stats);

        assert!(text.contains("Total trips:   1,234"));
        assert!(text.contains("Avg distance:  3.00 mi"));
        assert!(text.contains("Total revenue: $15,235"));
    }

    #[test]
    fn test_render_summary_empty() {
        let text = render_summary("Payment methods", &Summary::default(), 0);
        assert!(text.contains("(no trips)"));
    }

    #[test]
    fn test_render_dashboard_has_every_section() {
        let text = render_dashboard(&view());

        for title in [
            "Daily trips",
            "Revenue by borough",
            "Trip share by borough",
            "Average fare by hour",
            "Distance distribution",
            "Payment methods",
        ] {
            assert!(text.contains(title), "missing section {title}");
        }
    }

    #[test]
    fn test_render_trip_table_rows() {
        let text = render_trip_table(&view().preview);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("$11.00"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn test_write_trips_csv_reads_back() {
        let path = temp_path("taxi_analytics_test_export.csv");
        let _ = fs::remove_file(&path);
        let trips = view().preview;

        let rows = write_trips_csv(&path, &trips, false).unwrap();
        assert_eq!(rows, 2);

        let loaded = parse_trips_csv(File::open(&path).unwrap()).unwrap();
        assert_eq!(loaded.trips, trips);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_trips_csv_gzip() {
        let path = temp_path("taxi_analytics_test_export.csv.gz");
        let _ = fs::remove_file(&path);

        write_trips_csv(&path, &view().preview, true).unwrap();

        let mut content = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut content)
            .unwrap();
        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("id,pickupTime"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_trips_json() {
        let path = temp_path("taxi_analytics_test_export.json");
        let _ = fs::remove_file(&path);

        write_trips_json(&path, &view().preview).unwrap();

        let loaded = crate::parser::parse_trips(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(loaded.trips.len(), 2);

        fs::remove_file(&path).unwrap();
    }

    // Helper functions for tests
    fn view() -> DashboardView {
        let mut dashboard = Dashboard::new();
        dashboard
            .dispatch(Command::LoadData(LoadedTrips {
                trips: vec![
                    trip("NYC-001000", "Manhattan", 10.0),
                    trip("NYC-001001", "Queens", 22.5),
                ],
                rejected: vec![],
            }))
            .unwrap();
        dashboard.view(10)
    }

    fn trip(id: &str, borough: &str, fare: f64) -> Trip {
        Trip {
            id: id.to_string(),
            pickup_time: Utc.with_ymd_and_hms(2024, 3, 4, 9, 15, 0).unwrap(),
            pickup_location: "Times Square".to_string(),
            dropoff_location: "Central Park".to_string(),
            borough: borough.to_string(),
            distance: 2.25,
            fare,
            tip: 1.0,
            total: fare + 1.0,
            payment: "Credit Card".to_string(),
            hour: 9,
        }
    }
}
