//! CLI entry point for the taxi analytics tool.
//!
//! Provides subcommands for summarizing a trip collection, previewing and
//! exporting the filtered trips, ranking them, and generating mock data.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use taxi_analytics::analyzers::filter::{DEFAULT_MAX_DISTANCE, DEFAULT_MAX_FARE, FilterCriteria};
use taxi_analytics::analyzers::ranking::{busiest_pickup_zones, top_earning_trips};
use taxi_analytics::config::Config;
use taxi_analytics::dashboard::{Command, Dashboard};
use taxi_analytics::infra::{DEFAULT_MOCK_COUNT, MockTripSource, source_from_arg};
use taxi_analytics::output::{
    render_dashboard, render_json, render_summary, render_trip_table, write_trips_csv,
    write_trips_json,
};
use taxi_analytics::parser::validate_records;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "taxi_analytics")]
#[command(about = "Filter and summarize taxi trip records", long_about = None)]
struct Cli {
    /// Trip source: `mock`, `api`, a URL, or a .json/.csv file
    #[arg(short, long, global = true, default_value = "mock")]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics and every chart summary for the filtered trips
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit the full view as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Number of preview rows (defaults to TAXI_PREVIEW_ROWS)
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Print the first filtered trips as a table
    Trips {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of rows (defaults to TAXI_PREVIEW_ROWS)
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// Write every filtered trip to a CSV file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// CSV file to write
        #[arg(short, long, default_value = "trips.csv")]
        output: String,

        /// Gzip compress the CSV (implied by a .gz extension)
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Show the top earning trips and the busiest pickup zones
    Top {
        #[command(flatten)]
        filter: FilterArgs,

        /// Number of entries per ranking
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a mock trip payload as JSON
    Mock {
        /// JSON file to write
        #[arg(short, long, default_value = "mock_trips.json")]
        output: String,

        /// Number of trips to generate
        #[arg(short, long, default_value_t = DEFAULT_MOCK_COUNT)]
        count: usize,

        /// Random seed (defaults to TAXI_MOCK_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Earliest pickup, RFC 3339 or YYYY-MM-DD (inclusive)
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// Latest pickup, RFC 3339 or YYYY-MM-DD (inclusive)
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// Borough name, or `all`
    #[arg(short, long, default_value = "all")]
    borough: String,

    /// Maximum trip distance in miles (inclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE)]
    max_distance: f64,

    /// Maximum fare in dollars (inclusive)
    #[arg(long, default_value_t = DEFAULT_MAX_FARE)]
    max_fare: f64,
}

impl FilterArgs {
    fn to_criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria::from_inputs(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            &self.borough,
            self.max_distance,
            self.max_fare,
        )?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let config = Config::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("taxi_analytics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { filter, json, rows } => {
            let dashboard = load_filtered(&cli.source, &config, &filter).await?;
            let view = dashboard.view(rows.unwrap_or(config.preview_rows));

            if json {
                println!("{}", render_json(&view)?);
            } else {
                print!("{}", render_dashboard(&view));
                println!();
                print!("{}", render_trip_table(&view.preview));
            }
        }
        Commands::Trips { filter, rows } => {
            let dashboard = load_filtered(&cli.source, &config, &filter).await?;
            let view = dashboard.view(rows.unwrap_or(config.preview_rows));

            print!("{}", render_trip_table(&view.preview));
            info!(
                shown = view.preview.len(),
                total = dashboard.filtered().len(),
                "Preview rendered"
            );
        }
        Commands::Export {
            filter,
            output,
            gzip,
        } => {
            let dashboard = load_filtered(&cli.source, &config, &filter).await?;
            let gzip = gzip || output.ends_with(".gz");

            write_trips_csv(&output, dashboard.filtered(), gzip)?;
        }
        Commands::Top { filter, limit } => {
            let dashboard = load_filtered(&cli.source, &config, &filter).await?;

            println!("Top earning trips");
            print!("{}", render_trip_table(&top_earning_trips(dashboard.filtered(), limit)));
            println!();
            print!(
                "{}",
                render_summary(
                    "Busiest pickup zones",
                    &busiest_pickup_zones(dashboard.filtered(), limit),
                    0
                )
            );
        }
        Commands::Mock {
            output,
            count,
            seed,
        } => {
            let source = MockTripSource::new(count, seed.unwrap_or(config.mock_seed));
            let loaded = validate_records(source.generate());

            write_trips_json(&output, &loaded.trips)?;
        }
    }

    Ok(())
}

/// Loads the trip store from `source` and applies the filter flags.
#[tracing::instrument(skip(config, filter))]
async fn load_filtered(source: &str, config: &Config, filter: &FilterArgs) -> Result<Dashboard> {
    let criteria = filter.to_criteria()?;

    let mut dashboard = Dashboard::new();
    dashboard.load(source_from_arg(source, config).as_ref()).await?;
    dashboard.dispatch(Command::ApplyFilters(criteria))?;

    Ok(dashboard)
}
