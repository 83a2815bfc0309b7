use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/taxi_analytics.log";
pub const DEFAULT_MOCK_SEED: u64 = 42;

/// Runtime settings read from the environment (and `.env`, once loaded).
///
/// | Variable            | Default                     |
/// |---------------------|-----------------------------|
/// | `TAXI_API_URL`      | `http://localhost:5000/api` |
/// | `TAXI_PREVIEW_ROWS` | `10`                        |
/// | `TAXI_MOCK_SEED`    | `42`                        |
/// | `LOG_FILE_PATH`     | `logs/taxi_analytics.log`   |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub preview_rows: usize,
    pub mock_seed: u64,
    pub log_file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            mock_seed: DEFAULT_MOCK_SEED,
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable numbers fall back to
    /// their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            api_url: lookup("TAXI_API_URL").unwrap_or(defaults.api_url),
            preview_rows: parse_or("TAXI_PREVIEW_ROWS", &lookup, defaults.preview_rows),
            mock_seed: parse_or("TAXI_MOCK_SEED", &lookup, defaults.mock_seed),
            log_file_path: lookup("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        }
    }

    /// Full URL of the trip listing endpoint.
    ///
    /// The endpoint must serve the camelCase trip shape (`pickupTime`,
    /// `pickupLocation`, `fare`, ...). Raw TLC rows with columns such as
    /// `tpep_pickup_datetime` or `PU_Borough` fail validation record by record.
    pub fn trips_endpoint(&self) -> String {
        format!("{}/trips/sample", self.api_url.trim_end_matches('/'))
    }
}

fn parse_or<T: std::str::FromStr + Copy>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            default
        }),
    }
}
