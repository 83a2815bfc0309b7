use async_trait::async_trait;
use tracing::{error, info};

use crate::error::LoadError;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::{LoadedTrips, parse_trips};
use crate::services::TripSource;

/// Loads trips from the dashboard API's JSON endpoint.
pub struct HttpTripSource<C = BasicClient> {
    client: C,
    url: String,
}

impl HttpTripSource<BasicClient> {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(BasicClient::new(), url)
    }
}

impl<C: HttpClient> HttpTripSource<C> {
    pub fn with_client(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> TripSource for HttpTripSource<C> {
    async fn load(&self) -> Result<LoadedTrips, LoadError> {
        info!(url = %self.url, "Fetching trips");
        let bytes = fetch_bytes(&self.client, &self.url).await.inspect_err(|e| {
            error!(url = %self.url, error = %e, "Trip fetch failed");
        })?;

        let loaded = parse_trips(&bytes)?;
        if loaded.trips.is_empty() && !loaded.rejected.is_empty() {
            error!(
                url = %self.url,
                rejected = loaded.rejected.len(),
                "No record matched the trip schema"
            );
        }
        info!(
            url = %self.url,
            accepted = loaded.trips.len(),
            rejected = loaded.rejected.len(),
            "Trips loaded"
        );
        Ok(loaded)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubClient {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpClient for StubClient {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            let resp = http::Response::builder()
                .status(self.status)
                .body(self.body)
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    #[tokio::test]
    async fn test_load_success() {
        let source = HttpTripSource::with_client(
            StubClient {
                status: 200,
                body: r#"[{"id": "NYC-001000", "pickupTime": "2024-03-04T18:30:00Z",
                    "pickupLocation": "Central Park", "dropoffLocation": "Times Square",
                    "borough": "Manhattan", "distance": 1.2, "fare": 9.2, "tip": 1.38,
                    "total": "10.58", "payment": "Cash", "hour": 2}]"#,
            },
            "http://localhost:5000/api/trips/sample",
        );

        let loaded = source.load().await.unwrap();

        assert_eq!(loaded.trips.len(), 1);
        assert_eq!(loaded.trips[0].total, 10.58);
    }

    #[tokio::test]
    async fn test_load_foreign_schema_quarantines_everything() {
        let source = HttpTripSource::with_client(
            StubClient {
                status: 200,
                body: r#"[{"tpep_pickup_datetime": "2024-03-04 18:30:00",
                    "PU_Borough": "Manhattan", "total_amount": 10.58}]"#,
            },
            "http://localhost:5000/api/trips/sample",
        );

        let loaded = source.load().await.unwrap();

        assert!(loaded.trips.is_empty());
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].id, "<unknown>");
    }

    #[tokio::test]
    async fn test_load_non_success_status() {
        let source = HttpTripSource::with_client(
            StubClient {
                status: 503,
                body: "maintenance",
            },
            "http://localhost:5000/api/trips/sample",
        );

        let err = source.load().await.unwrap_err();

        match err {
            LoadError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_load_malformed_payload() {
        let source = HttpTripSource::with_client(
            StubClient {
                status: 200,
                body: "<html>not json</html>",
            },
            "http://localhost:5000/api/trips/sample",
        );

        assert!(matches!(source.load().await, Err(LoadError::Payload(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_url() {
        let source = HttpTripSource::with_client(
            StubClient {
                status: 200,
                body: "[]",
            },
            "not a url",
        );

        assert!(matches!(source.load().await, Err(LoadError::Url(_))));
    }
}
