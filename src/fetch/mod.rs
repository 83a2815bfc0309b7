mod basic;
mod client;

pub use basic::{BasicClient, DEFAULT_TIMEOUT};
pub use client::HttpClient;

use reqwest::header::{ACCEPT, HeaderValue};
use tracing::debug;

use crate::error::LoadError;

/// Performs a GET against `url` and returns the body of a successful response.
///
/// # Errors
///
/// A non-2xx status becomes [`LoadError::Status`] carrying the response body.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, LoadError> {
    let mut req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().map_err(|e| LoadError::Url(format!("{url}: {e}")))?,
    );
    req.headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));

    let resp = client.execute(req).await?;
    let status = resp.status();
    debug!(%status, "Trip source responded");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(LoadError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(resp.bytes().await?.to_vec())
}
