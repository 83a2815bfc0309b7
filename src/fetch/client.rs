use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam between the trip loader and the HTTP transport.
///
/// `fetch_bytes` builds the request and checks the status; implementors only
/// send it. Tests substitute a canned [`Response`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends `req` and returns whatever the server answered, any status.
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
