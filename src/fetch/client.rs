use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam for issuing HTTP requests, so auth wrappers can decorate the
/// request before it goes out.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
