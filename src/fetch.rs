use crate::error::ResolveError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Retrieves raw page content for a candidate recipe URL.
///
/// The pipeline never retries a fetch; a timeout or HTTP error simply means
/// the webpage stage has no result.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ResolveError>;
}

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeResolver/1.0)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl PageFetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/recipe")
            .with_status(200)
            .with_body("<html>hi</html>")
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None);
        let body = fetcher
            .fetch(&format!("{}/recipe", server.url()))
            .await
            .unwrap();
        assert_eq!(body, "<html>hi</html>");
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None);
        let result = fetcher.fetch(&format!("{}/missing", server.url())).await;
        assert!(matches!(result, Err(ResolveError::Fetch(_))));
    }
}
