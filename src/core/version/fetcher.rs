// ─── Remote Version Fetcher ───
// Retrieves the list of mod-compatible game versions from the mods API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::list::VersionList;
use crate::core::error::FetchError;

pub const DEFAULT_VERSION_URL: &str = "https://beatmods.com/api/v1/version";

/// Transport seam: "fetch text from URL".
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain HTTP GET through a shared `reqwest` client.
pub struct HttpVersionSource {
    client: Client,
}

impl HttpVersionSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VersionSource for HttpVersionSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches and validates the supported version list. Touches nothing but
/// the network; persistence belongs to the coordinator.
#[derive(Clone)]
pub struct RemoteVersionFetcher {
    source: Arc<dyn VersionSource>,
    url: String,
}

impl RemoteVersionFetcher {
    pub fn new(source: Arc<dyn VersionSource>, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
        }
    }

    pub fn http(client: Client, url: impl Into<String>) -> Self {
        Self::new(Arc::new(HttpVersionSource::new(client)), url)
    }

    pub async fn fetch(&self) -> Result<VersionList, FetchError> {
        info!("Fetching supported game versions from {}", self.url);

        let body = self.source.fetch_text(&self.url).await.map_err(|e| {
            warn!("Version request failed: {}", e);
            e
        })?;
        debug!("Version endpoint returned {} bytes", body.len());

        let versions = VersionList::from_json(&body).map_err(|e| {
            warn!("Version response rejected: {}", e);
            e
        })?;

        info!(
            "Loaded {} game versions (latest {})",
            versions.len(),
            versions.first().unwrap_or_default()
        );
        Ok(versions)
    }
}

impl std::fmt::Debug for RemoteVersionFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteVersionFetcher")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fetch_from(server: &mockito::Server) -> Result<VersionList, FetchError> {
        let client = crate::core::http::build_api_client().unwrap();
        let fetcher = RemoteVersionFetcher::http(client, format!("{}/api/v1/version", server.url()));
        fetcher.fetch().await
    }

    #[tokio::test]
    async fn fetches_versions_in_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/version")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["1.30.0","1.29.1","1.29.0"]"#)
            .create_async()
            .await;

        let versions = fetch_from(&server).await.unwrap();
        mock.assert_async().await;

        assert_eq!(versions, VersionList::from(["1.30.0", "1.29.1", "1.29.0"]));
    }

    #[tokio::test]
    async fn server_error_is_reported_with_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/version")
            .with_status(500)
            .create_async()
            .await;

        let result = fetch_from(&server).await;
        mock.assert_async().await;

        match result {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/api/v1/version"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_is_a_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/version")
            .with_status(200)
            .with_body(r#"{"latest":"1.30.0"}"#)
            .create_async()
            .await;

        let result = fetch_from(&server).await;
        mock.assert_async().await;

        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn empty_array_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/version")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        assert!(matches!(
            fetch_from(&server).await,
            Err(FetchError::EmptyList)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = crate::core::http::build_api_client().unwrap();
        // Port 9 (discard) on localhost is not expected to be listening.
        let fetcher = RemoteVersionFetcher::http(client, "http://127.0.0.1:9/api/v1/version");

        assert!(matches!(
            fetcher.fetch().await,
            Err(FetchError::Transport(_))
        ));
    }
}
