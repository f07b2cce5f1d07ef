//! HTTP fetching for listing and detail pages
//!
//! This module builds the shared HTTP client and retrieves raw markup for a
//! URL. There is no retry logic: a failed fetch surfaces as a [`FetchError`]
//! and the caller decides what to do with it.

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used for the whole harvest
///
/// TLS certificate validation is disabled when `accept-invalid-certs` is set
/// in the configuration. The target catalog serves a certificate chain that
/// does not validate against common root stores, so the shipped configuration
/// enables the flag for that host; it is never a silent default.
///
/// # Example
///
/// ```no_run
/// use chemharvest::config::HttpConfig;
/// use chemharvest::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the markup for a single URL with a plain GET
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(FetchError::Status)` - The server answered with a non-2xx status
/// * `Err(FetchError::Transport)` - Connection, timeout, or decode failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_invalid_certs_allowed() {
        let config = HttpConfig {
            accept_invalid_certs: true,
            ..HttpConfig::default()
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let body = fetch_page(&client, &url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_page_non_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&HttpConfig::default()).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let error = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(error, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused_is_transport_error() {
        let client = build_http_client(&HttpConfig::default()).unwrap();
        // Port 1 is essentially never listening.
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let error = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(error, FetchError::Transport { .. }));
    }
}
