//! HTTP retrieval of endpoint documents.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, Method};
use tracing::debug;

use crate::config::Endpoint;

const TIMEOUT: Duration = Duration::from_secs(30);

/// Shared client for every endpoint in a run.
pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(TIMEOUT)
        .user_agent(concat!("typeagen/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Request `endpoint` and return the response body. Non-2xx statuses are
/// errors.
pub async fn fetch_body(client: &Client, endpoint: &Endpoint) -> Result<String> {
    let method = Method::from_bytes(endpoint.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{}'", endpoint.method))?;

    let mut request = client.request(method.clone(), &endpoint.url);
    for (name, value) in &endpoint.headers {
        request = request.header(name, value);
    }

    debug!(%method, url = %endpoint.url, headers = endpoint.headers.len(), "sending request");
    let response = request
        .send()
        .await
        .with_context(|| format!("{method} {} failed", endpoint.url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("{method} {} returned HTTP {status}", endpoint.url);
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", endpoint.url))?;
    debug!(%status, bytes = body.len(), "received response");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(url: String, method: &str) -> Endpoint {
        Endpoint {
            root_type: "Root".into(),
            url,
            method: method.into(),
            headers: IndexMap::new(),
        }
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 1}"#))
            .expect(1)
            .mount(&server)
            .await;

        let ep = endpoint(format!("{}/users/1", server.uri()), "GET");
        let body = fetch_body(&client().unwrap(), &ep).await.unwrap();
        assert_eq!(body, r#"{"id": 1}"#);
    }

    #[tokio::test]
    async fn sends_configured_headers_and_method() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("Authorization", "Bearer abc"))
            .and(header("X-Trace", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let mut ep = endpoint(format!("{}/search", server.uri()), "post");
        ep.headers.insert("Authorization".into(), "Bearer abc".into());
        ep.headers.insert("X-Trace".into(), "1".into());
        let body = fetch_body(&client().unwrap(), &ep).await.unwrap();
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let ep = endpoint(format!("{}/broken", server.uri()), "GET");
        let err = fetch_body(&client().unwrap(), &ep).await.unwrap_err();
        assert!(err.to_string().contains("returned HTTP 500"), "{err}");
    }

    #[tokio::test]
    async fn invalid_method_fails_before_sending() {
        let ep = endpoint("http://127.0.0.1:9/".into(), "NOT A METHOD");
        let err = fetch_body(&client().unwrap(), &ep).await.unwrap_err();
        assert!(err.to_string().contains("Invalid HTTP method"));
    }
}
