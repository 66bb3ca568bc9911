//! HTTP client trait and implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A request against the recipe API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL, query string included
    pub url: String,
    pub bearer_token: Option<String>,
    pub json: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer_token: None,
            json: None,
        }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Status and raw body of a response. Non-2xx statuses are not errors at this
/// layer; the API client decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, FetchError>;
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        (**self).execute(request).await
    }
}

/// Configuration for ReqwestClient.
#[derive(Clone)]
pub struct ReqwestClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("cuisine/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ReqwestClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ReqwestClient {
            inner: Arc::new(inner),
        })
    }
}

/// Production HTTP client.
#[derive(Clone)]
pub struct ReqwestClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        ReqwestClientBuilder::new().build()
    }

    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let url =
            reqwest::Url::parse(&request.url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let mut builder = match request.method {
            Method::Get => self.inner.get(url),
            Method::Post => self.inner.post(url),
            Method::Delete => self.inner.delete(url),
        };
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        tracing::debug!(method = request.method.as_str(), url = %request.url, "network: sending");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "network: done");

        Ok(ApiResponse { status, body })
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Json { status: u16, body: Value },
    Text { status: u16, body: String },
    Error(String),
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by method and full URL. Every request is recorded so
/// tests can inspect headers and bodies afterwards.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<(Method, String), MockResponse>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, method: Method, url: &str, response: MockResponse) -> Self {
        self.responses.insert((method, url.to_string()), response);
        self
    }

    pub fn with_json(self, method: Method, url: &str, status: u16, body: Value) -> Self {
        self.with_response(method, url, MockResponse::Json { status, body })
    }

    pub fn with_text(self, method: Method, url: &str, status: u16, body: &str) -> Self {
        self.with_response(
            method,
            url,
            MockResponse::Text {
                status,
                body: body.to_string(),
            },
        )
    }

    pub fn with_error(self, method: Method, url: &str, error: &str) -> Self {
        self.with_response(method, url, MockResponse::Error(error.to_string()))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        let key = (request.method, request.url.clone());
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }

        match self.responses.get(&key) {
            Some(MockResponse::Json { status, body }) => Ok(ApiResponse {
                status: *status,
                body: body.to_string(),
            }),
            Some(MockResponse::Text { status, body }) => Ok(ApiResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockResponse::Error(e)) => Err(FetchError::Transport(e.clone())),
            None => Err(FetchError::Transport(format!(
                "No mock response for {} {}",
                key.0.as_str(),
                key.1
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_client_records_requests() {
        let client = MockClient::new().with_json(
            Method::Get,
            "http://api/recipes",
            200,
            json!({"recipes": []}),
        );

        let response = client
            .execute(ApiRequest::new(Method::Get, "http://api/recipes").bearer("abc"))
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, r#"{"recipes":[]}"#);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bearer_token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_mock_client_unknown_url() {
        let client = MockClient::new();
        let result = client
            .execute(ApiRequest::new(Method::Delete, "http://api/nope"))
            .await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_mock_client_error_response() {
        let client = MockClient::new().with_error(Method::Post, "http://api/x", "offline");
        let err = client
            .execute(ApiRequest::new(Method::Post, "http://api/x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transport error: offline");
    }

    #[test]
    fn test_response_success_range() {
        let ok = ApiResponse { status: 201, body: String::new() };
        let not_ok = ApiResponse { status: 409, body: String::new() };
        assert!(ok.is_success());
        assert!(!not_ok.is_success());
    }
}
