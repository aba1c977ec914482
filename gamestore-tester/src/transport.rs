//! `reqwest` transport for running scenarios against a live backend.
use async_trait::async_trait;
use gamestore_core::{ApiError, ApiRequest, ApiResponse, Method, Transport};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP transport with its own cookie jar, so each instance is one browser
/// session as far as the backend can tell.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: String,
    client: Client,
}

impl HttpTransport {
    /// # Errors
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base: base.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

const fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|err| {
        log::debug!("non-JSON response body: {err}");
        Value::Null
    })
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .client
            .request(http_method(request.method), self.url(&request.path))
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_else(|err| {
            log::debug!("unreadable response body: {err}");
            String::new()
        });
        log::debug!("{} {} -> {status}", request.method, request.path);
        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}
