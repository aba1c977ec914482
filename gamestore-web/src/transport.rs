//! Browser `fetch` transport.
use crate::dom::{js_error_message, window};
use async_trait::async_trait;
use gamestore_core::{ApiError, ApiRequest, ApiResponse, Transport};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

/// Sends every request with `credentials: include` so the session cookie
/// travels along, and parses bodies as JSON (`Null` when empty or not JSON).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTransport {
    base: String,
}

impl FetchTransport {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Transport pointed at the configured API base.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(crate::paths::api_base())
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    fn build(&self, request: &ApiRequest) -> Result<Request, JsValue> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_credentials(RequestCredentials::Include);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(&body.to_string()));
        }
        let url = request.url_with(&self.base, |part| {
            String::from(js_sys::encode_uri_component(part))
        });
        let built = Request::new_with_str_and_init(&url, &init)?;
        built.headers().set("Accept", "application/json")?;
        if request.body.is_some() {
            built.headers().set("Content-Type", "application/json")?;
        }
        Ok(built)
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
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        let transport_error = |err: JsValue| ApiError::Transport(js_error_message(&err));
        let built = self.build(&request).map_err(transport_error)?;
        let fetched = JsFuture::from(window().map_err(transport_error)?.fetch_with_request(&built))
            .await
            .map_err(transport_error)?;
        let response: Response = fetched.dyn_into().map_err(transport_error)?;
        let status = response.status();
        let text = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(err) => {
                log::debug!("unreadable response body: {}", js_error_message(&err));
                String::new()
            }
        };
        log::debug!("{} {} -> {status}", request.method, request.path);
        Ok(ApiResponse::new(status, parse_body(&text)))
    }
}
