//! HTTP transport - the seam the dispatcher calls through

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;

use crate::models::{Auth, HeaderMap, HttpMethod, RequestSpec};

/// What a transport hands back for a completed exchange
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub text: String,
}

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Other(String),
}

/// Executes a single request to completion
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request(
        &self,
        spec: &RequestSpec,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by `reqwest`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: create_client(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a request from the given spec
fn build_request(client: &reqwest::Client, spec: &RequestSpec, timeout: Duration) -> reqwest::RequestBuilder {
    let method = match spec.method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::HEAD => reqwest::Method::HEAD,
    };

    let mut req_builder = client.request(method, &spec.url).timeout(timeout);

    // Basic credentials replace any Authorization header typed by the user;
    // Bearer auth already lives in the header map
    let basic = match &spec.auth {
        Auth::Basic { username, password } => Some(basic_auth_value(username, password)),
        _ => None,
    };

    for (key, value) in &spec.headers {
        if basic.is_some() && key.eq_ignore_ascii_case("Authorization") {
            continue;
        }
        req_builder = req_builder.header(key, value);
    }

    if let Some(value) = basic {
        req_builder = req_builder.header("Authorization", value);
    }

    if let Some(body) = &spec.body {
        req_builder = req_builder.json(body);
    }

    req_builder
}

/// `Basic <base64(username:password)>`
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(
        &self,
        spec: &RequestSpec,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let resp = build_request(&self.client, spec, timeout)
            .send()
            .await
            .map_err(classify)?;

        let status_code = resp.status().as_u16();
        let mut headers = HeaderMap::new();
        for (name, value) in resp.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            match headers.get_mut(name.as_str()) {
                Some(existing) => {
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
                None => {
                    headers.insert(name.as_str().to_string(), value);
                }
            }
        }

        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Other(format!("Error reading body: {}", e)))?;

        Ok(TransportResponse {
            status_code,
            headers,
            text,
        })
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use crate::constants::{APP_NAME, REQUEST_TIMEOUT_SECS};

    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
