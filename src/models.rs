use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Header mapping; keys are unique
pub type HeaderMap = BTreeMap<String, String>;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    HEAD,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
        HttpMethod::OPTIONS,
        HttpMethod::HEAD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::OPTIONS,
            HttpMethod::OPTIONS => HttpMethod::HEAD,
            HttpMethod::HEAD => HttpMethod::GET,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or(())
    }
}

/// Authentication mode selected in the Auth panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthMode {
    #[default]
    None,
    Basic,
    Bearer,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::None => "None",
            AuthMode::Basic => "Basic",
            AuthMode::Bearer => "Bearer",
        }
    }

    pub fn next(&self) -> AuthMode {
        match self {
            AuthMode::None => AuthMode::Basic,
            AuthMode::Basic => AuthMode::Bearer,
            AuthMode::Bearer => AuthMode::None,
        }
    }
}

/// Authentication carried by a request; only the selected variant's fields exist
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Auth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

/// A validated request ready for dispatch
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub auth: Auth,
}

/// A completed response; immutable once built
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub raw_text: String,
    pub parsed_body: Option<Value>,
    pub elapsed_ms: u64,
}

impl ResponseEnvelope {
    pub fn new(status_code: u16, headers: HeaderMap, raw_text: String, elapsed_ms: u64) -> Self {
        let parsed_body = serde_json::from_str::<Value>(&raw_text).ok();
        ResponseEnvelope {
            status_code,
            headers,
            raw_text,
            parsed_body,
            elapsed_ms,
        }
    }
}
