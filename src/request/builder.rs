//! Request builder - turns raw text fields into a [`RequestSpec`]

use serde_json::Value;

use crate::error::{AppError, JsonField, ValidationIssue};
use crate::models::{Auth, HeaderMap, HttpMethod, RequestSpec};

/// Build a request from raw user input. Auth is left as [`Auth::None`].
pub fn build_request(
    url: &str,
    method: &str,
    headers_text: &str,
    body_text: &str,
) -> Result<RequestSpec, AppError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::Validation(ValidationIssue::MissingUrl));
    }

    let method = method
        .parse::<HttpMethod>()
        .map_err(|_| AppError::Validation(ValidationIssue::UnsupportedMethod))?;

    let headers = parse_headers(headers_text)?;
    let body = parse_body(body_text)?;

    Ok(RequestSpec {
        url: url.to_string(),
        method,
        headers,
        body,
        auth: Auth::None,
    })
}

/// Parse the headers surface. Blank text means no headers.
pub fn parse_headers(text: &str) -> Result<HeaderMap, AppError> {
    if text.trim().is_empty() {
        return Ok(HeaderMap::new());
    }

    let malformed = || AppError::MalformedJson(JsonField::Headers);
    let value: Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "headers are not valid JSON");
        malformed()
    })?;

    let Value::Object(map) = value else {
        return Err(malformed());
    };

    let mut headers = HeaderMap::new();
    for (key, value) in map {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return Err(malformed()),
        };
        headers.insert(key, value);
    }
    Ok(headers)
}

/// Parse the body surface. Blank text means no body.
pub fn parse_body(text: &str) -> Result<Option<Value>, AppError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text).map(Some).map_err(|e| {
        tracing::debug!(error = %e, "body is not valid JSON");
        AppError::MalformedJson(JsonField::Body)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_url_always_fails_first() {
        let err = build_request("   ", "NOPE", "{not json", "{also not").unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationIssue::MissingUrl));
    }

    #[test]
    fn test_builds_full_request() {
        let spec = build_request(
            "  https://api.example.com/items ",
            "post",
            r#"{"Accept": "application/json", "X-Retry": 3}"#,
            r#"{"name": "widget"}"#,
        )
        .unwrap();

        assert_eq!(spec.url, "https://api.example.com/items");
        assert_eq!(spec.method, HttpMethod::POST);
        assert_eq!(spec.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(spec.headers.get("X-Retry").map(String::as_str), Some("3"));
        assert_eq!(spec.body, Some(json!({"name": "widget"})));
        assert_eq!(spec.auth, Auth::None);
    }

    #[test]
    fn test_blank_body_is_absent() {
        let spec = build_request("http://localhost", "GET", "", "  \n").unwrap();
        assert!(spec.body.is_none());
        assert!(spec.headers.is_empty());
    }

    #[test]
    fn test_malformed_headers() {
        let err = build_request("http://localhost", "GET", "{\"a\":", "").unwrap_err();
        assert_eq!(err, AppError::MalformedJson(JsonField::Headers));

        let err = build_request("http://localhost", "GET", "[1, 2]", "").unwrap_err();
        assert_eq!(err, AppError::MalformedJson(JsonField::Headers));

        let err = build_request("http://localhost", "GET", r#"{"a": {"b": 1}}"#, "").unwrap_err();
        assert_eq!(err, AppError::MalformedJson(JsonField::Headers));
    }

    #[test]
    fn test_malformed_body() {
        let err = build_request("http://localhost", "PUT", "{}", "{oops}").unwrap_err();
        assert_eq!(err, AppError::MalformedJson(JsonField::Body));
    }

    #[test]
    fn test_unsupported_method() {
        let err = build_request("http://localhost", "TRACE", "", "").unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationIssue::UnsupportedMethod));
    }

    #[test]
    fn test_scalar_body_allowed() {
        let spec = build_request("http://localhost", "POST", "", "42").unwrap();
        assert_eq!(spec.body, Some(json!(42)));
    }
}
