//! Auth resolution - selected mode + field values to credentials or a header

use crate::error::{AppError, ValidationIssue};
use crate::models::{Auth, AuthMode, RequestSpec};

/// Raw values of the auth fields, whichever mode is selected
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFields {
    pub username: String,
    pub password: String,
    pub token: String,
}

/// Outcome of resolving an auth mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedAuth {
    None,
    /// Inline credentials, attached by the transport at dispatch time
    Credentials { username: String, password: String },
    /// Header merged into the request's header mapping
    Header { name: String, value: String, token: String },
}

pub fn resolve_auth(mode: AuthMode, fields: &AuthFields) -> Result<ResolvedAuth, AppError> {
    match mode {
        AuthMode::None => Ok(ResolvedAuth::None),
        AuthMode::Basic => {
            let username = fields.username.trim();
            let password = fields.password.trim();
            if username.is_empty() || password.is_empty() {
                return Err(AppError::Validation(ValidationIssue::BasicAuthIncomplete));
            }
            Ok(ResolvedAuth::Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
        }
        AuthMode::Bearer => {
            let token = fields.token.trim();
            if token.is_empty() {
                return Err(AppError::Validation(ValidationIssue::BearerTokenMissing));
            }
            Ok(ResolvedAuth::Header {
                name: "Authorization".to_string(),
                value: format!("Bearer {}", token),
                token: token.to_string(),
            })
        }
    }
}

impl RequestSpec {
    /// Attach resolved auth, producing a new spec
    pub fn with_auth(mut self, resolved: ResolvedAuth) -> RequestSpec {
        match resolved {
            ResolvedAuth::None => self.auth = Auth::None,
            ResolvedAuth::Credentials { username, password } => {
                self.auth = Auth::Basic { username, password };
            }
            ResolvedAuth::Header { name, value, token } => {
                self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
                self.headers.insert(name, value);
                self.auth = Auth::Bearer { token };
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::builder::build_request;

    fn fields(username: &str, password: &str, token: &str) -> AuthFields {
        AuthFields {
            username: username.to_string(),
            password: password.to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn test_bearer_injects_header() {
        let spec = build_request("http://localhost", "GET", r#"{"authorization": "old"}"#, "").unwrap();
        let resolved = resolve_auth(AuthMode::Bearer, &fields("ignored", "ignored", "abc")).unwrap();
        let spec = spec.with_auth(resolved);

        assert_eq!(spec.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
        assert!(!spec.headers.contains_key("authorization"));
        assert_eq!(spec.auth, Auth::Bearer { token: "abc".to_string() });
    }

    #[test]
    fn test_basic_never_touches_headers() {
        let spec = build_request("http://localhost", "GET", r#"{"Accept": "text/plain"}"#, "").unwrap();
        let before = spec.headers.clone();
        let resolved = resolve_auth(AuthMode::Basic, &fields(" admin ", "secret", "")).unwrap();
        let spec = spec.with_auth(resolved);

        assert_eq!(spec.headers, before);
        assert_eq!(
            spec.auth,
            Auth::Basic { username: "admin".to_string(), password: "secret".to_string() }
        );
    }

    #[test]
    fn test_basic_requires_both_fields() {
        let err = resolve_auth(AuthMode::Basic, &fields("admin", "   ", "")).unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationIssue::BasicAuthIncomplete));

        let err = resolve_auth(AuthMode::Basic, &fields("", "", "")).unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationIssue::BasicAuthIncomplete));
    }

    #[test]
    fn test_bearer_requires_token() {
        let err = resolve_auth(AuthMode::Bearer, &fields("admin", "secret", " ")).unwrap_err();
        assert_eq!(err, AppError::Validation(ValidationIssue::BearerTokenMissing));
    }

    #[test]
    fn test_none_has_no_effect() {
        assert_eq!(resolve_auth(AuthMode::None, &AuthFields::default()), Ok(ResolvedAuth::None));
    }
}
