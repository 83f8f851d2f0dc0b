//! Request assembly - validation, JSON parsing and auth resolution
//!
//! Everything here is synchronous and side-effect free so it can run on the
//! app actor before a dispatch is fired.

pub mod auth;
pub mod builder;

pub use auth::{resolve_auth, AuthFields, ResolvedAuth};
pub use builder::build_request;

use crate::error::AppError;
use crate::models::{AuthMode, RequestSpec};

/// Snapshot of the request surfaces as the user typed them
#[derive(Clone, Debug, Default)]
pub struct RequestInput {
    pub url: String,
    pub method: String,
    pub headers_text: String,
    pub body_text: String,
    pub auth_mode: AuthMode,
    pub auth_fields: AuthFields,
}

/// Validate the input and produce a dispatchable request
pub fn compose(input: &RequestInput) -> Result<RequestSpec, AppError> {
    let spec = build_request(&input.url, &input.method, &input.headers_text, &input.body_text)?;
    let resolved = resolve_auth(input.auth_mode, &input.auth_fields)?;
    Ok(spec.with_auth(resolved))
}
