//! Error taxonomy for the request pipeline.
//!
//! Every failure the user can see maps to one [`AppError`] variant. None of
//! them are retried: they are reported once and the user corrects the input.

use std::fmt;

/// Missing or incomplete required input, detected before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingUrl,
    UnsupportedMethod,
    BasicAuthIncomplete,
    BearerTokenMissing,
}

impl ValidationIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationIssue::MissingUrl => "missing-url",
            ValidationIssue::UnsupportedMethod => "unsupported-method",
            ValidationIssue::BasicAuthIncomplete => "basic-auth-incomplete",
            ValidationIssue::BearerTokenMissing => "bearer-token-missing",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which surface held text that should have been JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonField {
    Headers,
    Body,
    Response,
}

impl JsonField {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonField::Headers => "headers",
            JsonField::Body => "body",
            JsonField::Response => "response",
        }
    }
}

impl fmt::Display for JsonField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a valid JSON response could not be charted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationIssue {
    NotNumericMap,
}

impl fmt::Display for VisualizationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualizationIssue::NotNumericMap => f.write_str("not-numeric-map"),
        }
    }
}

/// Coarse classification used by the notification popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    MalformedJson,
    Network,
    Visualization,
}

impl ErrorKind {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid input",
            ErrorKind::MalformedJson => "Malformed JSON",
            ErrorKind::Network => "Network error",
            ErrorKind::Visualization => "Cannot visualize",
        }
    }
}

/// Pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(ValidationIssue),

    #[error("malformed JSON in {0}")]
    MalformedJson(JsonField),

    #[error("network error: {0}")]
    Network(String),

    #[error("visualization error: {0}")]
    Visualization(VisualizationIssue),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::MalformedJson(_) => ErrorKind::MalformedJson,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Visualization(_) => ErrorKind::Visualization,
        }
    }

    /// Text shown to the user in the notification popup
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(ValidationIssue::MissingUrl) => {
                "Endpoint URL is required.".to_string()
            }
            AppError::Validation(ValidationIssue::UnsupportedMethod) => {
                "HTTP method must be one of GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD.".to_string()
            }
            AppError::Validation(ValidationIssue::BasicAuthIncomplete) => {
                "Username and Password are required for Basic Authentication.".to_string()
            }
            AppError::Validation(ValidationIssue::BearerTokenMissing) => {
                "A token is required for Bearer Token Authentication.".to_string()
            }
            AppError::MalformedJson(JsonField::Headers) => {
                "Headers must be a JSON object of string values.".to_string()
            }
            AppError::MalformedJson(JsonField::Body) => {
                "Body must be in valid JSON format.".to_string()
            }
            AppError::MalformedJson(JsonField::Response) => {
                "Invalid JSON format in response.".to_string()
            }
            AppError::Network(reason) if reason == "timeout" => {
                "Request timed out (30s).".to_string()
            }
            AppError::Network(reason) => reason.clone(),
            AppError::Visualization(VisualizationIssue::NotNumericMap) => {
                "The response data is not suitable for visualization: expected an object of numbers."
                    .to_string()
            }
        }
    }
}
