//! # reqscope
//!
//! A terminal REST API tester: compose a request, send it, and inspect the
//! response as raw text, as a tree, or as a bar chart.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD
//! - JSON headers and body editors with formatting
//! - Auth support (Basic, Bearer)
//! - Body templates and persisted defaults
//! - Tree view of JSON responses
//! - Bar chart of flat numeric JSON objects
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine, owns all user-facing state)
//! - Network Layer (Tokio runtime, one worker task per dispatch)

pub mod app;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod projection;
pub mod request;
pub mod storage;
pub mod text_field;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use error::{AppError, ErrorKind, JsonField, ValidationIssue, VisualizationIssue};
pub use messages::{DispatchOutcome, NetworkCommand, RenderState, UiEvent};
pub use models::{Auth, AuthMode, HeaderMap, HttpMethod, RequestSpec, ResponseEnvelope};
pub use network::{Dispatcher, NetworkActor, ReqwestTransport, Transport};
pub use projection::{is_chartable, project, ChartDataset, TreeNode};
pub use request::{compose, RequestInput};
pub use storage::{Config, ConfigStore, JsonFileStore};
