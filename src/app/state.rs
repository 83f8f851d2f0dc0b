//! App state - pure data structure with no I/O logic

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::messages::ui_events::{AuthField, InputMode, Panel, ResponseView};
use crate::messages::RenderState;
use crate::models::{AuthMode, HttpMethod, ResponseEnvelope};
use crate::projection::{flatten, ChartDataset, TreeNode};
use crate::storage::Config;
use crate::text_field::TextField;

/// A failure waiting to be acknowledged by the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl From<&AppError> for Notification {
    fn from(err: &AppError) -> Self {
        Notification {
            title: err.kind().title().to_string(),
            message: err.user_message(),
        }
    }
}

/// Main application state - owned by the app actor, no I/O
pub struct AppState {
    // Request surfaces
    pub method: HttpMethod,
    pub url: TextField,
    pub headers: TextField,
    pub body: TextField,
    pub auth_mode: AuthMode,
    pub username: TextField,
    pub password: TextField,
    pub token: TextField,
    pub auth_field: AuthField,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,

    // Response
    pub response: Option<ResponseEnvelope>,
    pub response_text: TextField,
    pub response_view: ResponseView,
    pub response_scroll: u16,
    pub tree: Vec<TreeNode>,
    pub chart: Option<ChartDataset>,

    // Dispatch bookkeeping
    pub next_request_id: u64,
    pub in_flight: usize,
    pub last_outcome_id: Option<u64>,

    // Templates loaded from the config store
    pub templates: Map<String, Value>,
    pub template_index: usize,

    // Popups and status line
    pub show_help: bool,
    pub notification: Option<Notification>,
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let auth_field = match config.auth_type {
            AuthMode::Bearer => AuthField::Token,
            _ => AuthField::Username,
        };
        AppState {
            method: config.method,
            url: TextField::new(config.url),
            headers: TextField::new(config.headers),
            body: TextField::new(config.body),
            auth_mode: config.auth_type,
            username: TextField::new(config.username),
            password: TextField::new(config.password),
            token: TextField::new(config.token),
            auth_field,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response: None,
            response_text: TextField::default(),
            response_view: ResponseView::Raw,
            response_scroll: 0,
            tree: Vec::new(),
            chart: None,
            next_request_id: 1,
            in_flight: 0,
            last_outcome_id: None,
            templates: config.templates,
            template_index: 0,
            show_help: false,
            notification: None,
            status_message: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// The text surface the active panel edits, if any
    pub fn current_field(&self) -> Option<&TextField> {
        match self.active_panel {
            Panel::Url => Some(&self.url),
            Panel::Headers => Some(&self.headers),
            Panel::Body => Some(&self.body),
            Panel::Response => Some(&self.response_text),
            Panel::Auth => match (self.auth_mode, self.auth_field) {
                (AuthMode::None, _) => None,
                (AuthMode::Bearer, _) => Some(&self.token),
                (AuthMode::Basic, AuthField::Password) => Some(&self.password),
                (AuthMode::Basic, _) => Some(&self.username),
            },
        }
    }

    pub fn current_field_mut(&mut self) -> Option<&mut TextField> {
        match self.active_panel {
            Panel::Url => Some(&mut self.url),
            Panel::Headers => Some(&mut self.headers),
            Panel::Body => Some(&mut self.body),
            Panel::Response => Some(&mut self.response_text),
            Panel::Auth => match (self.auth_mode, self.auth_field) {
                (AuthMode::None, _) => None,
                (AuthMode::Bearer, _) => Some(&mut self.token),
                (AuthMode::Basic, AuthField::Password) => Some(&mut self.password),
                (AuthMode::Basic, _) => Some(&mut self.username),
            },
        }
    }

    /// Snapshot of the persisted fields
    pub fn to_config(&self) -> Config {
        Config {
            url: self.url.text().trim().to_string(),
            method: self.method,
            auth_type: self.auth_mode,
            username: self.username.text().trim().to_string(),
            password: self.password.text().trim().to_string(),
            token: self.token.text().trim().to_string(),
            headers: self.headers.text().to_string(),
            body: self.body.text().to_string(),
            templates: self.templates.clone(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.method,
            url: self.url.text().to_string(),
            headers: self.headers.text().to_string(),
            body: self.body.text().to_string(),
            auth_mode: self.auth_mode,
            username: self.username.text().to_string(),
            password_len: self.password.text().chars().count(),
            token: self.token.text().to_string(),
            auth_field: self.auth_field,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor: self.current_field().map(TextField::cursor_line_col),
            status_code: self.response.as_ref().map(|r| r.status_code),
            time_ms: self.response.as_ref().map(|r| r.elapsed_ms).unwrap_or(0),
            response_text: self.response_text.text().to_string(),
            response_view: self.response_view,
            response_scroll: self.response_scroll,
            tree_rows: flatten(&self.tree),
            chart: self.chart.clone(),
            in_flight: self.in_flight,
            show_help: self.show_help,
            notification: self.notification.clone(),
            status_message: self.status_message.clone(),
        }
    }
}
