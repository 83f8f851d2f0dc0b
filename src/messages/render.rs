//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::Notification;
use crate::messages::ui_events::{AuthField, InputMode, Panel, ResponseView};
use crate::models::{AuthMode, HttpMethod};
use crate::projection::{ChartDataset, TreeRow};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request surfaces
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
    pub auth_mode: AuthMode,
    pub username: String,
    pub password_len: usize,
    pub token: String,
    pub auth_field: AuthField,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    /// (line, column) of the cursor in the active field
    pub cursor: Option<(usize, usize)>,

    // Response
    pub status_code: Option<u16>,
    pub time_ms: u64,
    pub response_text: String,
    pub response_view: ResponseView,
    pub response_scroll: u16,
    pub tree_rows: Vec<TreeRow>,
    pub chart: Option<ChartDataset>,
    pub in_flight: usize,

    // Popups
    pub show_help: bool,
    pub notification: Option<Notification>,
    pub status_message: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        crate::app::AppState::default().to_render_state()
    }
}
