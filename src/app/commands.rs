//! Command handlers - business logic for processing UI events

use serde_json::{Map, Value};

use crate::app::state::Notification;
use crate::app::AppState;
use crate::error::{AppError, JsonField};
use crate::messages::ui_events::{AuthField, InputMode, Panel};
use crate::messages::{DispatchOutcome, NetworkCommand};
use crate::models::AuthMode;
use crate::projection::{self, format_json, to_pretty};
use crate::request::{compose, AuthFields, RequestInput};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if let Some(field) = self.current_field_mut() {
            field.move_to_end();
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        if self.input_mode == InputMode::Editing && self.active_panel == Panel::Response {
            self.resync_tree();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(field) = self.current_field_mut() {
            field.insert(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.current_field_mut() {
            field.backspace();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(field) = self.current_field_mut() {
            field.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(field) = self.current_field_mut() {
            field.move_right();
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        self.method = self.method.next();
    }

    // ========================
    // Auth
    // ========================

    pub fn cycle_auth(&mut self) {
        self.auth_mode = self.auth_mode.next();
        self.auth_field = match self.auth_mode {
            AuthMode::Bearer => AuthField::Token,
            _ => AuthField::Username,
        };
        if self.auth_mode == AuthMode::None {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn next_auth_field(&mut self) {
        if self.auth_mode == AuthMode::Basic {
            self.auth_field = match self.auth_field {
                AuthField::Username => AuthField::Password,
                _ => AuthField::Username,
            };
            if let Some(field) = self.current_field_mut() {
                field.move_to_end();
            }
        }
    }

    // ========================
    // JSON surfaces
    // ========================

    /// Pretty-print the headers or body surface in place
    pub fn format_current_json(&mut self) {
        let (field, json_field) = match self.active_panel {
            Panel::Headers => (&mut self.headers, JsonField::Headers),
            Panel::Body => (&mut self.body, JsonField::Body),
            _ => return,
        };
        match format_json(field.text(), json_field) {
            Ok(formatted) => field.set_text(formatted),
            Err(e) => self.report(&e),
        }
    }

    /// Write the next template (in name order as stored) into the body
    pub fn insert_next_template(&mut self, templates: Map<String, Value>) {
        self.templates = templates;
        if self.templates.is_empty() {
            self.status_message = Some("No templates configured".to_string());
            return;
        }

        let index = self.template_index % self.templates.len();
        if let Some((name, template)) = self.templates.iter().nth(index) {
            self.body.set_text(to_pretty(template));
            self.status_message = Some(format!("Inserted template '{}'", name));
        }
        self.template_index = index + 1;
    }

    // ========================
    // Request sending
    // ========================

    /// Snapshot of the request surfaces
    pub fn request_input(&self) -> RequestInput {
        RequestInput {
            url: self.url.text().to_string(),
            method: self.method.as_str().to_string(),
            headers_text: self.headers.text().to_string(),
            body_text: self.body.text().to_string(),
            auth_mode: self.auth_mode,
            auth_fields: AuthFields {
                username: self.username.text().to_string(),
                password: self.password.text().to_string(),
                token: self.token.text().to_string(),
            },
        }
    }

    /// Validate the surfaces and build a dispatch command.
    ///
    /// Another request may still be in flight; both are allowed to run.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        let spec = match compose(&self.request_input()) {
            Ok(spec) => spec,
            Err(e) => {
                self.report(&e);
                return None;
            }
        };

        let id = self.next_id();
        self.in_flight += 1;
        self.status_message = Some(format!("Sending {} {}", spec.method.as_str(), spec.url));
        Some(NetworkCommand::Dispatch { id, spec })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_outcome(&mut self, outcome: DispatchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.last_outcome_id.is_some_and(|last| outcome.id < last) {
            tracing::debug!(id = outcome.id, "Discarding outcome of a superseded request");
            return;
        }
        self.last_outcome_id = Some(outcome.id);

        match outcome.result {
            Ok(envelope) => {
                let shown = match &envelope.parsed_body {
                    Some(value) => to_pretty(value),
                    None => envelope.raw_text.clone(),
                };
                self.tree = envelope
                    .parsed_body
                    .as_ref()
                    .map(projection::project)
                    .unwrap_or_default();
                tracing::debug!(id = outcome.id, nodes = self.tree.len(), "Projected response tree");
                self.response_text.set_text(shown);
                self.status_message = Some(format!(
                    "{} in {}ms",
                    envelope.status_code, envelope.elapsed_ms
                ));
                self.response = Some(envelope);
                self.chart = None;
                self.response_scroll = 0;
            }
            Err(e) => {
                self.status_message = None;
                self.report(&e);
            }
        }
    }

    /// Rebuild the tree from the (possibly edited) response text
    fn resync_tree(&mut self) {
        self.tree = serde_json::from_str::<Value>(self.response_text.text())
            .map(|value| projection::project(&value))
            .unwrap_or_default();
        self.chart = None;
    }

    // ========================
    // Response views
    // ========================

    pub fn cycle_response_view(&mut self) {
        self.response_view = self.response_view.next();
        self.response_scroll = 0;
    }

    /// Chart the current response text; recomputed on every request
    pub fn visualize(&mut self) {
        self.response_view = crate::messages::ui_events::ResponseView::Chart;
        match projection::visualize_text(self.response_text.text()) {
            Ok(dataset) => {
                self.status_message = Some(format!("Charted {} values", dataset.len()));
                self.chart = Some(dataset);
            }
            Err(e) => {
                self.chart = None;
                self.report(&e);
            }
        }
    }

    // ========================
    // Notifications & popups
    // ========================

    /// Surface a failure to the user
    pub fn report(&mut self, err: &AppError) {
        tracing::warn!(kind = ?err.kind(), error = %err, "Reporting failure");
        self.notification = Some(Notification::from(err));
    }

    pub fn report_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notification = Some(Notification {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ValidationIssue, VisualizationIssue};
    use crate::messages::ui_events::ResponseView;
    use crate::models::{HeaderMap, ResponseEnvelope};
    use crate::storage::Config;

    fn state() -> AppState {
        AppState::new(Config::default())
    }

    fn ok(id: u64, text: &str) -> DispatchOutcome {
        DispatchOutcome {
            id,
            result: Ok(ResponseEnvelope::new(200, HeaderMap::new(), text.to_string(), 12)),
        }
    }

    #[test]
    fn test_empty_url_reports_validation() {
        let mut state = state();
        state.url.set_text("  ");
        assert!(state.prepare_request().is_none());

        let note = state.notification.clone().unwrap();
        let expected = Notification::from(&AppError::Validation(ValidationIssue::MissingUrl));
        assert_eq!(note, expected);
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_prepare_allows_concurrent_dispatch() {
        let mut state = state();
        let first = state.prepare_request();
        let second = state.prepare_request();
        assert!(matches!(first, Some(NetworkCommand::Dispatch { id: 1, .. })));
        assert!(matches!(second, Some(NetworkCommand::Dispatch { id: 2, .. })));
        assert!(state.is_loading());
        assert_eq!(state.in_flight, 2);
    }

    #[test]
    fn test_bearer_request_carries_header() {
        let mut state = state();
        state.auth_mode = AuthMode::Bearer;
        state.token.set_text("abc");
        match state.prepare_request() {
            Some(NetworkCommand::Dispatch { spec, .. }) => {
                assert_eq!(spec.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_populates_views() {
        let mut state = state();
        state.prepare_request();
        state.handle_outcome(ok(1, r#"{"a":{},"b":[1]}"#));

        assert!(!state.is_loading());
        assert_eq!(state.response_text.text(), "{\n    \"a\": {},\n    \"b\": [\n        1\n    ]\n}");
        assert_eq!(state.tree.len(), 2);
        assert_eq!(state.tree[0].label, "a");
        assert!(state.tree[0].children.is_empty());
        assert_eq!(state.response.as_ref().map(|r| r.status_code), Some(200));
    }

    #[test]
    fn test_non_json_response_shown_verbatim() {
        let mut state = state();
        state.handle_outcome(ok(1, "<html>hi</html>"));
        assert_eq!(state.response_text.text(), "<html>hi</html>");
        assert!(state.tree.is_empty());
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut state = state();
        state.prepare_request();
        state.prepare_request();
        state.handle_outcome(ok(2, r#""newer""#));
        state.handle_outcome(ok(1, r#""older""#));

        assert_eq!(state.response_text.text(), "\"newer\"");
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_network_failure_reported() {
        let mut state = state();
        state.prepare_request();
        state.handle_outcome(DispatchOutcome {
            id: 1,
            result: Err(AppError::Network("timeout".to_string())),
        });
        let note = state.notification.unwrap();
        assert_eq!(note.title, "Network error");
        assert_eq!(note.message, "Request timed out (30s).");
    }

    #[test]
    fn test_visualize_reads_current_text() {
        let mut state = state();
        state.handle_outcome(ok(1, r#"{"x":3,"y":7}"#));
        state.visualize();
        let chart = state.chart.clone().unwrap();
        assert_eq!(chart.categories, vec!["x", "y"]);
        assert_eq!(chart.values, vec![3.0, 7.0]);
        assert_eq!(state.response_view, ResponseView::Chart);

        state.response_text.set_text(r#"{"x":"three"}"#);
        state.visualize();
        assert!(state.chart.is_none());
        let expected = Notification::from(&AppError::Visualization(VisualizationIssue::NotNumericMap));
        assert_eq!(state.notification, Some(expected));

        state.response_text.set_text("garbage");
        state.visualize();
        let expected = Notification::from(&AppError::MalformedJson(JsonField::Response));
        assert_eq!(state.notification, Some(expected));
    }

    #[test]
    fn test_editing_response_resyncs_tree() {
        let mut state = state();
        state.handle_outcome(ok(1, r#"{"a":1}"#));
        state.active_panel = Panel::Response;
        state.start_editing();
        state.response_text.set_text(r#"[true, false, null]"#);
        state.stop_editing();
        let labels: Vec<_> = state.tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["[0]", "[1]", "[2]"]);
    }

    #[test]
    fn test_format_body_and_report_bad_json() {
        let mut state = state();
        state.active_panel = Panel::Body;
        state.body.set_text(r#"{"k":[1,2]}"#);
        state.format_current_json();
        assert_eq!(state.body.text(), "{\n    \"k\": [\n        1,\n        2\n    ]\n}");

        state.active_panel = Panel::Headers;
        state.headers.set_text("{bad");
        state.format_current_json();
        assert_eq!(state.headers.text(), "{bad");
        assert_eq!(state.notification, Some(Notification::from(&AppError::MalformedJson(JsonField::Headers))));
    }

    #[test]
    fn test_templates_cycle_in_order() {
        let mut state = state();
        let templates = crate::storage::default_templates();
        state.insert_next_template(templates.clone());
        assert!(state.body.text().contains("short_description"));
        state.insert_next_template(templates.clone());
        assert!(state.body.text().contains("CHG1234567"));
        state.insert_next_template(templates);
        assert!(state.body.text().contains("short_description"));
    }

    #[test]
    fn test_auth_editing_targets_selected_field() {
        let mut state = state();
        state.active_panel = Panel::Auth;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);

        state.cycle_auth();
        assert_eq!(state.auth_mode, AuthMode::Basic);
        state.start_editing();
        state.enter_char('u');
        state.next_auth_field();
        state.enter_char('p');
        assert_eq!(state.username.text(), "u");
        assert_eq!(state.password.text(), "p");

        state.cycle_auth();
        state.enter_char('t');
        assert_eq!(state.token.text(), "t");
    }

    #[test]
    fn test_config_round_trip_through_state() {
        let mut config = Config::default();
        config.url = "http://svc/api".to_string();
        config.auth_type = AuthMode::Bearer;
        config.token = "tok".to_string();
        let state = AppState::new(config.clone());
        assert_eq!(state.to_config(), config);
    }
}
