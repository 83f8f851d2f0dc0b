//! App actor - message loop processing UI events and dispatch outcomes
//!
//! This task is the interactive context: it alone owns [`AppState`]. Workers
//! never touch the state; their outcomes arrive on `outcome_rx` and are
//! applied here, between UI events.

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{DispatchOutcome, NetworkCommand, RenderState, UiEvent};
use crate::storage::ConfigStore;

/// App actor that processes UI events and network outcomes
pub struct AppActor {
    state: AppState,
    store: Box<dyn ConfigStore>,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    /// Loads the persisted defaults once at startup
    pub fn new(
        store: Box<dyn ConfigStore>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let (config, load_error) = match store.load() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default config");
                (Default::default(), Some(e))
            }
        };

        let mut state = AppState::new(config);
        if let Some(e) = load_error {
            state.report_message("Config error", format!("{:#}", e));
        }

        AppActor {
            state,
            store,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut outcome_rx: mpsc::UnboundedReceiver<DispatchOutcome>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(outcome) = outcome_rx.recv() => {
                    self.state.handle_outcome(outcome);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Newline => self.state.enter_char('\n'),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Request actions
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::FormatJson => self.state.format_current_json(),
            UiEvent::InsertTemplate => self.insert_template(),
            UiEvent::SendRequest => {
                // Stop editing first if in URL panel
                self.state.stop_editing();
                if let Some(cmd) = self.state.prepare_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Auth
            UiEvent::CycleAuth => self.state.cycle_auth(),
            UiEvent::NextAuthField => self.state.next_auth_field(),

            // Response views
            UiEvent::CycleResponseView => self.state.cycle_response_view(),
            UiEvent::Visualize => self.state.visualize(),

            // Config
            UiEvent::SaveConfig => self.save_config(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissNotification => self.state.dismiss_notification(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    /// Templates are re-read so edits to the config file show up
    fn insert_template(&mut self) {
        let templates = match self.store.load() {
            Ok(config) => config.templates,
            Err(e) => {
                tracing::warn!(error = %e, "Using cached templates");
                self.state.templates.clone()
            }
        };
        self.state.insert_next_template(templates);
    }

    fn save_config(&mut self) {
        let mut config = self.state.to_config();
        // Keep whatever templates are on disk
        if let Ok(existing) = self.store.load() {
            config.templates = existing.templates;
        }

        match self.store.save(&config) {
            Ok(()) => {
                tracing::info!("Config saved");
                self.state.status_message = Some("Config saved".to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Config save failed");
                self.state.report_message("Config error", format!("{:#}", e));
            }
        }
    }
}
