//! reqscope TUI - Actor-based API testing tool
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution, one worker per request

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use reqscope::app::AppActor;
use reqscope::constants::{LOG_FILE_NAME, REQUEST_TIMEOUT_SECS};
use reqscope::messages::ui_events::{key_to_ui_event, AuthField, InputMode, Panel, ResponseView};
use reqscope::messages::{DispatchOutcome, NetworkCommand, RenderState, UiEvent};
use reqscope::models::AuthMode;
use reqscope::network::{Dispatcher, NetworkActor, ReqwestTransport};
use reqscope::storage::JsonFileStore;
use reqscope::ui::{self, bar_chart, highlight_json, method_color, status_color, tree_lines};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!("Starting reqscope");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<DispatchOutcome>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let dispatcher = Dispatcher::new(ReqwestTransport::new(), outcome_tx);
    tokio::spawn(NetworkActor::new(dispatcher).run(net_cmd_rx));

    // Spawn app actor
    let store = JsonFileStore::default_location();
    tracing::info!(path = %store.path().display(), "Using config file");
    let app_actor = AppActor::new(Box::new(store), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, outcome_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.notification.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Method + URL
            Constraint::Length(10), // Headers / Body / Auth
            Constraint::Min(5),     // Response
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_url_bar(f, state, chunks[0]);
    draw_middle_panels(f, state, chunks[1]);
    draw_response(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(notification) = &state.notification {
        draw_notification_popup(f, &notification.title, &notification.message, area);
    }
}

fn border_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Place the terminal cursor inside a bordered block
fn place_cursor(f: &mut Frame, state: &RenderState, panel: Panel, area: Rect, offset: (u16, u16), scroll: u16) {
    if state.active_panel != panel || state.input_mode != InputMode::Editing {
        return;
    }
    let Some((line, col)) = state.cursor else {
        return;
    };

    let line = (line as u16 + offset.0).saturating_sub(scroll);
    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    let cursor_x = (area.x + 1 + offset.1 + col as u16).min(max_x);
    let cursor_y = (area.y + 1 + line).min(max_y);
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mcolor = method_color(state.method.as_str());

    let loading = if state.in_flight > 0 {
        format!(" [{} in flight]", state.in_flight)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Url))
        .title(format!(" {}{} ", state.method.as_str(), loading))
        .title_style(Style::default().fg(mcolor).bold());

    let input = Paragraph::new(state.url.as_str()).block(block);
    f.render_widget(input, area);

    place_cursor(f, state, Panel::Url, area, (0, 0), 0);
}

fn draw_middle_panels(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tab_titles = vec!["Headers", "Body", "Auth"];
    let selected_tab = match state.active_panel {
        Panel::Headers => 0,
        Panel::Auth => 2,
        _ => 1,
    };

    let tabs = ui::render_tabs(&tab_titles, selected_tab);
    f.render_widget(tabs, tabs_area[0]);

    let content_area = tabs_area[1];
    match state.active_panel {
        Panel::Headers => draw_json_panel(f, state, Panel::Headers, " Headers (JSON, f:format) ", &state.headers, content_area),
        Panel::Auth => draw_auth_panel(f, state, content_area),
        _ => draw_json_panel(f, state, Panel::Body, " Body (JSON, f:format, T:template) ", &state.body, content_area),
    }
}

fn draw_json_panel(f: &mut Frame, state: &RenderState, panel: Panel, title: &str, text: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, panel))
        .title(title.to_string());

    let paragraph = Paragraph::new(highlight_json(text)).block(block);
    f.render_widget(paragraph, area);

    place_cursor(f, state, panel, area, (0, 0), 0);
}

fn draw_auth_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let active = Style::default().fg(Color::Yellow).bold();
    let label_style = |field: AuthField| {
        if state.auth_field == field && state.input_mode == InputMode::Editing {
            active
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let (lines, offset) = match state.auth_mode {
        AuthMode::None => (
            vec![Line::from(Span::styled(
                "No authentication. Press 't' to cycle auth type.",
                Style::default().fg(Color::DarkGray),
            ))],
            (0, 0),
        ),
        AuthMode::Basic => {
            let lines = vec![
                Line::from(vec![
                    Span::styled("Username: ", label_style(AuthField::Username)),
                    Span::raw(state.username.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Password: ", label_style(AuthField::Password)),
                    Span::raw("*".repeat(state.password_len)),
                ]),
            ];
            let line = if state.auth_field == AuthField::Password { 1 } else { 0 };
            (lines, (line, 10))
        }
        AuthMode::Bearer => (
            vec![Line::from(vec![
                Span::styled("Token: ", label_style(AuthField::Token)),
                Span::raw(state.token.clone()),
            ])],
            (0, 7),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Auth))
        .title(format!(" Auth: {} (t:cycle, Tab:field) ", state.auth_mode.as_str()));

    f.render_widget(Paragraph::new(lines).block(block), area);

    if state.auth_mode != AuthMode::None {
        place_cursor(f, state, Panel::Auth, area, offset, 0);
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let status_text = match state.status_code {
        Some(code) => {
            let color = status_color(code);
            Span::styled(format!(" {} ", code), Style::default().fg(color).bold())
        }
        None => Span::raw(" Response "),
    };

    let time_text = if state.status_code.is_some() {
        format!(" {}ms ", state.time_ms)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Response))
        .title(Line::from(vec![
            status_text,
            Span::styled(
                format!("[{}] ", state.response_view.title()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .title_bottom(Line::from(time_text).right_aligned());

    match state.response_view {
        ResponseView::Raw => {
            let lines = highlight_json(&state.response_text);
            let response = Paragraph::new(lines)
                .block(block)
                .scroll((state.response_scroll, 0));
            f.render_widget(response, area);
            place_cursor(f, state, Panel::Response, area, (0, 0), state.response_scroll);
        }
        ResponseView::Tree => {
            let lines = if state.tree_rows.is_empty() {
                vec![Line::from(Span::styled(
                    "No tree. Send a request with a JSON response.",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                tree_lines(&state.tree_rows)
            };
            let tree = Paragraph::new(lines)
                .block(block)
                .scroll((state.response_scroll, 0));
            f.render_widget(tree, area);
        }
        ResponseView::Chart => match &state.chart {
            Some(dataset) if !dataset.is_empty() => {
                f.render_widget(bar_chart(dataset, block, area.width), area);
            }
            _ => {
                let hint = Paragraph::new(
                    "Press 'g' to chart a JSON object whose values are all numbers.",
                )
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
                f.render_widget(hint, area);
            }
        },
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if let Some(message) = &state.status_message {
        format!(" {} ", message)
    } else if state.in_flight > 0 {
        format!(" Sending... (timeout {}s) ", REQUEST_TIMEOUT_SECS)
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:newline/send ".to_string()
    } else {
        " Tab:panel | e:edit | m:method | s:send | v:view | g:chart | ?:help | q:quit ".to_string()
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 REQSCOPE - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll response

 REQUEST
   m                  Cycle HTTP method
   s                  Send request
   e / Enter          Edit current field
   f                  Format JSON (Headers/Body)
   T                  Insert next template (Body)

 AUTH
   t                  Cycle auth type (None/Basic/Bearer)
   Tab                Switch username/password while editing

 RESPONSE
   v                  Cycle Raw / Tree / Chart
   g                  Chart the response

 GENERAL
   Ctrl+S             Save current request as defaults
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_notification_popup(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let popup_area = centered_rect(60, 25, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", title))
        .title_bottom(Line::from(" any key to dismiss ").right_aligned())
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message.to_string())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
