//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Newline,
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    SendRequest,
    CycleMethod,
    FormatJson,
    InsertTemplate,

    // Auth
    CycleAuth,
    NextAuthField,

    // Response views
    CycleResponseView,
    Visualize,

    // Config
    SaveConfig,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissNotification,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Url,
    Headers,
    Body,
    Auth,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Auth,
            Panel::Auth => Panel::Response,
            Panel::Response => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Response,
            Panel::Headers => Panel::Url,
            Panel::Body => Panel::Headers,
            Panel::Auth => Panel::Body,
            Panel::Response => Panel::Auth,
        }
    }

    /// Panels whose text spans several lines
    pub fn is_multiline(&self) -> bool {
        matches!(self, Panel::Headers | Panel::Body | Panel::Response)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Auth editing field
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AuthField {
    Username,
    Password,
    Token,
}

/// Representation shown in the response panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ResponseView {
    #[default]
    Raw,
    Tree,
    Chart,
}

impl ResponseView {
    pub fn next(&self) -> ResponseView {
        match self {
            ResponseView::Raw => ResponseView::Tree,
            ResponseView::Tree => ResponseView::Chart,
            ResponseView::Chart => ResponseView::Raw,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResponseView::Raw => "Raw",
            ResponseView::Tree => "Tree",
            ResponseView::Chart => "Chart",
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_notification: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::SaveConfig),
            _ => {}
        }
    }

    // Popups swallow the next key
    if show_notification {
        return Some(UiEvent::DismissNotification);
    }
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('t') if active_panel == Panel::Auth => Some(UiEvent::CycleAuth),
            KeyCode::Char('f') if matches!(active_panel, Panel::Headers | Panel::Body) => {
                Some(UiEvent::FormatJson)
            }
            KeyCode::Char('T') if active_panel == Panel::Body => Some(UiEvent::InsertTemplate),
            KeyCode::Char('v') => Some(UiEvent::CycleResponseView),
            KeyCode::Char('g') => Some(UiEvent::Visualize),
            KeyCode::Up => Some(UiEvent::ScrollUp),
            KeyCode::Down => Some(UiEvent::ScrollDown),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Tab if active_panel == Panel::Auth => Some(UiEvent::NextAuthField),
            KeyCode::Tab if active_panel.is_multiline() => Some(UiEvent::CharInput(' ')),
            KeyCode::Enter => match active_panel {
                Panel::Url => Some(UiEvent::SendRequest),
                p if p.is_multiline() => Some(UiEvent::Newline),
                _ => Some(UiEvent::StopEditing),
            },
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let ev = |code, panel| key_to_ui_event(press(code), panel, InputMode::Normal, false, false);
        assert_eq!(ev(KeyCode::Char('s'), Panel::Url), Some(UiEvent::SendRequest));
        assert_eq!(ev(KeyCode::Char('t'), Panel::Auth), Some(UiEvent::CycleAuth));
        assert_eq!(ev(KeyCode::Char('t'), Panel::Body), None);
        assert_eq!(ev(KeyCode::Char('f'), Panel::Headers), Some(UiEvent::FormatJson));
        assert_eq!(ev(KeyCode::Char('T'), Panel::Body), Some(UiEvent::InsertTemplate));
        assert_eq!(ev(KeyCode::Char('g'), Panel::Response), Some(UiEvent::Visualize));
    }

    #[test]
    fn test_enter_while_editing_depends_on_panel() {
        let ev = |panel| key_to_ui_event(press(KeyCode::Enter), panel, InputMode::Editing, false, false);
        assert_eq!(ev(Panel::Url), Some(UiEvent::SendRequest));
        assert_eq!(ev(Panel::Body), Some(UiEvent::Newline));
        assert_eq!(ev(Panel::Auth), Some(UiEvent::StopEditing));
    }

    #[test]
    fn test_popups_take_priority() {
        let ev = key_to_ui_event(press(KeyCode::Char('s')), Panel::Url, InputMode::Normal, true, true);
        assert_eq!(ev, Some(UiEvent::DismissNotification));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(ctrl_c, Panel::Url, InputMode::Editing, true, false),
            Some(UiEvent::Quit)
        );
    }
}
