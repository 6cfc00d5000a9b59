//! Key mapping for the TUI
//!
//! Keys become `Action`s here; `handlers::execute_action` runs them. The
//! mapping is pure so it can be tested without a terminal.
//!
//! Bindings:
//! - `Ctrl+C` quits from any state, even with a notification open
//! - `Enter` / `Esc` dismiss an open notification; nothing else gets through
//! - `Esc` quits
//! - `Tab` cycles focus
//! - `Enter` saves the key (key field) or inserts a newline (description)
//! - `Ctrl+K` change key, `Ctrl+G` generate, `Ctrl+D` download PNG,
//!   `Ctrl+Y` copy Markdown

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::state::Focus;

/// User action derived from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    DismissNotification,
    FocusNext,
    Char(char),
    Backspace,
    Newline,
    SaveKey,
    ChangeKey,
    Generate,
    DownloadPng,
    CopyMarkdown,
    ScrollUp,
    ScrollDown,
}

/// Map a key press to an action
///
/// # Examples
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use schemascribe::ui::input::{map_key, Action};
/// use schemascribe::ui::state::Focus;
///
/// let ctrl_g = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
/// assert_eq!(map_key(ctrl_g, Focus::Description, false), Action::Generate);
/// assert_eq!(map_key(ctrl_g, Focus::Description, true), Action::None);
/// ```
pub fn map_key(key: KeyEvent, focus: Focus, modal: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if modal {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::DismissNotification,
            _ => Action::None,
        };
    }

    if ctrl {
        return match key.code {
            KeyCode::Char('k') => Action::ChangeKey,
            KeyCode::Char('g') => Action::Generate,
            KeyCode::Char('d') => Action::DownloadPng,
            KeyCode::Char('y') => Action::CopyMarkdown,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab | KeyCode::BackTab => Action::FocusNext,
        KeyCode::Enter => match focus {
            Focus::ApiKey => Action::SaveKey,
            Focus::Description => Action::Newline,
            Focus::Preview => Action::None,
        },
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Up if focus == Focus::Preview => Action::ScrollUp,
        KeyCode::Down if focus == Focus::Preview => Action::ScrollDown,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => Action::Char(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits_even_when_modal() {
        assert_eq!(map_key(ctrl('c'), Focus::ApiKey, true), Action::Quit);
        assert_eq!(map_key(ctrl('c'), Focus::Description, false), Action::Quit);
    }

    #[test]
    fn test_modal_swallows_input() {
        assert_eq!(
            map_key(key(KeyCode::Enter), Focus::ApiKey, true),
            Action::DismissNotification
        );
        assert_eq!(
            map_key(key(KeyCode::Esc), Focus::ApiKey, true),
            Action::DismissNotification
        );
        assert_eq!(map_key(key(KeyCode::Char('a')), Focus::ApiKey, true), Action::None);
        assert_eq!(map_key(ctrl('g'), Focus::Description, true), Action::None);
    }

    #[test]
    fn test_enter_depends_on_focus() {
        assert_eq!(map_key(key(KeyCode::Enter), Focus::ApiKey, false), Action::SaveKey);
        assert_eq!(
            map_key(key(KeyCode::Enter), Focus::Description, false),
            Action::Newline
        );
        assert_eq!(map_key(key(KeyCode::Enter), Focus::Preview, false), Action::None);
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(map_key(ctrl('k'), Focus::Description, false), Action::ChangeKey);
        assert_eq!(map_key(ctrl('g'), Focus::Description, false), Action::Generate);
        assert_eq!(map_key(ctrl('d'), Focus::Preview, false), Action::DownloadPng);
        assert_eq!(map_key(ctrl('y'), Focus::Preview, false), Action::CopyMarkdown);
        assert_eq!(map_key(ctrl('z'), Focus::Preview, false), Action::None);
    }

    #[test]
    fn test_plain_chars_and_navigation() {
        assert_eq!(
            map_key(key(KeyCode::Char('x')), Focus::Description, false),
            Action::Char('x')
        );
        assert_eq!(map_key(key(KeyCode::Tab), Focus::ApiKey, false), Action::FocusNext);
        assert_eq!(map_key(key(KeyCode::Esc), Focus::ApiKey, false), Action::Quit);
        assert_eq!(map_key(key(KeyCode::Up), Focus::Preview, false), Action::ScrollUp);
        assert_eq!(map_key(key(KeyCode::Up), Focus::Description, false), Action::None);
    }
}
