/*!
Key mapping for the TUI.

Translates low-level KeyEvent inputs into high-level Actions. The App matches
on `Action` in a single handler, which keeps `App::on_key_event` small and
makes the bindings testable without a terminal.
*/

use crate::app::types::{FormField, Pane};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// High-level actions produced by the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // App lifecycle
    Quit,
    SwitchPane,

    // Form editing
    FocusNextField,
    FocusPrevField,
    InsertChar(char),
    Backspace,
    CriticalityUp,
    CriticalityDown,
    ToggleDone,
    Submit,

    // List
    SelectPrev,
    SelectNext,
    SelectFirst,
    SelectLast,
    DeleteSelected,
    Refresh,
}

/// Map a KeyEvent to an Action for the focused pane and form field.
/// Returns None for unmapped keys.
pub fn to_action(pane: Pane, field: FormField, key: KeyEvent) -> Option<Action> {
    // Global bindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => return Some(Action::SwitchPane),
        KeyCode::Esc if pane == Pane::Form => return Some(Action::SwitchPane),
        _ => {}
    }

    match pane {
        Pane::Form => form_action(field, key),
        Pane::List => list_action(key),
    }
}

fn form_action(field: FormField, key: KeyEvent) -> Option<Action> {
    let plain = key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT;
    if !plain {
        return None;
    }
    match (field, key.code) {
        (_, KeyCode::Enter) => Some(Action::Submit),
        (_, KeyCode::Down) => Some(Action::FocusNextField),
        (_, KeyCode::Up) => Some(Action::FocusPrevField),

        (FormField::Criticality, KeyCode::Right | KeyCode::Char('l')) => {
            Some(Action::CriticalityUp)
        }
        (FormField::Criticality, KeyCode::Left | KeyCode::Char('h')) => {
            Some(Action::CriticalityDown)
        }
        (FormField::Done, KeyCode::Char(' ') | KeyCode::Char('x')) => Some(Action::ToggleDone),

        (f, KeyCode::Char(c)) if f.is_text() => Some(Action::InsertChar(c)),
        (f, KeyCode::Backspace) if f.is_text() => Some(Action::Backspace),
        _ => None,
    }
}

fn list_action(key: KeyEvent) -> Option<Action> {
    if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
        return None;
    }
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::SelectFirst),
        KeyCode::Char('G') | KeyCode::End => Some(Action::SelectLast),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('i') | KeyCode::Char('a') => Some(Action::SwitchPane),
        _ => None,
    }
}
