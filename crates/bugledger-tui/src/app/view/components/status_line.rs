use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::app::types::{FormField, Pane};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Busy,
    Warning,
    Error,
}

/// One-line message shown under the bug list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn busy(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Busy,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => Style::default(),
        StatusKind::Busy => Style::new().fg(Color::Cyan),
        StatusKind::Warning => Style::new().fg(Color::Yellow),
        StatusKind::Error => Style::new().fg(Color::Red),
    };
    frame.render_widget(Paragraph::new(status.text.as_str()).style(style), area);
}

pub fn render_help(frame: &mut Frame, area: Rect, pane: Pane, field: FormField) {
    let hints = match (pane, field) {
        (Pane::List, _) => "j/k select | d delete | r refresh | Tab form | q quit",
        (Pane::Form, FormField::Criticality) => {
            "←/→ criticality | ↑/↓ field | Enter add | Tab list | Ctrl+C quit"
        }
        (Pane::Form, FormField::Done) => {
            "Space toggle | ↑/↓ field | Enter add | Tab list | Ctrl+C quit"
        }
        (Pane::Form, _) => "type to edit | ↑/↓ field | Enter add | Tab list | Ctrl+C quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}
