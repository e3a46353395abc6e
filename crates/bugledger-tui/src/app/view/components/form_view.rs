use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::app::form::FormState;
use crate::app::types::FormField;

/// Renders the new-bug form as one row of bordered inputs:
/// `Bug ID | Description... | Criticality | Done`.
pub fn render_form(frame: &mut Frame, area: Rect, form: &FormState, focused: bool) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(8),
        ])
        .split(area);

    let fields = [
        (FormField::BugId, "Bug ID", form.bug_id.clone()),
        (FormField::Description, "Description...", form.description.clone()),
        (
            FormField::Criticality,
            "Criticality",
            format!("< {} >", form.criticality),
        ),
        (
            FormField::Done,
            "Done",
            if form.is_done { "[x]" } else { "[ ]" }.to_string(),
        ),
    ];

    for ((field, title, text), cell) in fields.into_iter().zip(cells.iter()) {
        let active = focused && form.focus == field;
        let style = if active {
            Style::new().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(text.as_str())
            .block(Block::bordered().title(title).border_style(style))
            .style(style);
        frame.render_widget(widget, *cell);

        if active && field.is_text() {
            // Keep the cursor inside the box even when the text overflows.
            let inner_width = cell.width.saturating_sub(2);
            let col = (text.chars().count() as u16).min(inner_width.saturating_sub(1));
            frame.set_cursor_position((cell.x + 1 + col, cell.y + 1));
        }
    }
}
