use bugledger_store::BugRecord;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

const HIGHLIGHT_SYMBOL: &str = "> ";
const DESCRIPTION_PREFIX: &str = "Description: ";

/// Renders the bug list. Each record is a multi-line item:
///
/// ```text
/// ID: B1
/// Description: crash on load
/// Criticality: High
/// Done: false
/// ```
pub fn render_bug_list(
    frame: &mut Frame,
    area: Rect,
    bugs: &[BugRecord],
    loaded: bool,
    selected: Option<usize>,
    focused: bool,
) {
    let border_style = if focused {
        Style::new().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::bordered()
        .title(format!(" Bugs ({}) ", bugs.len()))
        .border_style(border_style);

    if bugs.is_empty() {
        let msg = if loaded {
            "No bugs recorded."
        } else {
            "Loading bugs..."
        };
        frame.render_widget(Paragraph::new(msg).block(block), area);
        return;
    }

    let desc_width = area
        .width
        .saturating_sub(2 + HIGHLIGHT_SYMBOL.len() as u16 + DESCRIPTION_PREFIX.len() as u16)
        .max(1) as usize;

    let items: Vec<ListItem> = bugs
        .iter()
        .map(|bug| ListItem::new(record_lines(bug, desc_width)))
        .collect();

    let highlight = if focused {
        Style::new().add_modifier(Modifier::REVERSED)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn record_lines(bug: &BugRecord, desc_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!("ID: {}", bug.bug_id))];

    let wrapped = textwrap::wrap(&bug.description, desc_width);
    let indent = " ".repeat(DESCRIPTION_PREFIX.len());
    if wrapped.is_empty() {
        lines.push(Line::from(DESCRIPTION_PREFIX.to_string()));
    }
    for (i, part) in wrapped.iter().enumerate() {
        let lead = if i == 0 {
            DESCRIPTION_PREFIX
        } else {
            indent.as_str()
        };
        lines.push(Line::from(format!("{lead}{part}")));
    }

    lines.push(Line::from(format!("Criticality: {}", bug.criticality_label())));
    lines.push(Line::from(format!("Done: {}", bug.is_done)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_descriptions_wrap_under_the_prefix() {
        let bug = BugRecord {
            bug_id: "B9".into(),
            description: "the quick brown fox jumps".into(),
            criticality: 0,
            is_done: false,
        };
        let lines: Vec<String> = record_lines(&bug, 10)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(lines[0], "ID: B9");
        assert!(lines[1].starts_with("Description: the quick"));
        assert!(lines[2].starts_with("             "));
        assert_eq!(lines.last().map(String::as_str), Some("Done: false"));
    }

    #[test]
    fn unknown_ordinal_renders_blank_label() {
        let bug = BugRecord {
            bug_id: "B7".into(),
            description: String::new(),
            criticality: 7,
            is_done: true,
        };
        let lines: Vec<String> = record_lines(&bug, 40)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert!(lines.contains(&"Criticality: ".to_string()));
        assert!(lines.contains(&"Done: true".to_string()));
    }
}
