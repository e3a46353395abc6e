//! Rendering of the whole screen from a borrowed snapshot of app state.
//!
//! Everything here is a pure function of [`ViewModel`]; the App decides what
//! goes into the snapshot and when to draw it.

pub mod components;

use bugledger_store::BugRecord;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Stylize as _;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::form::FormState;
use crate::app::types::Pane;
use components::bug_list::render_bug_list;
use components::form_view::render_form;
use components::status_line::{StatusMessage, render_help, render_status};

pub const TITLE: &str = "BugTracker";

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewModel<'a> {
    pub form: &'a FormState,
    pub bugs: &'a [BugRecord],
    /// False until the first fetch has completed.
    pub loaded: bool,
    pub selected: Option<usize>,
    pub pane: Pane,
    pub status: Option<&'a StatusMessage>,
}

pub fn render(frame: &mut Frame, vm: &ViewModel) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // form
            Constraint::Min(3),    // list
            Constraint::Length(1), // status
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(TITLE).bold());
    frame.render_widget(title, main_layout[0]);

    render_form(frame, main_layout[1], vm.form, vm.pane == Pane::Form);
    render_bug_list(
        frame,
        main_layout[2],
        vm.bugs,
        vm.loaded,
        vm.selected,
        vm.pane == Pane::List,
    );
    render_status(frame, main_layout[3], vm.status);
    render_help(frame, main_layout[4], vm.pane, vm.form.focus);
}
