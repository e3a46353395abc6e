pub mod form;
pub mod input;
pub mod types;
pub mod view;

use std::sync::Arc;

use crate::app_state::{AppState, StateCommand};
use crate::error::ErrorSeverity;
use crate::{AppEvent, EventBus, EventPriority};
use bugledger_store::BugRecord;
use color_eyre::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use form::FormState;
use futures::{FutureExt, StreamExt};
use input::keymap::{Action, to_action};
use ratatui::DefaultTerminal;
use tokio::sync::{broadcast, mpsc};
use types::Pane;
use view::ViewModel;
use view::components::status_line::{StatusKind, StatusMessage};

#[derive(Debug)]
pub struct App {
    running: bool,
    state: Arc<AppState>,
    cmd_tx: mpsc::Sender<StateCommand>,
    event_rx: broadcast::Receiver<AppEvent>,
    pub form: FormState,
    pub pane: Pane,
    selected: Option<usize>,
    /// Length of the list as last reported by the state manager.
    list_len: usize,
    /// Commands sent whose outcome (`ListRefreshed` or `Error`) has not
    /// arrived yet. Mutations wait for this to reach zero, so a list index is
    /// never sent against a store that has already been renumbered.
    in_flight: usize,
    status: Option<StatusMessage>,
    clear_form_on_submit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn new(
        state: Arc<AppState>,
        cmd_tx: mpsc::Sender<StateCommand>,
        event_bus: &EventBus,
        clear_form_on_submit: bool,
    ) -> Self {
        Self {
            running: true,
            state,
            cmd_tx,
            event_rx: event_bus.subscribe(EventPriority::Realtime),
            form: FormState::default(),
            pane: Pane::default(),
            selected: None,
            list_len: 0,
            in_flight: 0,
            status: None,
            clear_form_on_submit,
            needs_redraw: true,
        }
    }

    fn send_cmd(&mut self, cmd: StateCommand) -> bool {
        // Use try_send to prevent the UI from blocking
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {
                self.in_flight += 1;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to send command: {}", e);
                false
            }
        }
    }

    /// True while an earlier command has not been answered yet.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut crossterm_events = crossterm::event::EventStream::new();

        // Initial load on mount.
        self.status = Some(StatusMessage::busy("Loading bugs..."));
        self.send_cmd(StateCommand::FetchAll);

        while self.running {
            if self.needs_redraw {
                // Snapshot the list so the lock is not held while drawing.
                let guard = self.state.bugs.read().await;
                let records: Vec<BugRecord> = guard.records().to_vec();
                let loaded = guard.is_loaded();
                drop(guard);
                self.list_len = records.len();
                self.clamp_selection();

                terminal.draw(|frame| {
                    let vm = ViewModel {
                        form: &self.form,
                        bugs: &records,
                        loaded,
                        selected: self.selected,
                        pane: self.pane,
                        status: self.status.as_ref(),
                    };
                    view::render(frame, &vm)
                })?;
                self.needs_redraw = false;
            }

            tokio::select! {
                // Prioritize Ui responsiveness
                biased;

                maybe_event = crossterm_events.next().fuse() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key_event))) => {
                            self.on_key_event(key_event);
                            self.needs_redraw = true;
                        }
                        Some(Ok(Event::Resize(_, _))) => self.needs_redraw = true,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => tracing::warn!("terminal event error: {}", e),
                        None => self.running = false,
                    }
                }

                app_event = self.event_rx.recv() => {
                    match app_event {
                        Ok(event) => self.on_app_event(event),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            // Outcomes may have been dropped; start over from a fresh fetch.
                            tracing::warn!("UI lagged behind {} app events; re-fetching", n);
                            self.in_flight = 0;
                            self.send_cmd(StateCommand::FetchAll);
                            self.needs_redraw = true;
                        }
                        Err(broadcast::error::RecvError::Closed) => self.running = false,
                    }
                }
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = to_action(self.pane, self.form.focus, key) {
            self.handle_action(action);
        }
    }

    /// Applies one realtime event from the state manager.
    pub fn on_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ListRefreshed { generation, len } => {
                tracing::trace!(generation, len, "list refreshed");
                self.in_flight = self.in_flight.saturating_sub(1);
                self.list_len = len;
                self.clamp_selection();
                let transient_shown = matches!(
                    self.status.as_ref().map(|s| s.kind),
                    Some(StatusKind::Busy | StatusKind::Info)
                );
                if transient_shown && !self.is_busy() {
                    self.status = None;
                }
            }
            AppEvent::Error(err) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match err.severity {
                    ErrorSeverity::Warning => {
                        self.status = Some(StatusMessage::warning(err.message));
                        // The list is out of date with the store; reload it.
                        self.send_cmd(StateCommand::FetchAll);
                    }
                    ErrorSeverity::Error => self.status = Some(StatusMessage::error(err.message)),
                }
            }
            AppEvent::Mutation(_) => {}
        }
        self.needs_redraw = true;
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SwitchPane => {
                self.pane = self.pane.toggle();
                if self.pane == Pane::List && self.selected.is_none() && self.list_len > 0 {
                    self.selected = Some(0);
                }
            }

            Action::FocusNextField => self.form.focus_next(),
            Action::FocusPrevField => self.form.focus_prev(),
            Action::InsertChar(c) => self.form.insert_char(c),
            Action::Backspace => self.form.backspace(),
            Action::CriticalityUp => self.form.cycle_criticality(true),
            Action::CriticalityDown => self.form.cycle_criticality(false),
            Action::ToggleDone => self.form.toggle_done(),
            Action::Submit if self.is_busy() => self.report_busy(),
            Action::Submit => {
                let draft = self.form.to_draft();
                let status = StatusMessage::busy(format!("Adding {}...", draft.bug_id));
                if self.send_cmd(StateCommand::AddBug { draft }) {
                    self.status = Some(status);
                    if self.clear_form_on_submit {
                        self.form.clear();
                    }
                }
            }

            Action::SelectPrev => {
                if self.list_len > 0 {
                    self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
                }
            }
            Action::SelectNext => {
                if self.list_len > 0 {
                    let last = self.list_len - 1;
                    self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                }
            }
            Action::SelectFirst => {
                if self.list_len > 0 {
                    self.selected = Some(0);
                }
            }
            Action::SelectLast => {
                if self.list_len > 0 {
                    self.selected = Some(self.list_len - 1);
                }
            }
            Action::DeleteSelected if self.is_busy() => self.report_busy(),
            Action::DeleteSelected => match self.selected {
                Some(index) => {
                    if self.send_cmd(StateCommand::DeleteBug { index }) {
                        self.status = Some(StatusMessage::busy(format!("Deleting #{index}...")));
                    }
                }
                None => self.status = Some(StatusMessage::info("No bug selected")),
            },
            Action::Refresh => {
                self.status = Some(StatusMessage::busy("Refreshing..."));
                self.send_cmd(StateCommand::FetchAll);
            }
        }
    }

    fn report_busy(&mut self) {
        self.status = Some(StatusMessage::info("Still waiting on the store, try again"));
    }

    fn clamp_selection(&mut self) {
        self.selected = match (self.selected, self.list_len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) if self.pane == Pane::List => Some(0),
            (None, _) => None,
        };
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}
