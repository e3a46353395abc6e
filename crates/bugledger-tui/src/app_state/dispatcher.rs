use std::sync::Arc;

use bugledger_store::StoreError;
use tokio::sync::mpsc;
use tracing::{Instrument, trace_span};

use super::commands::StateCommand;
use super::core::AppState;
use super::handlers;
use crate::EventBus;
use crate::error::{ErrorExt, ErrorSeverity};

/// Applies commands one at a time, so no two store interactions from this
/// client ever overlap. Runs until every command sender is dropped.
pub async fn state_manager(
    state: Arc<AppState>,
    mut cmd_rx: mpsc::Receiver<StateCommand>,
    event_bus: Arc<EventBus>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let span = trace_span!("processing", cmd = %cmd.discriminant());
        async {
            match cmd {
                StateCommand::FetchAll => {
                    let result = handlers::fetch_all(&state, &event_bus).await;
                    report(&event_bus, "Error fetching bugs", result);
                }
                StateCommand::AddBug { draft } => {
                    let result = handlers::add_bug(&state, &event_bus, draft).await;
                    report(&event_bus, "Error adding bug", result);
                }
                StateCommand::DeleteBug { index } => {
                    let result = handlers::delete_bug(&state, &event_bus, index).await;
                    report(&event_bus, "Error deleting bug", result);
                }
            }
        }
        .instrument(span)
        .await;
    }
    tracing::debug!("command channel closed, state manager exiting");
}

/// Logs a failure and forwards it to the UI. Nothing is retried.
fn report<T>(event_bus: &EventBus, context: &str, result: Result<T, StoreError>) {
    if let Err(e) = result {
        let severity = ErrorSeverity::from(&e);
        e.emit_event(severity);
        event_bus.send_error(format!("{context}: {e}"), severity);
    }
}
