use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::instrument;

use crate::{AppEvent, error::ErrorSeverity};

#[derive(Clone, Copy, Debug)]
pub enum EventPriority {
    /// Events the UI loop redraws on.
    Realtime,
    /// Bookkeeping events nobody waits on.
    Background,
}

#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub severity: ErrorSeverity,
}

#[derive(Debug)]
pub struct EventBus {
    pub realtime_tx: broadcast::Sender<AppEvent>,
    pub background_tx: broadcast::Sender<AppEvent>,
}

/// Convenience struct to help with the initialization of EventBus
#[derive(Clone, Copy)]
pub struct EventBusCaps {
    realtime_cap: usize,
    background_cap: usize,
}

impl Default for EventBusCaps {
    fn default() -> Self {
        Self {
            realtime_cap: 100,
            background_cap: 1000,
        }
    }
}

/// Drains background events into the log.
pub async fn run_event_bus(event_bus: Arc<EventBus>) {
    use broadcast::error::RecvError;
    let mut bg_rx = event_bus.subscribe(EventPriority::Background);
    loop {
        match bg_rx.recv().await {
            Ok(event) => tracing::info!(target: "bugledger_tui::audit", ?event),
            Err(RecvError::Lagged(lag)) => {
                tracing::trace!("background event channel lagging by {} messages", lag);
            }
            Err(RecvError::Closed) => {
                tracing::trace!("background event channel closed");
                break;
            }
        }
    }
}

impl EventBus {
    pub fn new(b: EventBusCaps) -> Self {
        Self {
            realtime_tx: broadcast::channel(b.realtime_cap).0,
            background_tx: broadcast::channel(b.background_cap).0,
        }
    }

    #[instrument(skip(self), level = "trace")]
    pub fn send(&self, event: AppEvent) {
        let tx = match event.priority() {
            EventPriority::Realtime => &self.realtime_tx,
            EventPriority::Background => &self.background_tx,
        };
        let _ = tx.send(event); // Ignore receiver count
    }

    pub fn send_error(&self, message: String, severity: ErrorSeverity) {
        self.send(AppEvent::Error(ErrorEvent { message, severity }));
    }

    pub fn subscribe(&self, priority: EventPriority) -> broadcast::Receiver<AppEvent> {
        match priority {
            EventPriority::Realtime => self.realtime_tx.subscribe(),
            EventPriority::Background => self.background_tx.subscribe(),
        }
    }
}
