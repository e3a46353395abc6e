pub mod app;
pub mod app_state;
pub mod error;
pub mod event_bus;
pub mod tracing_setup;
pub mod user_config;
pub use event_bus::*;

use std::sync::Arc;

use app::App;
use app_state::{AppState, StateCommand, state_manager};
use tokio::sync::mpsc;
use user_config::UserConfig;

/// Capacity of the UI → state manager command channel.
pub const COMMAND_CHANNEL_CAP: usize = 64;

pub async fn try_main() -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();

    let config = UserConfig::load()?;
    tracing::debug!("Config after merge: {:#?}", config);
    let store = config.build_store()?;

    let event_bus = Arc::new(EventBus::new(EventBusCaps::default()));
    let state = Arc::new(AppState::new(store));

    // Create command channel with backpressure
    let (cmd_tx, cmd_rx) = mpsc::channel::<StateCommand>(COMMAND_CHANNEL_CAP);

    tokio::spawn(state_manager(state.clone(), cmd_rx, event_bus.clone()));
    tokio::spawn(run_event_bus(Arc::clone(&event_bus)));

    let terminal = ratatui::init();
    let app = App::new(state, cmd_tx, &event_bus, config.clear_form_on_submit);
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}

/// Confirmed changes to the store made by this client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationEvent {
    Added { bug_id: String },
    Deleted { index: usize },
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    /// The bug list was replaced by the result of fetch number `generation`.
    ListRefreshed { generation: u64, len: usize },
    Mutation(MutationEvent),
    Error(ErrorEvent),
}

impl AppEvent {
    pub fn priority(&self) -> EventPriority {
        match self {
            AppEvent::ListRefreshed { .. } => EventPriority::Realtime,
            AppEvent::Error(_) => EventPriority::Realtime,
            AppEvent::Mutation(_) => EventPriority::Background,
        }
    }
}
