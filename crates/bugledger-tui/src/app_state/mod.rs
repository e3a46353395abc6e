pub mod commands;
mod core;
mod dispatcher;
pub mod handlers;

pub use commands::StateCommand;
pub use core::{AppState, BugList};
pub use dispatcher::state_manager;

#[cfg(test)]
mod tests;
