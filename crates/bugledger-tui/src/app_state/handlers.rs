//! Store operations as the UI sees them: every mutation is followed by a full
//! re-read of the store.

use bugledger_store::{BugDraft, StoreError};

use super::core::AppState;
use crate::{AppEvent, EventBus, MutationEvent};

/// Re-reads the store and replaces the bug list. Returns the new length.
pub async fn fetch_all(state: &AppState, event_bus: &EventBus) -> Result<usize, StoreError> {
    let generation = state.next_generation();
    let records = state.store.fetch_all().await?;
    let len = records.len();

    let applied = state.bugs.write().await.replace(generation, records);
    if applied {
        tracing::debug!(generation, len, "bug list refreshed");
        event_bus.send(AppEvent::ListRefreshed { generation, len });
    } else {
        tracing::debug!(generation, "dropping stale fetch result");
    }
    Ok(len)
}

pub async fn add_bug(
    state: &AppState,
    event_bus: &EventBus,
    draft: BugDraft,
) -> Result<(), StoreError> {
    state.store.add(&draft).await?;
    event_bus.send(AppEvent::Mutation(MutationEvent::Added {
        bug_id: draft.bug_id,
    }));
    fetch_all(state, event_bus).await.map(|_| ())
}

pub async fn delete_bug(
    state: &AppState,
    event_bus: &EventBus,
    index: usize,
) -> Result<(), StoreError> {
    state.store.delete_at(index as u64).await?;
    event_bus.send(AppEvent::Mutation(MutationEvent::Deleted { index }));
    fetch_all(state, event_bus).await.map(|_| ())
}
