use std::sync::Arc;

use bugledger_store::{BugDraft, BugRecord, BugStore, Criticality, MemoryBugStore, StoreError};

use super::*;
use crate::{AppEvent, EventBus, EventBusCaps, EventPriority, MutationEvent};

fn setup(records: Vec<BugRecord>) -> (Arc<MemoryBugStore>, AppState, EventBus) {
    let store = Arc::new(MemoryBugStore::with_records(records));
    let state = AppState::new(store.clone());
    (store, state, EventBus::new(EventBusCaps::default()))
}

fn record(id: &str) -> BugRecord {
    BugRecord {
        bug_id: id.to_string(),
        description: format!("{id} description"),
        criticality: 0,
        is_done: false,
    }
}

fn ids(list: &BugList) -> Vec<&str> {
    list.records().iter().map(|r| r.bug_id.as_str()).collect()
}

#[tokio::test]
async fn add_then_delete_round_trip() {
    let (store, state, bus) = setup(vec![]);

    handlers::fetch_all(&state, &bus).await.unwrap();
    assert!(state.bugs.read().await.is_empty());

    let draft = BugDraft::new("B1", "crash on load", Criticality::High, false);
    handlers::add_bug(&state, &bus, draft).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 1);
    {
        let bugs = state.bugs.read().await;
        assert_eq!(bugs.len(), 1);
        assert_eq!(bugs.records()[0].criticality_label(), "High");
    }

    handlers::delete_bug(&state, &bus, 0).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(state.bugs.read().await.is_empty());
}

#[tokio::test]
async fn list_length_tracks_store_count_after_add() {
    let (store, state, bus) = setup(vec![record("A"), record("B")]);
    handlers::add_bug(&state, &bus, BugDraft::default())
        .await
        .unwrap();
    let count = store.count().await.unwrap() as usize;
    assert_eq!(state.bugs.read().await.len(), count);
}

#[tokio::test]
async fn identical_adds_are_two_rows() {
    let (_store, state, bus) = setup(vec![]);
    let draft = BugDraft::new("dup", "same", Criticality::Medium, true);
    handlers::add_bug(&state, &bus, draft.clone()).await.unwrap();
    handlers::add_bug(&state, &bus, draft).await.unwrap();
    let bugs = state.bugs.read().await;
    assert_eq!(ids(&bugs), ["dup", "dup"]);
}

#[tokio::test]
async fn deleting_middle_row_reindexes_the_rest() {
    let (_store, state, bus) = setup(vec![record("A"), record("B"), record("C")]);
    handlers::fetch_all(&state, &bus).await.unwrap();

    handlers::delete_bug(&state, &bus, 1).await.unwrap();
    let bugs = state.bugs.read().await;
    assert_eq!(ids(&bugs), ["A", "C"]);
}

#[tokio::test]
async fn failed_mutation_leaves_list_untouched_and_skips_refetch() {
    let (store, state, bus) = setup(vec![record("A")]);
    handlers::fetch_all(&state, &bus).await.unwrap();
    let generation = state.bugs.read().await.generation();

    store
        .fail_next(StoreError::Rejected {
            code: -32000,
            message: "revert".into(),
        })
        .await;
    let err = handlers::add_bug(&state, &bus, BugDraft::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { .. }));

    let bugs = state.bugs.read().await;
    assert_eq!(ids(&bugs), ["A"]);
    assert_eq!(bugs.generation(), generation);
}

#[tokio::test]
async fn refresh_and_mutation_events_are_routed_by_priority() {
    let (_store, state, bus) = setup(vec![]);
    let mut realtime = bus.subscribe(EventPriority::Realtime);
    let mut background = bus.subscribe(EventPriority::Background);

    handlers::add_bug(&state, &bus, BugDraft::new("B1", "", Criticality::Low, false))
        .await
        .unwrap();

    match background.recv().await.unwrap() {
        AppEvent::Mutation(MutationEvent::Added { bug_id }) => assert_eq!(bug_id, "B1"),
        other => panic!("unexpected background event {other:?}"),
    }
    match realtime.recv().await.unwrap() {
        AppEvent::ListRefreshed { len, .. } => assert_eq!(len, 1),
        other => panic!("unexpected realtime event {other:?}"),
    }
}

#[test]
fn stale_generation_is_ignored() {
    let mut list = BugList::default();
    assert!(list.replace(2, vec![record("new")]));
    assert!(!list.replace(1, vec![record("old")]));
    assert_eq!(ids(&list), ["new"]);
    assert_eq!(list.generation(), 2);
    assert!(list.replace(3, vec![]));
    assert!(list.is_empty());
}

#[test]
fn first_replace_marks_list_loaded() {
    let mut list = BugList::default();
    assert!(!list.is_loaded());
    list.replace(1, vec![]);
    assert!(list.is_loaded());
}

#[test]
fn generations_increase_in_issue_order() {
    let state = AppState::new(Arc::new(MemoryBugStore::new()));
    let a = state.next_generation();
    let b = state.next_generation();
    assert!(b > a);
}
