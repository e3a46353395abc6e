use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bugledger_store::{BugRecord, BugStore};
use tokio::sync::RwLock;

/// The bug list as of the most recent successful fetch.
///
/// Only ever replaced wholesale. Position in `records` is the store index the
/// delete action addresses, so the list is never sorted or filtered here.
#[derive(Debug, Default, Clone)]
pub struct BugList {
    generation: u64,
    loaded: bool,
    records: Vec<BugRecord>,
}

impl BugList {
    pub fn records(&self) -> &[BugRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Generation of the fetch currently shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any fetch has completed yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Installs the result of fetch `generation`. Results older than the ones
    /// already shown are dropped and `false` is returned.
    pub fn replace(&mut self, generation: u64, records: Vec<BugRecord>) -> bool {
        if self.loaded && generation < self.generation {
            return false;
        }
        self.generation = generation;
        self.loaded = true;
        self.records = records;
        true
    }
}

#[derive(Debug)]
pub struct AppState {
    pub bugs: RwLock<BugList>,
    pub store: Arc<dyn BugStore>,
    fetch_counter: AtomicU64,
}

impl AppState {
    pub fn new(store: Arc<dyn BugStore>) -> Self {
        Self {
            bugs: RwLock::new(BugList::default()),
            store,
            fetch_counter: AtomicU64::new(0),
        }
    }

    /// Stamps a new fetch. Stamps increase in issue order.
    pub(crate) fn next_generation(&self) -> u64 {
        self.fetch_counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}
