//! In-process [`BugStore`] with the same index semantics as the contract.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::BugStore;
use crate::error::StoreError;
use crate::types::{BugDraft, BugRecord};

#[derive(Debug, Default)]
pub struct MemoryBugStore {
    records: RwLock<Vec<BugRecord>>,
    // Failures handed out, one per call, before any real work happens.
    injected: Mutex<VecDeque<StoreError>>,
}

impl MemoryBugStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BugRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            injected: Mutex::new(VecDeque::new()),
        }
    }

    /// Makes the next store call fail with `err`.
    pub async fn fail_next(&self, err: StoreError) {
        self.injected.lock().await.push_back(err);
    }

    /// Copy of the current contents, bypassing injected failures.
    pub async fn snapshot(&self) -> Vec<BugRecord> {
        self.records.read().await.clone()
    }

    async fn take_injected(&self) -> Result<(), StoreError> {
        match self.injected.lock().await.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn checked_index(index: u64, len: usize) -> Result<usize, StoreError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(StoreError::StaleIndex {
            index,
            count: len as u64,
        })
}

#[async_trait]
impl BugStore for MemoryBugStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.take_injected().await?;
        Ok(self.records.read().await.len() as u64)
    }

    async fn read_at(&self, index: u64) -> Result<BugRecord, StoreError> {
        self.take_injected().await?;
        let records = self.records.read().await;
        let i = checked_index(index, records.len())?;
        Ok(records[i].clone())
    }

    async fn add(&self, draft: &BugDraft) -> Result<(), StoreError> {
        self.take_injected().await?;
        self.records.write().await.push(draft.clone().into());
        Ok(())
    }

    async fn delete_at(&self, index: u64) -> Result<(), StoreError> {
        self.take_injected().await?;
        let mut records = self.records.write().await;
        let i = checked_index(index, records.len())?;
        records.remove(i);
        Ok(())
    }
}
