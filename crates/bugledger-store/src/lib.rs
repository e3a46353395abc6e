//! Client side of the bug ledger.
//!
//! The authoritative list of bugs lives in an external contract. This crate
//! only knows how to ask that contract four things (count, read by index,
//! append, delete) and how to turn its answers into plain [`BugRecord`]s.
//!
//! Two implementations of [`BugStore`] are provided:
//! - [`RpcBugStore`] speaks Ethereum JSON-RPC to a node holding the deployed
//!   contract.
//! - [`MemoryBugStore`] keeps the records in process and is used by tests and
//!   the offline mode of the TUI.

pub mod abi;
pub mod error;
pub mod memory;
pub mod rpc;
pub mod types;

pub use error::{FailureKind, StoreError};
pub use memory::MemoryBugStore;
pub use rpc::{RpcBugStore, RpcConfig};
pub use types::{Address, BugDraft, BugRecord, Criticality, criticality_label};

use async_trait::async_trait;

/// Upper bound on the records `fetch_all` reserves space for up front.
const FETCH_PREALLOC_CAP: u64 = 1024;

/// The four-operation interface of the external bug store.
///
/// Indices are positions in the store's own ordering. They are only valid
/// for `0 <= index < count()` at the time of the call, and the store is free
/// to renumber records after any mutation.
#[async_trait]
pub trait BugStore: Send + Sync + std::fmt::Debug {
    /// Number of records currently held by the store.
    async fn count(&self) -> Result<u64, StoreError>;

    /// The record at `index`.
    async fn read_at(&self, index: u64) -> Result<BugRecord, StoreError>;

    /// Appends a new record and waits until the store confirms it.
    ///
    /// Not idempotent: two identical drafts produce two records.
    async fn add(&self, draft: &BugDraft) -> Result<(), StoreError>;

    /// Removes the record at `index` and waits until the store confirms it.
    async fn delete_at(&self, index: u64) -> Result<(), StoreError>;

    /// Replaces the fields of the record at `index`.
    ///
    /// The deployed contract exposes no usable update method, so no store
    /// implements this yet.
    async fn update_at(&self, index: u64, draft: &BugDraft) -> Result<(), StoreError> {
        let _ = (index, draft);
        Err(StoreError::Unsupported("update_at"))
    }

    /// Reads the full contents of the store in index order.
    async fn fetch_all(&self) -> Result<Vec<BugRecord>, StoreError> {
        let count = self.count().await?;
        // The count comes from the store; don't trust it for allocation.
        let mut records = Vec::with_capacity(count.min(FETCH_PREALLOC_CAP) as usize);
        for index in 0..count {
            records.push(self.read_at(index).await?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Claims an absurd count and fails every read.
    #[derive(Debug)]
    struct HugeCountStore;

    #[async_trait]
    impl BugStore for HugeCountStore {
        async fn count(&self) -> Result<u64, StoreError> {
            Ok(u64::MAX)
        }

        async fn read_at(&self, index: u64) -> Result<BugRecord, StoreError> {
            Err(StoreError::Decode(format!("no record at {index}")))
        }

        async fn add(&self, _draft: &BugDraft) -> Result<(), StoreError> {
            Ok(())
        }

        async fn delete_at(&self, _index: u64) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn fetch_all_with_huge_count_returns_the_read_error() {
        let err = HugeCountStore.fetch_all().await.unwrap_err();
        assert_eq!(err, StoreError::Decode("no record at 0".into()));
    }
}
