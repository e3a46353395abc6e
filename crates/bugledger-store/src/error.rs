use thiserror::Error;

/// Errors that can occur while talking to the bug store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Network connectivity or the HTTP request itself failed.
    #[error("Store request failed: {message}")]
    Transport {
        message: String,
        /// Hint for diagnostics.
        is_timeout: bool,
    },

    /// A submitted transaction was never confirmed within the polling budget.
    #[error("Timed out waiting for confirmation of transaction {tx_hash}")]
    Timeout { tx_hash: String },

    /// The node or contract refused the call (validation, authorization, revert).
    #[error("Store rejected the call (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The transaction was mined but its execution reverted.
    #[error("Transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    /// The index no longer addresses a record, usually after a concurrent
    /// mutation by another client.
    #[error("Index {index} is out of range for a store holding {count} records")]
    StaleIndex { index: u64, count: u64 },

    /// The node has no account to act as the caller.
    #[error("No caller account available from the node")]
    NoAccount,

    /// The store answered with data this client cannot interpret.
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Operation not supported by this store: {0}")]
    Unsupported(&'static str),
}

/// Coarse grouping of [`StoreError`] used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transient,
    Rejected,
    StaleIndex,
    Other,
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::Transport { .. } | StoreError::Timeout { .. } => FailureKind::Transient,
            StoreError::Rejected { .. } | StoreError::Reverted { .. } => FailureKind::Rejected,
            StoreError::StaleIndex { .. } => FailureKind::StaleIndex,
            StoreError::NoAccount
            | StoreError::Decode(_)
            | StoreError::InvalidAddress(_)
            | StoreError::Unsupported(_) => FailureKind::Other,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport {
            message: e.to_string(),
            is_timeout: e.is_timeout(),
        }
    }
}
