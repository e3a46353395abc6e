use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Severity of a bug as understood by the contract (`enum { Low, Medium, High }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Criticality {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Criticality {
    pub const ALL: [Criticality; 3] = [Criticality::Low, Criticality::Medium, Criticality::High];

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Criticality::Low),
            1 => Some(Criticality::Medium),
            2 => Some(Criticality::High),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Criticality::Low => "Low",
            Criticality::Medium => "Medium",
            Criticality::High => "High",
        }
    }

    /// Next level, wrapping from High back to Low.
    pub fn next(self) -> Self {
        match self {
            Criticality::Low => Criticality::Medium,
            Criticality::Medium => Criticality::High,
            Criticality::High => Criticality::Low,
        }
    }

    /// Previous level, wrapping from Low to High.
    pub fn prev(self) -> Self {
        match self {
            Criticality::Low => Criticality::High,
            Criticality::Medium => Criticality::Low,
            Criticality::High => Criticality::Medium,
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a raw criticality ordinal. Unknown ordinals render as an
/// empty label instead of failing.
pub fn criticality_label(ordinal: u8) -> &'static str {
    Criticality::from_ordinal(ordinal)
        .map(Criticality::label)
        .unwrap_or("")
}

/// A bug as read back from the store.
///
/// `criticality` keeps the raw ordinal the store returned, so a value the
/// client does not know about still reaches the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugRecord {
    pub bug_id: String,
    pub description: String,
    pub criticality: u8,
    pub is_done: bool,
}

impl BugRecord {
    pub fn criticality_label(&self) -> &'static str {
        criticality_label(self.criticality)
    }
}

impl From<BugDraft> for BugRecord {
    fn from(draft: BugDraft) -> Self {
        Self {
            bug_id: draft.bug_id,
            description: draft.description,
            criticality: draft.criticality.ordinal(),
            is_done: draft.is_done,
        }
    }
}

/// Fields of a record about to be submitted to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BugDraft {
    pub bug_id: String,
    pub description: String,
    pub criticality: Criticality,
    pub is_done: bool,
}

impl BugDraft {
    pub fn new(
        bug_id: impl Into<String>,
        description: impl Into<String>,
        criticality: Criticality,
        is_done: bool,
    ) -> Self {
        Self {
            bug_id: bug_id.into(),
            description: description.into(),
            criticality,
            is_done,
        }
    }
}

/// 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl FromStr for Address {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 40 {
            return Err(StoreError::InvalidAddress(s.to_string()));
        }
        let bytes = crate::abi::decode_hex(digits)
            .map_err(|_| StoreError::InvalidAddress(s.to_string()))?;
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Address(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::abi::encode_hex(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
