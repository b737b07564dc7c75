//! Traffic records.

use serde::{Deserialize, Serialize};

/// One observation: a protocol label and a packet length in bytes.
///
/// Serializes with the field names `protocol` and `length`, which are also the
/// column names of the synthetic dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub protocol: String,
    pub length: u64,
}

impl Record {
    pub fn new(protocol: impl Into<String>, length: u64) -> Self {
        Self {
            protocol: protocol.into(),
            length,
        }
    }
}

/// A record drawn from a fitted model. Same shape as [`Record`].
pub type SyntheticRecord = Record;
