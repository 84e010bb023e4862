// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Storage daemon at {endpoint} unreachable: {reason}")]
    StorageUnavailable { endpoint: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("CID ledger error: {0}")]
    Ledger(String),
}

impl IngestError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            IngestError::Config(_) => 1,
            IngestError::Io { .. } => 2,
            IngestError::MalformedPayload(_) => 3,
            IngestError::StorageUnavailable { .. } => 4,
            IngestError::Storage(_) => 5,
            IngestError::Ledger(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
