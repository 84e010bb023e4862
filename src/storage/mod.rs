// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Storage subsystem — content-addressed stores the pipeline can submit to.
//!
//! ```text
//!   raw bytes ──→ ContentStore::store ──→ ContentAddress
//!                    │
//!                    ├─ IpfsStore    (HTTP RPC to a local daemon)
//!                    └─ MemoryStore  (in-process, SHA-256)
//! ```

pub mod ipfs;
pub mod memory;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identifier returned by a store, derived from the submitted bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A service that stores bytes and returns their content address.
///
/// Implementations make a single attempt; failures are returned as-is.
pub trait ContentStore {
    fn store(&self, data: Vec<u8>) -> impl Future<Output = Result<ContentAddress>> + Send;
}
