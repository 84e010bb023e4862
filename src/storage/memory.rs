// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! In-process content store keyed by SHA-256 of the payload.
//!
//! Used for `--offline` runs, where no daemon is reachable, and as a
//! deterministic collaborator in tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::storage::{ContentAddress, ContentStore};

/// Prefix marking addresses produced by this store.
pub const ADDRESS_PREFIX: &str = "sha256-";

/// Cloneable handle; clones share the same blob map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Arc<RwLock<HashMap<ContentAddress, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address `data` would be stored under.
    pub fn address_of(data: &[u8]) -> ContentAddress {
        let digest = Sha256::digest(data);
        ContentAddress::new(format!("{ADDRESS_PREFIX}{}", hex::encode(digest)))
    }

    pub fn get(&self, address: &ContentAddress) -> Option<Vec<u8>> {
        self.blobs.read().get(address).cloned()
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl ContentStore for MemoryStore {
    async fn store(&self, data: Vec<u8>) -> Result<ContentAddress> {
        let address = Self::address_of(&data);
        debug!(cid = %address, bytes = data.len(), "Stored in memory");
        self.blobs.write().entry(address.clone()).or_insert(data);
        Ok(address)
    }
}
