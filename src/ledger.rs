// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! CID ledger — a small JSON file remembering every address stored so far,
//! grouped by record kind:
//!
//! ```json
//! {
//!   "event":   [{ "cid": "Qm…", "stored_at": "2026-01-01T00:00:00Z" }],
//!   "traffic": [{ "cid": "Qm…", "stored_at": "2026-01-01T00:00:05Z" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::storage::ContentAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub cid: ContentAddress,
    pub stored_at: DateTime<Utc>,
}

type LedgerMap = BTreeMap<String, Vec<LedgerEntry>>;

pub struct CidLedger {
    path: PathBuf,
}

impl CidLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `cid` under `kind`, creating the file if needed.
    ///
    /// An unparsable ledger is replaced rather than failing the run.
    pub fn record(&self, kind: &str, cid: &ContentAddress) -> Result<LedgerEntry> {
        let mut map = match self.read()? {
            Some(content) => match parse_ledger(&content) {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = ?self.path, error = %e, "CID ledger unreadable, starting a new one");
                    LedgerMap::new()
                }
            },
            None => LedgerMap::new(),
        };

        let entry = LedgerEntry { cid: cid.clone(), stored_at: Utc::now() };
        map.entry(kind.to_string()).or_default().push(entry.clone());

        let json = serde_json::to_string_pretty(&map)
            .map_err(|e| IngestError::Ledger(format!("serialize: {e}")))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| IngestError::Ledger(format!("create {parent:?}: {e}")))?;
        }
        std::fs::write(&self.path, json)
            .map_err(|e| IngestError::Ledger(format!("write {:?}: {e}", self.path)))?;

        info!(path = ?self.path, kind, cid = %cid, "CID recorded in ledger");
        Ok(entry)
    }

    /// All entries recorded under `kind`, oldest first.
    pub fn entries(&self, kind: &str) -> Result<Vec<LedgerEntry>> {
        let mut map = match self.read()? {
            Some(content) => parse_ledger(&content)
                .map_err(|e| IngestError::Ledger(format!("{:?}: {e}", self.path)))?,
            None => LedgerMap::new(),
        };
        Ok(map.remove(kind).unwrap_or_default())
    }

    /// Ledger text, or `None` when the file does not exist yet.
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(c) => Ok(Some(c)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IngestError::Ledger(format!("read {:?}: {e}", self.path))),
        }
    }
}

fn parse_ledger(content: &str) -> serde_json::Result<LedgerMap> {
    if content.trim().is_empty() {
        return Ok(LedgerMap::new());
    }
    serde_json::from_str(content)
}
