// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Ingestion pipeline: read → parse → store → report.
//!
//! ```text
//! input file ──read──→ raw bytes ──parse──→ Payload   (printed only)
//!                          │
//!                          └──store──→ ContentAddress ──→ stdout (+ ledger)
//! ```
//!
//! Every stage returns a `Result`; the first failure ends the run and is
//! handed back to the caller. Nothing is stored unless the payload parsed,
//! and no address is printed unless the store succeeded.

use std::io::Write;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::ledger::{CidLedger, LedgerEntry};
use crate::reader::read_payload;
use crate::record::{parse_payload, Payload, RecordShape};
use crate::report::Reporter;
use crate::storage::{ContentAddress, ContentStore};

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub shape: RecordShape,
    /// Number of top-level records in the payload.
    pub records: usize,
    /// Size of the stored payload in bytes.
    pub bytes: usize,
    pub address: ContentAddress,
    /// Ledger entry written for this run, when a ledger is configured.
    pub ledger_entry: Option<LedgerEntry>,
}

pub struct Pipeline<S> {
    config: Config,
    store: S,
}

impl<S: ContentStore> Pipeline<S> {
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full run: the raw bytes (not the parsed records) are submitted.
    pub async fn run<W: Write>(&self, out: W) -> Result<IngestOutcome> {
        let mut reporter = Reporter::new(out);
        let (data, payload) = load(&self.config, &mut reporter)?;
        let bytes = data.len();

        let address = match self.store.store(data).await {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "Storage submission failed");
                return Err(e);
            }
        };
        reporter.address(&address)?;

        let ledger_entry = match &self.config.ledger {
            Some(cfg) => Some(CidLedger::new(&cfg.path).record(self.config.shape().kind(), &address)?),
            None => None,
        };

        info!(shape = %self.config.shape(), records = payload.len(), bytes, cid = %address, "Ingestion complete");

        Ok(IngestOutcome {
            shape: self.config.shape(),
            records: payload.len(),
            bytes,
            address,
            ledger_entry,
        })
    }
}

/// Read, parse and echo the payload described by `config` without storing it.
pub fn check<W: Write>(config: &Config, out: W) -> Result<Payload> {
    let mut reporter = Reporter::new(out);
    let (_, payload) = load(config, &mut reporter)?;
    Ok(payload)
}

fn load<W: Write>(config: &Config, reporter: &mut Reporter<W>) -> Result<(Vec<u8>, Payload)> {
    let path = &config.input.path;
    let shape = config.shape();
    info!(path = ?path, shape = %shape, "Reading payload");

    let data = read_payload(path)?;
    reporter.raw(&data)?;

    let payload = parse_payload(shape, &data)?;
    info!(records = payload.len(), "Payload parsed");
    reporter.records(&payload)?;

    Ok((data, payload))
}
