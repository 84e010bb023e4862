// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Console reporter. Each block is written and flushed on its own so a
//! failure later in the run leaves the earlier blocks visible.

use std::io::Write;

use crate::error::{IngestError, Result};
use crate::record::Payload;
use crate::storage::ContentAddress;

pub const RAW_LABEL: &str = "Raw JSON Data";
pub const ADDRESS_LABEL: &str = "IPFS Hash";

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn raw(&mut self, data: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(data);
        self.line(format_args!("{RAW_LABEL}: {text}"))
    }

    pub fn records(&mut self, payload: &Payload) -> Result<()> {
        self.line(format_args!("{}: {payload}", payload.shape().label()))
    }

    pub fn address(&mut self, address: &ContentAddress) -> Result<()> {
        self.line(format_args!("{ADDRESS_LABEL}: {address}"))
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.out, "{args}")
            .and_then(|()| self.out.flush())
            .map_err(|e| IngestError::Io { path: "<stdout>".into(), source: e })
    }
}
