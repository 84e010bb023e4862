// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Read the whole input file into memory.
///
/// The file handle is dropped before returning, on success and on error.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    let io_err = |source| IngestError::Io { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(io_err)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(io_err)?;

    debug!(path = ?path, bytes = data.len(), "Payload loaded");
    Ok(data)
}
