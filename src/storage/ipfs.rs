// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! IPFS RPC client — submits bytes to `POST /api/v0/add` on a local daemon.
//!
//! The daemon answers with one JSON object per added entry (newline
//! delimited); for a single unnamed file the last object carries the CID:
//!
//! ```text
//! {"Name":"payload.json","Hash":"Qm…","Size":"123"}
//! ```

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{IngestError, Result};
use crate::storage::{ContentAddress, ContentStore};

const ADD_PATH: &str = "api/v0/add";
const PART_FILE_NAME: &str = "payload.json";

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DaemonError {
    #[serde(rename = "Message")]
    message: String,
}

/// Client for one IPFS daemon. No retries, no connection reuse guarantees.
#[derive(Debug, Clone)]
pub struct IpfsStore {
    client: reqwest::Client,
    base_url: Url,
    add_url: Url,
}

impl IpfsStore {
    /// Build a client for the daemon at `base_url` (e.g. `http://localhost:5004`).
    pub fn new(base_url: Url) -> Result<Self> {
        let add_url = base_url
            .join(ADD_PATH)
            .map_err(|e| IngestError::Config(format!("Invalid storage endpoint {base_url}: {e}")))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| IngestError::Config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self { client, base_url, add_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn unavailable(&self, reason: impl ToString) -> IngestError {
        IngestError::StorageUnavailable {
            endpoint: self.base_url.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl ContentStore for IpfsStore {
    async fn store(&self, data: Vec<u8>) -> Result<ContentAddress> {
        let bytes = data.len();
        let form = Form::new().part("file", Part::bytes(data).file_name(PART_FILE_NAME));

        debug!(url = %self.add_url, bytes, "Submitting payload to IPFS");
        let resp = self
            .client
            .post(self.add_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    self.unavailable(e)
                } else {
                    IngestError::Storage(format!("add request failed: {e}"))
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| IngestError::Storage(format!("cannot read add response: {e}")))?;

        if !status.is_success() {
            let reason = serde_json::from_str::<DaemonError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(IngestError::Storage(format!("daemon returned {status}: {reason}")));
        }

        let address = parse_add_response(&body)?;
        info!(cid = %address, bytes, "Payload stored");
        Ok(address)
    }
}

/// Extract the CID from an `add` response body.
fn parse_add_response(body: &str) -> Result<ContentAddress> {
    let last = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .ok_or_else(|| IngestError::Storage("empty add response".into()))?;

    let parsed: AddResponse = serde_json::from_str(last)
        .map_err(|e| IngestError::Storage(format!("unexpected add response {last:?}: {e}")))?;

    match parsed.hash {
        Some(hash) if !hash.is_empty() => Ok(ContentAddress::new(hash)),
        _ => Err(IngestError::Storage(format!("add response without hash: {last}"))),
    }
}
