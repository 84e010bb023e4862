// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{IngestError, Result};
use crate::record::RecordShape;

/// Top-level configuration, either built from shape defaults or loaded from
/// a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Input payload settings.
    pub input: InputConfig,
    /// Storage daemon settings (optional, defaults follow the shape).
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    /// CID ledger settings (optional, disabled when absent).
    #[serde(default)]
    pub ledger: Option<LedgerConfig>,
}

/// Where the payload comes from and how to read it.
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Path to the JSON payload.
    pub path: PathBuf,
    /// Record layout of the payload.
    #[serde(default)]
    pub shape: RecordShape,
}

/// Storage daemon endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// `host:port` or a full `http://` URL of the IPFS RPC API.
    pub endpoint: String,
}

/// Local ledger of stored content addresses.
#[derive(Debug, Deserialize, Clone)]
pub struct LedgerConfig {
    pub path: PathBuf,
}

fn default_input_path(shape: RecordShape) -> &'static str {
    match shape {
        RecordShape::Traffic => "traffic_data.json",
        RecordShape::Event => "test_data.json",
    }
}

fn default_endpoint(shape: RecordShape) -> &'static str {
    match shape {
        RecordShape::Traffic => "localhost:5004",
        RecordShape::Event => "localhost:5006",
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_shape(RecordShape::default())
    }
}

impl Config {
    /// Built-in defaults for a record shape.
    pub fn for_shape(shape: RecordShape) -> Self {
        Self {
            input: InputConfig { path: PathBuf::from(default_input_path(shape)), shape },
            storage: Some(StorageConfig { endpoint: default_endpoint(shape).to_string() }),
            ledger: None,
        }
    }

    /// Load configuration from a TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| IngestError::Config(format!("Cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| IngestError::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Override the input path.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input.path = path.into();
        self
    }

    /// Override the storage endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.storage = Some(StorageConfig { endpoint: endpoint.into() });
        self
    }

    /// Enable the CID ledger at `path`.
    pub fn with_ledger(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger = Some(LedgerConfig { path: path.into() });
        self
    }

    pub fn shape(&self) -> RecordShape {
        self.input.shape
    }

    /// Endpoint as written in the config, or the shape default.
    pub fn endpoint(&self) -> &str {
        match &self.storage {
            Some(s) => &s.endpoint,
            None => default_endpoint(self.input.shape),
        }
    }

    /// Base URL of the storage daemon's RPC API.
    ///
    /// A bare `host:port` is treated as plain HTTP.
    pub fn storage_url(&self) -> Result<Url> {
        let endpoint = self.endpoint().trim();
        let raw = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("http://{endpoint}")
        };
        let url = Url::parse(&raw)
            .map_err(|e| IngestError::Config(format!("Invalid storage endpoint {endpoint:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(IngestError::Config(format!(
                "Unsupported storage endpoint scheme {:?}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(IngestError::Config(format!("Storage endpoint {endpoint:?} has no host")));
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(IngestError::Config("input.path must not be empty".into()));
        }
        if self.endpoint().trim().is_empty() {
            return Err(IngestError::Config("storage.endpoint must not be empty".into()));
        }
        self.storage_url()?;
        if let Some(ledger) = &self.ledger {
            if ledger.path.as_os_str().is_empty() {
                return Err(IngestError::Config("ledger.path must not be empty".into()));
            }
        }
        Ok(())
    }
}
