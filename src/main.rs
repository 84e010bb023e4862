// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! traffic-ipfs — push traffic / event JSON payloads into a local IPFS node.
//!
//! Usage:
//!   traffic-ipfs store --shape traffic                     # traffic_data.json → localhost:5004
//!   traffic-ipfs store --shape event                       # test_data.json    → localhost:5006
//!   traffic-ipfs store --config ingest.toml --ledger cids.json
//!   traffic-ipfs check --input traffic_data.json           # parse + echo, no upload
//!   traffic-ipfs history --ledger cids.json --shape event

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use traffic_ipfs::config::Config;
use traffic_ipfs::error::IngestError;
use traffic_ipfs::ledger::CidLedger;
use traffic_ipfs::pipeline::{self, Pipeline};
use traffic_ipfs::record::RecordShape;
use traffic_ipfs::storage::ipfs::IpfsStore;
use traffic_ipfs::storage::memory::MemoryStore;

#[derive(Parser)]
#[command(name = "traffic-ipfs", about = "Store traffic and event payloads in IPFS", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse the payload and upload its raw bytes.
    Store {
        #[command(flatten)]
        source: SourceArgs,
        /// Storage daemon address (`host:port` or URL).
        #[arg(long)]
        endpoint: Option<String>,
        /// Append the resulting CID to this JSON ledger.
        #[arg(long)]
        ledger: Option<PathBuf>,
        /// Hash in memory (SHA-256) instead of contacting a daemon.
        #[arg(long)]
        offline: bool,
    },
    /// Parse and print the payload without uploading it.
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List CIDs recorded in a ledger.
    History {
        #[arg(long)]
        ledger: PathBuf,
        #[arg(long, value_enum, default_value_t = RecordShape::Traffic)]
        shape: RecordShape,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Record layout; selects default input path and endpoint.
    #[arg(long, value_enum)]
    shape: Option<RecordShape>,
    /// Input JSON file.
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl SourceArgs {
    fn resolve(&self) -> Result<Config, IngestError> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::for_shape(self.shape.unwrap_or_default()),
        };
        if let Some(shape) = self.shape {
            cfg.input.shape = shape;
        }
        if let Some(input) = &self.input {
            cfg = cfg.with_input(input);
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        // Filtered-out logging must not swallow the failure.
        if tracing::enabled!(Level::ERROR) {
            error!(error = %format!("{e:#}"), "Run failed");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(exit_code(&e));
    }
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Store { source, endpoint, ledger, offline } => {
            let mut cfg = source.resolve()?;
            if let Some(endpoint) = endpoint {
                cfg = cfg.with_endpoint(endpoint);
            }
            if let Some(ledger) = ledger {
                cfg = cfg.with_ledger(ledger);
            }
            cfg.validate()?;
            run_store(cfg, offline).await
        }
        Command::Check { source } => {
            let cfg = source.resolve()?;
            cfg.validate()?;
            let payload = pipeline::check(&cfg, std::io::stdout())?;
            info!(records = payload.len(), "Payload is well-formed");
            Ok(())
        }
        Command::History { ledger, shape } => {
            let ledger = CidLedger::new(ledger);
            let entries = ledger
                .entries(shape.kind())
                .with_context(|| format!("loading ledger {:?}", ledger.path()))?;
            println!("=== {} CIDs ({}) ===", shape.kind(), entries.len());
            for entry in entries {
                println!("{}  {}", entry.stored_at.to_rfc3339(), entry.cid);
            }
            Ok(())
        }
    }
}

async fn run_store(cfg: Config, offline: bool) -> anyhow::Result<()> {
    let outcome = if offline {
        info!("Offline mode: hashing payload in memory");
        Pipeline::new(cfg, MemoryStore::new()).run(std::io::stdout()).await?
    } else {
        let store = IpfsStore::new(cfg.storage_url()?)?;
        info!(endpoint = %store.base_url(), "Using IPFS daemon");
        Pipeline::new(cfg, store).run(std::io::stdout()).await?
    };
    info!(cid = %outcome.address, records = outcome.records, "Done");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<IngestError>().map_or(1, IngestError::exit_code)
}
