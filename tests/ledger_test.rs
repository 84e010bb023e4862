//! CID ledger tests.

use traffic_ipfs::error::IngestError;
use traffic_ipfs::ledger::CidLedger;
use traffic_ipfs::storage::ContentAddress;

#[test]
fn test_missing_ledger_is_empty() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let ledger = CidLedger::new(dir.path().join("cids.json"));
    assert!(ledger.entries("traffic").expect("entries").is_empty());
}

#[test]
fn test_entries_grouped_by_kind_in_order() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let ledger = CidLedger::new(dir.path().join("cids.json"));

    ledger.record("traffic", &ContentAddress::new("QmA")).expect("record");
    ledger.record("event", &ContentAddress::new("QmB")).expect("record");
    ledger.record("traffic", &ContentAddress::new("QmC")).expect("record");

    let traffic: Vec<_> = ledger
        .entries("traffic")
        .expect("entries")
        .into_iter()
        .map(|e| e.cid.as_str().to_string())
        .collect();
    assert_eq!(traffic, ["QmA", "QmC"]);
    assert_eq!(ledger.entries("event").expect("entries").len(), 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ledger.path()).expect("read")).expect("json");
    assert_eq!(raw["traffic"][1]["cid"], "QmC");
    assert!(raw["event"][0]["stored_at"].is_string());
}

#[test]
fn test_corrupt_ledger_is_replaced() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("cids.json");
    std::fs::write(&path, "{ not json").expect("write");
    let ledger = CidLedger::new(&path);

    assert!(ledger.entries("traffic").is_err());
    ledger.record("traffic", &ContentAddress::new("QmFresh")).expect("record");

    let entries = ledger.entries("traffic").expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].cid.as_str(), "QmFresh");
}

#[test]
fn test_empty_file_treated_as_new() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("cids.json");
    std::fs::write(&path, "").expect("write");
    let ledger = CidLedger::new(&path);

    assert!(ledger.entries("event").expect("entries").is_empty());
    ledger.record("event", &ContentAddress::new("QmX")).expect("record");
    assert_eq!(ledger.entries("event").expect("entries").len(), 1);
}

#[test]
fn test_unwritable_ledger_is_ledger_error() {
    let dir = tempfile::tempdir().expect("create tempdir");
    // A regular file where the ledger's parent directory should be.
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").expect("write");
    let ledger = CidLedger::new(blocker.join("cids.json"));

    let err = ledger.record("traffic", &ContentAddress::new("QmA")).expect_err("must fail");
    assert!(matches!(err, IngestError::Ledger(_)), "got {err:?}");
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn test_ledger_path_is_a_directory() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let ledger = CidLedger::new(dir.path());

    let err = ledger.record("event", &ContentAddress::new("QmA")).expect_err("must fail");
    assert_eq!(err.exit_code(), 6);
    assert!(matches!(ledger.entries("event"), Err(IngestError::Ledger(_))));
}
