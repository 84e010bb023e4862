//! Configuration tests: shape defaults, TOML loading, validation.

use std::path::Path;

use traffic_ipfs::config::Config;
use traffic_ipfs::error::IngestError;
use traffic_ipfs::record::RecordShape;

fn assert_config_err(result: Result<Config, IngestError>) {
    match result {
        Err(IngestError::Config(_)) => {}
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_shape_defaults() {
    let traffic = Config::for_shape(RecordShape::Traffic);
    assert_eq!(traffic.input.path, Path::new("traffic_data.json"));
    assert_eq!(traffic.endpoint(), "localhost:5004");
    assert!(traffic.ledger.is_none());

    let events = Config::for_shape(RecordShape::Event);
    assert_eq!(events.input.path, Path::new("test_data.json"));
    assert_eq!(events.endpoint(), "localhost:5006");

    assert_eq!(Config::default().shape(), RecordShape::Traffic);
}

#[test]
fn test_overrides() {
    let cfg = Config::for_shape(RecordShape::Event)
        .with_input("data/events.json")
        .with_endpoint("127.0.0.1:5001")
        .with_ledger("cids.json");
    assert_eq!(cfg.input.path, Path::new("data/events.json"));
    assert_eq!(cfg.endpoint(), "127.0.0.1:5001");
    assert_eq!(cfg.ledger.as_ref().map(|l| l.path.as_path()), Some(Path::new("cids.json")));
    assert_eq!(cfg.shape(), RecordShape::Event);
    cfg.validate().expect("valid");
}

#[test]
fn test_storage_url_normalisation() {
    let url = Config::default().storage_url().expect("url");
    assert_eq!(url.as_str(), "http://localhost:5004/");

    let url = Config::default().with_endpoint("https://ipfs.local:5001").storage_url().expect("url");
    assert_eq!(url.scheme(), "https");
    assert_eq!(url.port(), Some(5001));

    assert!(matches!(
        Config::default().with_endpoint("ftp://host:21").storage_url(),
        Err(IngestError::Config(_))
    ));
}

#[test]
fn test_minimal_toml_uses_shape_endpoint() {
    let cfg = Config::from_toml(
        r#"
        [input]
        path = "events.json"
        shape = "event"
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.shape(), RecordShape::Event);
    assert_eq!(cfg.endpoint(), "localhost:5006");
    assert!(cfg.ledger.is_none());
}

#[test]
fn test_full_toml() {
    let cfg = Config::from_toml(
        r#"
        [input]
        path = "traffic.json"

        [storage]
        endpoint = "10.0.0.2:5001"

        [ledger]
        path = "out/cids.json"
        "#,
    )
    .expect("parse");
    assert_eq!(cfg.shape(), RecordShape::Traffic);
    assert_eq!(cfg.endpoint(), "10.0.0.2:5001");
    assert_eq!(cfg.storage_url().expect("url").host_str(), Some("10.0.0.2"));
    assert_eq!(cfg.ledger.expect("ledger").path, Path::new("out/cids.json"));
}

#[test]
fn test_invalid_toml_rejected() {
    assert_config_err(Config::from_toml("[input"));
    // Missing [input].
    assert_config_err(Config::from_toml("[storage]\nendpoint = \"localhost:5004\"\n"));
    // Unknown shape.
    assert_config_err(Config::from_toml("[input]\npath = \"a.json\"\nshape = \"weather\"\n"));
}

#[test]
fn test_validation_rejects_empty_values() {
    assert_config_err(Config::from_toml("[input]\npath = \"\"\n"));
    assert_config_err(Config::from_toml(
        "[input]\npath = \"a.json\"\n[storage]\nendpoint = \"  \"\n",
    ));
    assert_config_err(Config::from_toml(
        "[input]\npath = \"a.json\"\n[ledger]\npath = \"\"\n",
    ));
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("ingest.toml");
    std::fs::write(&path, "[input]\npath = \"test_data.json\"\nshape = \"event\"\n").expect("write");

    let cfg = Config::from_file(&path).expect("load");
    assert_eq!(cfg.shape(), RecordShape::Event);

    assert_config_err(Config::from_file(&dir.path().join("missing.toml")));
}
