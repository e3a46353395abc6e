use std::io::Write;
use std::time::Duration;

use bugledger_store::rpc::{DEFAULT_GAS_LIMIT, DEFAULT_RPC_URL};
use bugledger_tui::user_config::{StoreBackend, UserConfig};
use tempfile::NamedTempFile;

const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cfg = UserConfig::load_from(&dir.path().join("absent.toml")).expect("load");
    assert_eq!(cfg.store, StoreBackend::Rpc);
    assert_eq!(cfg.rpc_url, DEFAULT_RPC_URL);
    assert_eq!(cfg.gas_limit, DEFAULT_GAS_LIMIT);
    assert!(!cfg.clear_form_on_submit);
}

#[test]
fn file_values_override_defaults() {
    let file = config_file(&format!(
        r#"
rpc_url = "http://127.0.0.1:8545"
contract_address = "{CONTRACT}"
account_index = 2
receipt_poll_interval_ms = 50
clear_form_on_submit = true
"#
    ));
    let cfg = UserConfig::load_from(file.path()).expect("load");
    assert_eq!(cfg.rpc_url, "http://127.0.0.1:8545");
    assert_eq!(cfg.account_index, 2);
    assert!(cfg.clear_form_on_submit);
    // Untouched keys keep their defaults.
    assert_eq!(cfg.gas_limit, DEFAULT_GAS_LIMIT);

    let rpc = cfg.rpc_config().expect("rpc config");
    assert_eq!(rpc.url.as_str(), "http://127.0.0.1:8545/");
    assert_eq!(rpc.account_index, 2);
    assert_eq!(rpc.receipt_poll_interval, Duration::from_millis(50));
    assert_eq!(
        rpc.contract.to_string(),
        CONTRACT.to_ascii_lowercase()
    );
}

#[test]
fn memory_backend_needs_no_contract() {
    let file = config_file(r#"store = "memory""#);
    let cfg = UserConfig::load_from(file.path()).expect("load");
    assert_eq!(cfg.store, StoreBackend::Memory);
    assert!(cfg.build_store().is_ok());
}

#[test]
fn rpc_backend_without_contract_is_an_error() {
    let cfg = UserConfig::default();
    let err = cfg.build_store().expect_err("contract required");
    assert!(err.to_string().contains("contract_address"));
}

#[test]
fn malformed_contract_address_is_rejected() {
    let cfg = UserConfig {
        contract_address: Some("0x1234".into()),
        ..UserConfig::default()
    };
    assert!(cfg.rpc_config().is_err());
}

#[test]
fn malformed_rpc_url_is_rejected() {
    let cfg = UserConfig {
        rpc_url: "not a url".into(),
        contract_address: Some(CONTRACT.into()),
        ..UserConfig::default()
    };
    assert!(cfg.rpc_config().is_err());
}
