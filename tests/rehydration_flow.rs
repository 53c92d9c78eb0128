//! Integration tests for the boot-time rehydration flow
//!
//! These tests exercise the whole path a real boot takes: persisted JSON on
//! disk, a `FileStore` over it, and `AppStore::bootstrap` reconciling it with
//! the compiled-in defaults.

use emberwallet::network::CustomNetworkConfig;
use emberwallet::node::{CustomNodeConfig, NodeSelection, DEFAULT_NODE_ID, INJECTED_NODE_ID};
use emberwallet::storage::{FileStore, MemoryStore, StateStore, CONFIG_KEY, CUSTOM_TOKENS_KEY};
use emberwallet::store::{AppState, AppStore};
use emberwallet::token::CustomToken;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn token(symbol: &str) -> CustomToken {
    CustomToken {
        address: "0x0000000000000000000000000000000000000042".to_string(),
        symbol: symbol.to_string(),
        decimal: 18,
    }
}

#[test]
fn test_fresh_boot_equals_compiled_in_defaults() {
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStore::open(dir.path().join("state.json")));

    let store = AppStore::bootstrap(storage);
    assert_eq!(store.state(), AppState::default());
}

#[test]
fn test_full_session_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");

    {
        let store = AppStore::bootstrap(Arc::new(FileStore::open(&path)));
        store
            .add_custom_network(CustomNetworkConfig {
                id: "LOCAL".to_string(),
                name: "Local devnet".to_string(),
                unit: "ETH".to_string(),
                chain_id: Some(1337),
            })
            .unwrap();
        store
            .add_custom_node(CustomNodeConfig {
                id: "local".to_string(),
                name: "Local".to_string(),
                url: "http://localhost:8545".to_string(),
                network: "LOCAL".to_string(),
                auth: None,
                client: None,
            })
            .unwrap();
        store.select_node("local").unwrap();
        store.add_custom_token(token("OMG")).unwrap();
    }

    let rebooted = AppStore::bootstrap(Arc::new(FileStore::open(&path)));
    let config = rebooted.config();

    assert!(config.networks.custom_networks.contains_key("LOCAL"));
    assert_eq!(
        config.nodes.selected,
        NodeSelection::Connected {
            node_id: "local".to_string()
        }
    );
    // The connection handle is rebuilt on boot even though it was never saved.
    let node = &config.nodes.custom_nodes["local"];
    assert_eq!(
        node.client.as_ref().unwrap().endpoint,
        "http://localhost:8545"
    );
    assert_eq!(rebooted.custom_tokens(), vec![token("OMG")]);
}

#[test]
fn test_deleted_network_orphans_node_and_selection() {
    // A snapshot whose custom node and selection both point at a network that
    // no longer exists: the node is dropped and the selection reverts.
    let storage = MemoryStore::new();
    storage
        .save(
            CONFIG_KEY,
            &json!({
                "networks": {
                    "custom_networks": {},
                    "selected_network": "ETH"
                },
                "nodes": {
                    "custom_nodes": {
                        "orphan": {
                            "id": "orphan",
                            "name": "Orphan",
                            "url": "http://localhost:8545",
                            "network": "DELETED",
                            "auth": null
                        }
                    },
                    "selected": { "state": "connected", "node_id": "orphan" }
                }
            }),
        )
        .unwrap();

    let store = AppStore::bootstrap(Arc::new(storage));
    let config = store.config();

    assert!(config.nodes.custom_nodes.is_empty());
    assert_eq!(
        config.nodes.selected,
        NodeSelection::Connected {
            node_id: DEFAULT_NODE_ID.to_string()
        }
    );
}

#[test]
fn test_injected_provider_selection_resets_on_boot() {
    let storage = MemoryStore::new();
    storage
        .save(
            CONFIG_KEY,
            &json!({
                "nodes": {
                    "custom_nodes": {},
                    "selected": { "state": "connecting", "node_id": INJECTED_NODE_ID }
                }
            }),
        )
        .unwrap();

    let store = AppStore::bootstrap(Arc::new(storage));
    let selected = store.config().nodes.selected;

    assert_eq!(
        selected,
        NodeSelection::Connected {
            node_id: DEFAULT_NODE_ID.to_string()
        }
    );
    assert!(!selected.is_pending());
}

#[test]
fn test_saved_tokens_colliding_with_built_ins_are_dropped_on_boot() {
    let storage = MemoryStore::new();
    // Default selection is the ETH network, whose built-in list carries DAI.
    storage
        .save(
            CUSTOM_TOKENS_KEY,
            &serde_json::to_value(vec![token("DAI"), token("OMG")]).unwrap(),
        )
        .unwrap();

    let store = AppStore::bootstrap(Arc::new(storage));
    assert_eq!(store.custom_tokens(), vec![token("OMG")]);
}

#[test]
fn test_saved_tokens_kept_verbatim_on_custom_network() {
    let storage = MemoryStore::new();
    storage
        .save(
            CONFIG_KEY,
            &json!({
                "networks": {
                    "custom_networks": {
                        "LOCAL": {
                            "id": "LOCAL",
                            "name": "Local devnet",
                            "unit": "ETH",
                            "chain_id": 1337
                        }
                    },
                    "selected_network": "LOCAL"
                }
            }),
        )
        .unwrap();
    storage
        .save(
            CUSTOM_TOKENS_KEY,
            &serde_json::to_value(vec![token("DAI")]).unwrap(),
        )
        .unwrap();

    let store = AppStore::bootstrap(Arc::new(storage));
    assert_eq!(store.custom_tokens(), vec![token("DAI")]);
}

#[test]
fn test_corrupted_state_file_boots_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = AppStore::bootstrap(Arc::new(FileStore::open(&path)));
    assert_eq!(store.state(), AppState::default());
}

#[test]
fn test_form_feeds_store_and_dedup_survives_reboot() {
    let storage: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    {
        let store = AppStore::bootstrap(storage.clone());

        let mut form = store.token_form();
        form.set_address("0x0D8775F648430679A709E98d2b0Cb6250d2887EF");
        form.set_symbol("DAI");
        form.set_decimal("18");
        // DAI is already a built-in symbol on the default network.
        assert!(form.submit().is_none());

        form.set_symbol("OMG");
        store.add_custom_token(form.submit().unwrap()).unwrap();
    }

    let rebooted = AppStore::bootstrap(storage);
    assert_eq!(rebooted.custom_tokens().len(), 1);
    assert_eq!(rebooted.custom_tokens()[0].symbol, "OMG");
}
