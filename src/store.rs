//! The application store: the single in-memory home of wallet configuration
//! and custom tokens for the process lifetime.
//!
//! The store is an explicit, dependency-injected container. It is seeded
//! exactly once at boot from the rehydrated snapshot and writes the
//! subscribed fragment of state back to storage after every mutation.

use crate::error::{Result, WalletError};
use crate::form::AddCustomTokenForm;
use crate::network::{CustomNetworkConfig, NetworkState};
use crate::node::{CustomNodeConfig, NodeClient, NodeSelection, NodeState};
use crate::rehydrate::rehydrate;
use crate::storage::{
    PersistedConfig, PersistedNetworks, PersistedNodes, StateStore, CONFIG_KEY, CUSTOM_TOKENS_KEY,
};
use crate::token::{CustomToken, CustomTokenState};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Presentation-level settings persisted alongside the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetaState {
    pub language: String,
}

impl Default for MetaState {
    fn default() -> Self {
        MetaState {
            language: "en".to_string(),
        }
    }
}

/// The configuration branch of application state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigState {
    pub networks: NetworkState,
    pub nodes: NodeState,
    pub meta: MetaState,
}

/// Full application state. `Default` is the compiled-in fresh-install state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    pub config: ConfigState,
    pub custom_tokens: CustomTokenState,
}

/// Project the fragment of state that gets written back to storage: custom
/// collections, selections and meta. Static tables and client handles are
/// compiled-in or runtime-only and never leave the process.
pub fn state_to_persist(state: &AppState) -> (PersistedConfig, CustomTokenState) {
    let config = PersistedConfig {
        networks: Some(PersistedNetworks {
            custom_networks: state.config.networks.custom_networks.clone(),
            selected_network: state.config.networks.selected_network.clone(),
        }),
        nodes: Some(PersistedNodes {
            custom_nodes: state.config.nodes.custom_nodes.clone(),
            selected: state.config.nodes.selected.clone(),
        }),
        meta: Some(state.config.meta.clone()),
    };
    (config, state.custom_tokens.clone())
}

/// Thread-safe application store.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<RwLock<AppState>>,
    storage: Arc<dyn StateStore>,
}

impl AppStore {
    /// Boot the store: rehydrate persisted state over the compiled-in
    /// defaults, exactly once, before anything else can observe the state.
    pub fn bootstrap(storage: Arc<dyn StateStore>) -> Self {
        let defaults = AppState::default();
        let rehydrated = rehydrate(&defaults, storage.as_ref());

        info!(
            selected_network = %rehydrated.config.networks.selected_network,
            custom_nodes = rehydrated.config.nodes.custom_nodes.len(),
            custom_tokens = rehydrated.custom_tokens.len(),
            "Application store rehydrated"
        );

        AppStore {
            inner: Arc::new(RwLock::new(AppState {
                config: rehydrated.config,
                custom_tokens: rehydrated.custom_tokens,
            })),
            storage,
        }
    }

    pub fn state(&self) -> AppState {
        self.inner.read().clone()
    }

    pub fn config(&self) -> ConfigState {
        self.inner.read().config.clone()
    }

    pub fn custom_tokens(&self) -> CustomTokenState {
        self.inner.read().custom_tokens.clone()
    }

    pub fn selected_network(&self) -> String {
        self.inner.read().config.networks.selected_network.clone()
    }

    /// All token symbols visible for the selected network: the built-in list
    /// plus custom tokens. Feeds the entry form's collision check.
    pub fn known_token_symbols(&self) -> Vec<String> {
        let state = self.inner.read();
        let mut symbols: Vec<String> = state
            .config
            .networks
            .selected()
            .map(|network| {
                network
                    .tokens()
                    .iter()
                    .map(|token| token.symbol.clone())
                    .collect()
            })
            .unwrap_or_default();
        symbols.extend(state.custom_tokens.iter().map(|token| token.symbol.clone()));
        symbols
    }

    /// Build the entry form pre-loaded with the current symbol set.
    pub fn token_form(&self) -> AddCustomTokenForm {
        AddCustomTokenForm::new(self.known_token_symbols())
    }

    pub fn add_custom_token(&self, token: CustomToken) -> Result<()> {
        {
            let mut state = self.inner.write();
            if state
                .custom_tokens
                .iter()
                .any(|existing| existing.symbol == token.symbol)
            {
                return Err(WalletError::DuplicateToken(token.symbol));
            }
            state.custom_tokens.push(token);
        }
        self.persist()
    }

    pub fn remove_custom_token(&self, symbol: &str) -> Result<()> {
        {
            let mut state = self.inner.write();
            let before = state.custom_tokens.len();
            state.custom_tokens.retain(|token| token.symbol != symbol);
            if state.custom_tokens.len() == before {
                return Err(WalletError::ValidationError(format!(
                    "No custom token with symbol '{}'",
                    symbol
                )));
            }
        }
        self.persist()
    }

    pub fn add_custom_network(&self, network: CustomNetworkConfig) -> Result<()> {
        {
            let mut state = self.inner.write();
            if state.config.networks.contains(&network.id) {
                return Err(WalletError::ConfigError(format!(
                    "Network '{}' already exists",
                    network.id
                )));
            }
            state
                .config
                .networks
                .custom_networks
                .insert(network.id.clone(), network);
        }
        self.persist()
    }

    pub fn add_custom_node(&self, mut node: CustomNodeConfig) -> Result<()> {
        {
            let mut state = self.inner.write();
            if !state.config.networks.contains(&node.network) {
                return Err(WalletError::NetworkNotFound(node.network));
            }
            node.client = Some(NodeClient::connect(&node));
            state
                .config
                .nodes
                .custom_nodes
                .insert(node.id.clone(), node);
        }
        self.persist()
    }

    pub fn remove_custom_node(&self, id: &str) -> Result<()> {
        {
            let mut state = self.inner.write();
            if state.config.nodes.custom_nodes.remove(id).is_none() {
                return Err(WalletError::NodeNotFound(id.to_string()));
            }
            // A selection pointing at the removed node falls back to default.
            if state.config.nodes.selected.node_id() == Some(id) {
                state.config.nodes.selected = NodeState::default().selected;
            }
        }
        self.persist()
    }

    pub fn select_network(&self, id: &str) -> Result<()> {
        {
            let mut state = self.inner.write();
            if !state.config.networks.contains(id) {
                return Err(WalletError::NetworkNotFound(id.to_string()));
            }
            state.config.networks.selected_network = id.to_string();
        }
        self.persist()
    }

    pub fn select_node(&self, id: &str) -> Result<()> {
        {
            let mut state = self.inner.write();
            if !state.config.nodes.contains(id) {
                return Err(WalletError::NodeNotFound(id.to_string()));
            }
            state.config.nodes.selected = NodeSelection::Connected {
                node_id: id.to_string(),
            };
        }
        self.persist()
    }

    /// Write the subscribed fragment back to storage.
    fn persist(&self) -> Result<()> {
        let (config, custom_tokens) = {
            let state = self.inner.read();
            state_to_persist(&state)
        };
        self.storage
            .save(CONFIG_KEY, &serde_json::to_value(&config)?)?;
        self.storage
            .save(CUSTOM_TOKENS_KEY, &serde_json::to_value(&custom_tokens)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn fresh_store() -> AppStore {
        AppStore::bootstrap(Arc::new(MemoryStore::new()))
    }

    fn token(symbol: &str) -> CustomToken {
        CustomToken {
            address: "0x0D8775F648430679A709E98d2b0Cb6250d2887EF".to_string(),
            symbol: symbol.to_string(),
            decimal: 18,
        }
    }

    #[test]
    fn test_bootstrap_without_saved_state_is_default() {
        let store = fresh_store();
        assert_eq!(store.state(), AppState::default());
    }

    #[test]
    fn test_add_and_remove_custom_token() {
        let store = fresh_store();
        store.add_custom_token(token("OMG")).unwrap();
        assert_eq!(store.custom_tokens().len(), 1);

        assert!(store.add_custom_token(token("OMG")).is_err());

        store.remove_custom_token("OMG").unwrap();
        assert!(store.custom_tokens().is_empty());
        assert!(store.remove_custom_token("OMG").is_err());
    }

    #[test]
    fn test_custom_node_requires_known_network() {
        let store = fresh_store();
        let node = CustomNodeConfig {
            id: "local".to_string(),
            name: "Local".to_string(),
            url: "http://localhost:8545".to_string(),
            network: "GONE".to_string(),
            auth: None,
            client: None,
        };
        assert!(store.add_custom_node(node).is_err());
    }

    #[test]
    fn test_removing_selected_node_resets_selection() {
        let store = fresh_store();
        let node = CustomNodeConfig {
            id: "local".to_string(),
            name: "Local".to_string(),
            url: "http://localhost:8545".to_string(),
            network: "ETH".to_string(),
            auth: None,
            client: None,
        };
        store.add_custom_node(node).unwrap();
        store.select_node("local").unwrap();

        store.remove_custom_node("local").unwrap();
        assert_eq!(
            store.config().nodes.selected,
            NodeState::default().selected
        );
    }

    #[test]
    fn test_mutations_survive_reboot() {
        let storage: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
        {
            let store = AppStore::bootstrap(storage.clone());
            store.add_custom_token(token("OMG")).unwrap();
            store.select_network("SEPOLIA").unwrap();
        }

        let rebooted = AppStore::bootstrap(storage);
        assert_eq!(rebooted.selected_network(), "SEPOLIA");
        assert_eq!(rebooted.custom_tokens(), vec![token("OMG")]);
    }

    #[test]
    fn test_known_symbols_include_custom_tokens() {
        let store = fresh_store();
        store.add_custom_token(token("OMG")).unwrap();

        let symbols = store.known_token_symbols();
        assert!(symbols.contains(&"DAI".to_string()));
        assert!(symbols.contains(&"OMG".to_string()));
    }
}
