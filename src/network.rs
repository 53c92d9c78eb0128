//! Network configuration: compiled-in (static) networks and user-defined
//! (custom) networks, plus the selection that names the active one.
//!
//! Identifiers are unique across the union of both partitions; the static
//! partition is authoritative when both would match, which `resolve` enforces
//! by checking it first.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An entry in a built-in network's token list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimal: u32,
}

/// A compiled-in network shipped with the application. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticNetworkConfig {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub chain_id: u64,
    pub tokens: Vec<Token>,
}

/// A user-defined network entered at runtime and persisted locally.
/// Custom networks carry no built-in token list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomNetworkConfig {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub chain_id: Option<u64>,
}

/// The two partitions a network identifier can resolve into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedNetwork<'a> {
    Static(&'a StaticNetworkConfig),
    Custom(&'a CustomNetworkConfig),
}

impl<'a> ResolvedNetwork<'a> {
    pub fn is_custom(&self) -> bool {
        matches!(self, ResolvedNetwork::Custom(_))
    }

    /// Built-in token list for the network; custom networks have none.
    pub fn tokens(&self) -> &'a [Token] {
        match self {
            ResolvedNetwork::Static(config) => &config.tokens,
            ResolvedNetwork::Custom(_) => &[],
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ResolvedNetwork::Static(config) => &config.name,
            ResolvedNetwork::Custom(config) => &config.name,
        }
    }
}

/// The full network branch of the configuration state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkState {
    pub static_networks: HashMap<String, StaticNetworkConfig>,
    pub custom_networks: HashMap<String, CustomNetworkConfig>,
    pub selected_network: String,
}

impl NetworkState {
    /// Look up a network identifier across both partitions, static first.
    pub fn resolve(&self, id: &str) -> Option<ResolvedNetwork<'_>> {
        if let Some(config) = self.static_networks.get(id) {
            return Some(ResolvedNetwork::Static(config));
        }
        self.custom_networks.get(id).map(ResolvedNetwork::Custom)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }

    /// The currently selected network, if the selection resolves.
    pub fn selected(&self) -> Option<ResolvedNetwork<'_>> {
        self.resolve(&self.selected_network)
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        NetworkState {
            static_networks: DEFAULT_NETWORKS.clone(),
            custom_networks: HashMap::new(),
            selected_network: DEFAULT_NETWORK_ID.to_string(),
        }
    }
}

/// Identifier of the network selected on a fresh install.
pub const DEFAULT_NETWORK_ID: &str = "ETH";

/// Compiled-in network table. Token lists are intentionally short; the full
/// lists ship with the frontend asset bundle, these are the ones the wallet
/// core needs for balance display out of the box.
pub static DEFAULT_NETWORKS: Lazy<HashMap<String, StaticNetworkConfig>> = Lazy::new(|| {
    let networks = [
        StaticNetworkConfig {
            id: "ETH".to_string(),
            name: "Ethereum".to_string(),
            unit: "ETH".to_string(),
            chain_id: 1,
            tokens: vec![
                Token {
                    address: "0x6B175474E89094C44Da98b954EedeAC495271d0F".to_string(),
                    symbol: "DAI".to_string(),
                    decimal: 18,
                },
                Token {
                    address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
                    symbol: "USDC".to_string(),
                    decimal: 6,
                },
                Token {
                    address: "0x0D8775F648430679A709E98d2b0Cb6250d2887EF".to_string(),
                    symbol: "BAT".to_string(),
                    decimal: 18,
                },
            ],
        },
        StaticNetworkConfig {
            id: "SEPOLIA".to_string(),
            name: "Sepolia".to_string(),
            unit: "SepoliaETH".to_string(),
            chain_id: 11155111,
            tokens: Vec::new(),
        },
        StaticNetworkConfig {
            id: "ETC".to_string(),
            name: "Ethereum Classic".to_string(),
            unit: "ETC".to_string(),
            chain_id: 61,
            tokens: Vec::new(),
        },
    ];

    networks
        .into_iter()
        .map(|network| (network.id.clone(), network))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_network(id: &str) -> CustomNetworkConfig {
        CustomNetworkConfig {
            id: id.to_string(),
            name: format!("{} testnet", id),
            unit: "TST".to_string(),
            chain_id: Some(1337),
        }
    }

    #[test]
    fn test_resolve_checks_static_partition_first() {
        let mut state = NetworkState::default();
        state
            .custom_networks
            .insert("ETH".to_string(), custom_network("ETH"));

        // "ETH" exists in both partitions; static wins.
        let resolved = state.resolve("ETH").unwrap();
        assert!(!resolved.is_custom());
    }

    #[test]
    fn test_resolve_falls_through_to_custom() {
        let mut state = NetworkState::default();
        state
            .custom_networks
            .insert("LOCAL".to_string(), custom_network("LOCAL"));

        let resolved = state.resolve("LOCAL").unwrap();
        assert!(resolved.is_custom());
        assert!(resolved.tokens().is_empty());
    }

    #[test]
    fn test_resolve_unknown_id_is_none() {
        let state = NetworkState::default();
        assert!(state.resolve("NOPE").is_none());
        assert!(!state.contains("NOPE"));
    }

    #[test]
    fn test_default_selection_resolves() {
        let state = NetworkState::default();
        let selected = state.selected().unwrap();
        assert_eq!(selected.name(), "Ethereum");
        assert!(!selected.tokens().is_empty());
    }
}
