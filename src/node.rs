//! Node configuration: compiled-in endpoints, user-defined custom nodes and
//! the tagged selection state naming the active one.

use base64::Engine;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved identifier for the injected browser wallet provider (MetaMask and
/// friends). It only becomes a usable node after explicit user unlock, so a
/// persisted selection of it is always stale on boot.
pub const INJECTED_NODE_ID: &str = "web3";

/// Identifier of the node selected on a fresh install.
pub const DEFAULT_NODE_ID: &str = "eth_auto";

/// A compiled-in connection endpoint. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticNodeConfig {
    pub id: String,
    pub network: String,
    pub service: String,
    pub url: String,
}

/// HTTP basic-auth credentials for a custom node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeAuth {
    pub username: String,
    pub password: String,
}

/// A user-defined connection endpoint, persisted locally. The `client` handle
/// is runtime-only state: it is skipped on serialization and rebuilt from the
/// rest of the record on every boot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomNodeConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    pub network: String,
    pub auth: Option<NodeAuth>,
    #[serde(skip)]
    pub client: Option<NodeClient>,
}

/// Thin connection handle bound to one custom node's configuration.
/// Not serializable; holds only what a transport needs to talk to the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeClient {
    pub endpoint: String,
    pub auth_header: Option<String>,
}

impl NodeClient {
    /// Build a fresh handle for a custom node.
    pub fn connect(config: &CustomNodeConfig) -> Self {
        let auth_header = config.auth.as_ref().map(|auth| {
            let credentials = format!("{}:{}", auth.username, auth.password);
            format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD.encode(credentials)
            )
        });
        NodeClient {
            endpoint: config.url.clone(),
            auth_header,
        }
    }
}

/// Connection state of the active node selection.
///
/// Rehydration only ever produces `Disconnected` or `Connected` with an
/// identifier validated against the current node set; `Connecting` exists for
/// the in-session switch flow and never survives a reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NodeSelection {
    Disconnected,
    Connecting { node_id: String },
    Connected { node_id: String },
}

impl NodeSelection {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            NodeSelection::Disconnected => None,
            NodeSelection::Connecting { node_id } | NodeSelection::Connected { node_id } => {
                Some(node_id)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, NodeSelection::Connecting { .. })
    }
}

/// The two partitions a node identifier can resolve into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedNode<'a> {
    Static(&'a StaticNodeConfig),
    Custom(&'a CustomNodeConfig),
}

impl<'a> ResolvedNode<'a> {
    /// Identifier of the network this node serves.
    pub fn network(&self) -> &'a str {
        match self {
            ResolvedNode::Static(config) => &config.network,
            ResolvedNode::Custom(config) => &config.network,
        }
    }
}

/// The full node branch of the configuration state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeState {
    pub static_nodes: HashMap<String, StaticNodeConfig>,
    pub custom_nodes: HashMap<String, CustomNodeConfig>,
    pub selected: NodeSelection,
}

impl NodeState {
    /// Look up a node identifier across both partitions, static first.
    pub fn resolve(&self, id: &str) -> Option<ResolvedNode<'_>> {
        if let Some(config) = self.static_nodes.get(id) {
            return Some(ResolvedNode::Static(config));
        }
        self.custom_nodes.get(id).map(ResolvedNode::Custom)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            static_nodes: DEFAULT_NODES.clone(),
            custom_nodes: HashMap::new(),
            selected: NodeSelection::Connected {
                node_id: DEFAULT_NODE_ID.to_string(),
            },
        }
    }
}

/// Compiled-in node table. One or more endpoints per default network.
pub static DEFAULT_NODES: Lazy<HashMap<String, StaticNodeConfig>> = Lazy::new(|| {
    let nodes = [
        StaticNodeConfig {
            id: "eth_auto".to_string(),
            network: "ETH".to_string(),
            service: "AUTO".to_string(),
            url: "https://api.emberwallet.com/eth".to_string(),
        },
        StaticNodeConfig {
            id: "eth_infura".to_string(),
            network: "ETH".to_string(),
            service: "Infura".to_string(),
            url: "https://mainnet.infura.io/v3".to_string(),
        },
        StaticNodeConfig {
            id: "eth_etherscan".to_string(),
            network: "ETH".to_string(),
            service: "Etherscan".to_string(),
            url: "https://api.etherscan.io/api".to_string(),
        },
        StaticNodeConfig {
            id: "sepolia_infura".to_string(),
            network: "SEPOLIA".to_string(),
            service: "Infura".to_string(),
            url: "https://sepolia.infura.io/v3".to_string(),
        },
        StaticNodeConfig {
            id: "etc_rivet".to_string(),
            network: "ETC".to_string(),
            service: "Rivet".to_string(),
            url: "https://etc.rivet.link".to_string(),
        },
    ];

    nodes
        .into_iter()
        .map(|node| (node.id.clone(), node))
        .collect()
});
