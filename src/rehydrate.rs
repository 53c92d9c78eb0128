//! Startup reconciliation of persisted configuration with compiled-in
//! defaults.
//!
//! Runs once per boot, before anything else can observe the store, in a fixed
//! order: networks, then nodes, then tokens. Nodes are validated against the
//! reconciled network set and token dedup depends on the final selected
//! network, so the order is load-bearing.
//!
//! Nothing in here can fail. Malformed or stale persisted state degrades to
//! the matching default; a dangling reference is dropped or reset. A broken
//! snapshot must never keep the application from starting.

use crate::network::NetworkState;
use crate::node::{NodeClient, NodeSelection, NodeState, INJECTED_NODE_ID};
use crate::storage::{
    load_state, PersistedConfig, PersistedNetworks, PersistedNodes, StateStore, CONFIG_KEY,
    CUSTOM_TOKENS_KEY,
};
use crate::store::{AppState, ConfigState};
use crate::token::{dedupe_custom_tokens, CustomTokenState};

/// The reconciled snapshot handed to the application store at boot.
/// Transient: consumed exactly once, never persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehydratedState {
    pub config: ConfigState,
    pub custom_tokens: CustomTokenState,
}

/// Merge a saved network fragment over the default network state.
///
/// Custom networks are taken wholesale from the saved fragment; the saved
/// selection is kept only if it still resolves, otherwise it reverts to the
/// default selection.
pub fn reconcile_networks(
    defaults: &NetworkState,
    saved: Option<&PersistedNetworks>,
) -> NetworkState {
    let Some(saved) = saved else {
        return defaults.clone();
    };

    let mut next = defaults.clone();
    next.custom_networks = saved.custom_networks.clone();
    next.selected_network = if next.contains(&saved.selected_network) {
        saved.selected_network.clone()
    } else {
        defaults.selected_network.clone()
    };
    next
}

/// Merge a saved node fragment over the default node state, validating every
/// custom node against the already-reconciled network set.
///
/// Surviving custom nodes get a fresh connection handle; the handle is
/// runtime-only state and is rebuilt on every boot. A saved selection of the
/// injected provider sentinel is force-reset: that node only exists after an
/// explicit user unlock, which cannot have happened yet. The output selection
/// is never `Connecting` — no boot resumes a previous session's in-flight
/// connection attempt.
pub fn reconcile_nodes(
    defaults: &NodeState,
    saved: Option<&PersistedNodes>,
    networks: &NetworkState,
) -> NodeState {
    let Some(saved) = saved else {
        return defaults.clone();
    };

    let mut next = defaults.clone();
    next.custom_nodes = saved
        .custom_nodes
        .iter()
        .filter(|(_, config)| networks.contains(&config.network))
        .map(|(id, config)| {
            let mut config = config.clone();
            config.client = Some(NodeClient::connect(&config));
            (id.clone(), config)
        })
        .collect();

    next.selected = match saved.selected.node_id() {
        None => NodeSelection::Disconnected,
        Some(INJECTED_NODE_ID) => settle(&defaults.selected),
        Some(node_id) if next.contains(node_id) => NodeSelection::Connected {
            node_id: node_id.to_string(),
        },
        Some(_) => settle(&defaults.selected),
    };
    next
}

/// A selection with any in-flight connection attempt collapsed away.
fn settle(selection: &NodeSelection) -> NodeSelection {
    match selection {
        NodeSelection::Connecting { node_id } => NodeSelection::Connected {
            node_id: node_id.clone(),
        },
        other => other.clone(),
    }
}

/// Reconcile the saved custom-token list against the selected network.
///
/// A custom network has no built-in token list to collide with, so the saved
/// state is trusted as-is; on a built-in network, built-in symbols win.
pub fn reconcile_tokens(
    networks: &NetworkState,
    saved: Option<CustomTokenState>,
) -> CustomTokenState {
    let saved = saved.unwrap_or_default();
    match networks.selected() {
        Some(network) if !network.is_custom() => dedupe_custom_tokens(network.tokens(), saved),
        _ => saved,
    }
}

/// Rebuild application state from the persisted snapshot.
///
/// Reads the `config` and `customTokens` fragments through the store and
/// reconciles them with the defaults. Pure apart from those two reads; calling
/// it twice over the same snapshot yields the same output.
pub fn rehydrate(defaults: &AppState, store: &dyn StateStore) -> RehydratedState {
    let mut config = defaults.config.clone();

    if let Some(saved) = load_state::<PersistedConfig>(store, CONFIG_KEY) {
        config.networks = reconcile_networks(&defaults.config.networks, saved.networks.as_ref());
        config.nodes = reconcile_nodes(
            &defaults.config.nodes,
            saved.nodes.as_ref(),
            &config.networks,
        );
        if let Some(meta) = saved.meta {
            config.meta = meta;
        }
    }

    let custom_tokens = reconcile_tokens(&config.networks, load_state(store, CUSTOM_TOKENS_KEY));

    RehydratedState {
        config,
        custom_tokens,
    }
}
