//! Custom token records and deduplication against built-in token lists.

use crate::network::Token;
use serde::{Deserialize, Serialize};

/// A user-added ERC-20 token contract, persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomToken {
    pub address: String,
    pub symbol: String,
    pub decimal: u32,
}

/// The custom-token branch of application state. Empty on a fresh install.
pub type CustomTokenState = Vec<CustomToken>;

/// Drop every saved custom token whose symbol collides with a built-in entry.
/// The built-in list is authoritative; matching is exact and case-sensitive.
pub fn dedupe_custom_tokens(built_in: &[Token], saved: CustomTokenState) -> CustomTokenState {
    saved
        .into_iter()
        .filter(|custom| !built_in.iter().any(|token| token.symbol == custom.symbol))
        .collect()
}
