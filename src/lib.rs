//! emberwallet - Client-side Ethereum wallet state
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Configuration State
//! - [`network`] - Static and custom network configuration
//! - [`node`] - Static and custom node configuration, selection state
//! - [`token`] - Custom token records and deduplication
//!
//! ## State Lifecycle
//! - [`storage`] - Durable keyed state storage (file-backed and in-memory)
//! - [`rehydrate`] - Boot-time reconciliation of persisted state with defaults
//! - [`store`] - The in-memory application store
//!
//! ## Wallet Surface
//! - [`form`] - Custom-token entry validation
//! - [`explorer`] - Block-explorer request building
//! - [`erc20`] - Minimal ERC-20 call-data encoding
//!
//! ## Configuration & Utilities
//! - [`settings`] - Application settings
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Configuration State
// ============================================================================
pub mod network;
pub mod node;
pub mod token;

// ============================================================================
// State Lifecycle
// ============================================================================
pub mod rehydrate;
pub mod storage;
pub mod store;

// ============================================================================
// Wallet Surface
// ============================================================================
pub mod erc20;
pub mod explorer;
pub mod form;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod error;
pub mod settings;
