//! Request builder for Etherscan-style block-explorer JSON APIs.
//!
//! Each wallet operation maps to a flat parameter record ready to be encoded
//! as an HTTP query by whatever transport sits above. Stateless: no URLs, no
//! retries, no response handling.

use crate::erc20;
use crate::network::Token;
use serde::Serialize;

/// Hex-string transaction fields as a gas-estimate input.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransactionParams {
    pub from: String,
    pub to: String,
    pub value: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SendRawTxRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub hex: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EstimateGasRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub to: String,
    pub value: String,
    pub data: String,
    pub from: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GetBalanceRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub tag: &'static str,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub to: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GetTransactionCountRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub tag: &'static str,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GetTransactionByHashRequest {
    pub module: &'static str,
    pub action: &'static str,
    pub txhash: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GetCurrentBlockRequest {
    pub module: &'static str,
    pub action: &'static str,
}

/// Broadcast a signed raw transaction.
pub fn send_raw_tx(signed_tx: &str) -> SendRawTxRequest {
    SendRawTxRequest {
        module: "proxy",
        action: "eth_sendRawTransaction",
        hex: signed_tx.to_string(),
    }
}

/// Estimate gas for a transaction.
pub fn estimate_gas(transaction: &TransactionParams) -> EstimateGasRequest {
    EstimateGasRequest {
        module: "proxy",
        action: "eth_estimateGas",
        to: transaction.to.clone(),
        value: transaction.value.clone(),
        data: transaction.data.clone(),
        from: transaction.from.clone(),
    }
}

/// Query an address's latest ether balance.
pub fn get_balance(address: &str) -> GetBalanceRequest {
    GetBalanceRequest {
        module: "account",
        action: "balance",
        tag: "latest",
        address: address.to_string(),
    }
}

/// Generic read-only contract call.
pub fn eth_call(to: &str, data: &str) -> CallRequest {
    CallRequest {
        module: "proxy",
        action: "eth_call",
        to: to.to_string(),
        data: data.to_string(),
    }
}

/// Query an address's latest transaction count (nonce).
pub fn get_transaction_count(address: &str) -> GetTransactionCountRequest {
    GetTransactionCountRequest {
        module: "proxy",
        action: "eth_getTransactionCount",
        tag: "latest",
        address: address.to_string(),
    }
}

/// Look up a transaction by hash.
pub fn get_transaction_by_hash(txhash: &str) -> GetTransactionByHashRequest {
    GetTransactionByHashRequest {
        module: "proxy",
        action: "eth_getTransactionByHash",
        txhash: txhash.to_string(),
    }
}

/// Query an address's balance of an ERC-20 token: a contract call against the
/// token with `balanceOf` call data.
pub fn get_token_balance(address: &str, token: &Token) -> CallRequest {
    eth_call(&token.address, &erc20::balance_of_call_data(address))
}

/// Query the current block number.
pub fn get_current_block() -> GetCurrentBlockRequest {
    GetCurrentBlockRequest {
        module: "proxy",
        action: "eth_blockNumber",
    }
}
