//! Headless custom-token entry form: field-level validation and submission.
//!
//! Mirrors the browser form's behavior: errors are computed per field on every
//! change, untouched fields never error, and submission is refused until all
//! three fields are present and clean. This pre-validation is independent of
//! the post-hoc dedup the rehydration path applies to persisted tokens.

use crate::token::CustomToken;
use std::collections::HashSet;
use std::fmt;

/// True for `0x` followed by exactly 40 hex characters.
pub fn is_valid_eth_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(rest) => rest.len() == 40 && hex::decode(rest).is_ok(),
        None => false,
    }
}

/// True for a string that parses as a non-negative integer.
pub fn is_positive_integer_or_zero(value: &str) -> bool {
    value.parse::<u32>().is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    InvalidAddress,
    InvalidDecimal,
    DuplicateSymbol,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldError::InvalidAddress => write!(f, "Not a valid Ethereum address"),
            FieldError::InvalidDecimal => write!(f, "Decimal must be a non-negative integer"),
            FieldError::DuplicateSymbol => write!(f, "A token with this symbol already exists"),
        }
    }
}

/// Per-field validation results. `None` means the field is either valid or
/// still empty; emptiness blocks submission separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub address: Option<FieldError>,
    pub symbol: Option<FieldError>,
    pub decimal: Option<FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.symbol.is_none() && self.decimal.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddCustomTokenForm {
    address: String,
    symbol: String,
    decimal: String,
    known_symbols: HashSet<String>,
}

impl AddCustomTokenForm {
    /// `known_symbols` is the full set the new token must not collide with:
    /// the selected network's built-in list plus existing custom tokens.
    pub fn new(known_symbols: impl IntoIterator<Item = String>) -> Self {
        AddCustomTokenForm {
            known_symbols: known_symbols.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
    }

    pub fn set_symbol(&mut self, symbol: &str) {
        self.symbol = symbol.trim().to_string();
    }

    pub fn set_decimal(&mut self, decimal: &str) {
        self.decimal = decimal.trim().to_string();
    }

    pub fn errors(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if !self.decimal.is_empty() && !is_positive_integer_or_zero(&self.decimal) {
            errors.decimal = Some(FieldError::InvalidDecimal);
        }
        if !self.address.is_empty() && !is_valid_eth_address(&self.address) {
            errors.address = Some(FieldError::InvalidAddress);
        }
        if !self.symbol.is_empty() && self.known_symbols.contains(&self.symbol) {
            errors.symbol = Some(FieldError::DuplicateSymbol);
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
            && !self.address.is_empty()
            && !self.symbol.is_empty()
            && !self.decimal.is_empty()
    }

    /// Produce the token record, or `None` while the form is invalid.
    pub fn submit(&self) -> Option<CustomToken> {
        if !self.is_valid() {
            return None;
        }
        Some(CustomToken {
            address: self.address.clone(),
            symbol: self.symbol.clone(),
            // is_valid() guarantees this parses
            decimal: self.decimal.parse().unwrap_or_default(),
        })
    }
}
