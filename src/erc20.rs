//! Minimal ERC-20 call-data encoding, just enough for balance queries.

/// 4-byte selector of `balanceOf(address)`.
const BALANCE_OF_SELECTOR: &str = "70a08231";

/// ABI-encoded call data for `balanceOf(owner)`: the selector followed by the
/// owner address left-padded to 32 bytes. The `0x` prefix on `owner` is
/// optional; casing is preserved as given.
pub fn balance_of_call_data(owner: &str) -> String {
    let bare = owner.strip_prefix("0x").unwrap_or(owner);
    format!("0x{}{:0>64}", BALANCE_OF_SELECTOR, bare)
}
