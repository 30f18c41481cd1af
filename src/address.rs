//! Parsing of user-supplied addresses and amounts

use crate::error::{ChannelError, Result};

/// Account-style address (20 bytes)
pub type Address = [u8; 20];

/// Parse a hex address, with or without a `0x` prefix
pub fn parse_address(input: &str) -> Result<Address> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if digits.len() != 40 {
        return Err(ChannelError::InvalidAddress);
    }

    let mut address = [0u8; 20];
    hex::decode_to_slice(digits, &mut address).map_err(|_| ChannelError::InvalidAddress)?;
    Ok(address)
}

/// Parse a transfer amount (non-negative base-10 integer)
pub fn parse_amount(input: &str) -> Result<u64> {
    let digits = input.trim();
    // u64::from_str accepts a leading '+'
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChannelError::InvalidAmount);
    }
    digits.parse().map_err(|_| ChannelError::InvalidAmount)
}
