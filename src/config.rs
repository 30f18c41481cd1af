//! Validation configuration
//!
//! Loaded from JSON, e.g.:
//!
//! ```json
//! {
//!   "accept_transfers": true,
//!   "known_tokens": ["0x0011223344556677889900112233445566778899"],
//!   "known_nodes": []
//! }
//! ```

use crate::address::{parse_address, Address};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid address in {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// On-disk form, addresses as hex strings
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_accept_transfers")]
    accept_transfers: bool,
    #[serde(default)]
    known_tokens: Vec<String>,
    #[serde(default)]
    known_nodes: Vec<String>,
}

fn default_accept_transfers() -> bool {
    true
}

/// Settings consulted while validating requests and inbound messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Whether new inbound transfers are accepted
    pub accept_transfers: bool,
    /// Token contracts this node supports
    pub known_tokens: Vec<Address>,
    /// Network participants this node knows about
    pub known_nodes: Vec<Address>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            accept_transfers: default_accept_transfers(),
            known_tokens: Vec::new(),
            known_nodes: Vec::new(),
        }
    }
}

impl ValidationConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Ok(Self {
            accept_transfers: raw.accept_transfers,
            known_tokens: parse_addresses("known_tokens", &raw.known_tokens)?,
            known_nodes: parse_addresses("known_nodes", &raw.known_nodes)?,
        })
    }

    /// Whether `token` is a supported token address
    ///
    /// Takes raw bytes since peers may send addresses of any length.
    pub fn is_known_token(&self, token: &[u8]) -> bool {
        self.known_tokens.iter().any(|known| known.as_slice() == token)
    }

    pub fn is_known_node(&self, node: &Address) -> bool {
        self.known_nodes.contains(node)
    }
}

fn parse_addresses(field: &'static str, values: &[String]) -> Result<Vec<Address>, ConfigError> {
    values
        .iter()
        .map(|value| {
            parse_address(value).map_err(|_| ConfigError::InvalidAddress {
                field,
                value: value.clone(),
            })
        })
        .collect()
}
