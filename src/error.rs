//! Error taxonomy for payment channel operations
//!
//! Every failure a node can hit while validating user requests, managing
//! channel state, or processing peer messages is one [`ChannelError`] variant.
//! Each variant belongs to exactly one [`ErrorClass`], which decides how the
//! consuming layer must handle it (see [`crate::policy`]).

use crate::excerpt::Excerpt;
use thiserror::Error;

/// Result alias for channel operations
pub type Result<T> = std::result::Result<T, ChannelError>;

/// Classification of a [`ChannelError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Internal assumption violated (a bug, never bad input)
    Invariant,
    /// Local caller supplied invalid input or asked for an invalid action
    UserCaused,
    /// Inbound message from a remote peer failed validation
    ProtocolViolation,
    /// Environment problem, not related to message content
    Infrastructure,
}

impl ErrorClass {
    /// Stable lowercase name, used as a log field
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Invariant => "invariant",
            ErrorClass::UserCaused => "user_caused",
            ErrorClass::ProtocolViolation => "protocol_violation",
            ErrorClass::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment channel errors
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ChannelError {
    // Programming errors
    /// A value used as a hash is not exactly 32 bytes
    #[error("Hash element is not 32 bytes long")]
    HashLengthNot32,

    // User errors (the user may be another program)
    /// On-chain balance is below the requested deposit
    #[error("Insufficient funds to complete the requested deposit")]
    InsufficientFunds,

    #[error("Invalid address")]
    InvalidAddress,

    /// Transfer amount is not a non-negative integer
    #[error("Invalid amount: expected a non-negative integer")]
    InvalidAmount,

    /// No path at all to the target. Not used when a path exists but lacks capacity.
    #[error("No path to the target address in the payment network")]
    NoPathError,

    // TODO: split into per-state variants once the channel state machine reports which transition failed
    #[error("Requested action is not valid in the current channel state")]
    InvalidState,

    #[error("Cannot transfer on a closed channel")]
    TransferWhenClosed,

    /// Well-formed address that is not a known node
    #[error("Address is valid but not a known node")]
    UnknownAddress,

    // Protocol errors (messages from a possibly byzantine peer)
    /// Inbound transfer exceeds the channel's available capacity
    #[error("Transfer exceeds the available channel capacity")]
    InsufficientBalance,

    /// Locally computed locksroot differs from the one in the message.
    ///
    /// Accepting such a message could drop a pending lock and lose tokens.
    #[error(
        "Locksroot mismatch. Expected {} but got {}",
        Excerpt(.expected_locksroot),
        Excerpt(.got_locksroot)
    )]
    InvalidLocksRoot {
        /// Locksroot computed locally
        expected_locksroot: [u8; 32],
        /// Locksroot claimed by the message
        got_locksroot: [u8; 32],
    },

    /// Nonce did not increment relative to the last accepted message
    #[error("Invalid nonce")]
    InvalidNonce,

    /// Node is not accepting new transfers
    #[error("Node is not accepting new transfers")]
    TransferUnwanted,

    #[error("Message with unknown token address {} received", Excerpt(.address))]
    UnknownTokenAddress {
        /// Token address as received (no length requirement)
        address: Vec<u8>,
    },

    // Environment
    #[error("STUN service unavailable")]
    StunUnavailable,
}

impl ChannelError {
    /// Create an [`ChannelError::InvalidLocksRoot`]
    ///
    /// Equal values are accepted; whether they must differ is up to the caller.
    pub fn invalid_locksroot(expected_locksroot: [u8; 32], got_locksroot: [u8; 32]) -> Self {
        ChannelError::InvalidLocksRoot {
            expected_locksroot,
            got_locksroot,
        }
    }

    /// Create an [`ChannelError::UnknownTokenAddress`]
    pub fn unknown_token_address(address: impl Into<Vec<u8>>) -> Self {
        ChannelError::UnknownTokenAddress {
            address: address.into(),
        }
    }

    /// Classification of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            ChannelError::HashLengthNot32 => ErrorClass::Invariant,
            ChannelError::InsufficientFunds
            | ChannelError::InvalidAddress
            | ChannelError::InvalidAmount
            | ChannelError::NoPathError
            | ChannelError::InvalidState
            | ChannelError::TransferWhenClosed
            | ChannelError::UnknownAddress => ErrorClass::UserCaused,
            ChannelError::InsufficientBalance
            | ChannelError::InvalidLocksRoot { .. }
            | ChannelError::InvalidNonce
            | ChannelError::TransferUnwanted
            | ChannelError::UnknownTokenAddress { .. } => ErrorClass::ProtocolViolation,
            ChannelError::StunUnavailable => ErrorClass::Infrastructure,
        }
    }

    /// Stable name of the error kind, used as a log field
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChannelError::HashLengthNot32 => "HashLengthNot32",
            ChannelError::InsufficientFunds => "InsufficientFunds",
            ChannelError::InvalidAddress => "InvalidAddress",
            ChannelError::InvalidAmount => "InvalidAmount",
            ChannelError::NoPathError => "NoPathError",
            ChannelError::InvalidState => "InvalidState",
            ChannelError::TransferWhenClosed => "TransferWhenClosed",
            ChannelError::UnknownAddress => "UnknownAddress",
            ChannelError::InsufficientBalance => "InsufficientBalance",
            ChannelError::InvalidLocksRoot { .. } => "InvalidLocksRoot",
            ChannelError::InvalidNonce => "InvalidNonce",
            ChannelError::TransferUnwanted => "TransferUnwanted",
            ChannelError::UnknownTokenAddress { .. } => "UnknownTokenAddress",
            ChannelError::StunUnavailable => "STUNUnavailable",
        }
    }

    /// Human-readable message, safe to log or return to a caller
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Locally computed locksroot, if this is a locksroot mismatch
    pub fn expected_locksroot(&self) -> Option<&[u8; 32]> {
        match self {
            ChannelError::InvalidLocksRoot {
                expected_locksroot, ..
            } => Some(expected_locksroot),
            _ => None,
        }
    }

    /// Locksroot claimed by the peer, if this is a locksroot mismatch
    pub fn got_locksroot(&self) -> Option<&[u8; 32]> {
        match self {
            ChannelError::InvalidLocksRoot { got_locksroot, .. } => Some(got_locksroot),
            _ => None,
        }
    }

    /// Token address carried by an unknown-token error
    pub fn token_address(&self) -> Option<&[u8]> {
        match self {
            ChannelError::UnknownTokenAddress { address } => Some(address),
            _ => None,
        }
    }
}
