//! Handling policy for channel errors
//!
//! Maps each error class to what the consuming layer must do with it, and
//! reports errors through `tracing` at a level matching their class.

use crate::error::{ChannelError, ErrorClass};
use tracing::{debug, error, warn};

/// What a consumer must do with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlingPolicy {
    /// Bug: propagate to a crash or abort, never swallow
    Abort,
    /// Return a structured rejection to the immediate caller
    RejectRequest,
    /// Reject the inbound message; optionally record a suspicion against the peer
    RejectMessage { suspect_peer: bool },
    /// Keep running with reduced functionality
    Degrade,
}

impl HandlingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlingPolicy::Abort => "abort",
            HandlingPolicy::RejectRequest => "reject_request",
            HandlingPolicy::RejectMessage { suspect_peer: true } => "reject_message_suspect_peer",
            HandlingPolicy::RejectMessage { suspect_peer: false } => "reject_message",
            HandlingPolicy::Degrade => "degrade",
        }
    }
}

impl ErrorClass {
    /// Default policy for the class
    pub fn handling_policy(&self) -> HandlingPolicy {
        match self {
            ErrorClass::Invariant => HandlingPolicy::Abort,
            ErrorClass::UserCaused => HandlingPolicy::RejectRequest,
            ErrorClass::ProtocolViolation => HandlingPolicy::RejectMessage { suspect_peer: true },
            ErrorClass::Infrastructure => HandlingPolicy::Degrade,
        }
    }
}

impl ChannelError {
    /// Policy for this error
    ///
    /// Protocol violations that only reflect local configuration (transfers
    /// disabled, token not supported) reject the message without suspecting
    /// the peer.
    pub fn handling_policy(&self) -> HandlingPolicy {
        match self {
            ChannelError::TransferUnwanted | ChannelError::UnknownTokenAddress { .. } => {
                HandlingPolicy::RejectMessage {
                    suspect_peer: false,
                }
            }
            other => other.class().handling_policy(),
        }
    }

    /// Whether repeating the same operation later may succeed
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Infrastructure
    }
}

/// Log `err` at a level matching its class and return its policy
pub fn report(err: &ChannelError) -> HandlingPolicy {
    let policy = err.handling_policy();
    let kind = err.kind_name();
    let class = err.class().as_str();
    let action = policy.as_str();

    match err.class() {
        ErrorClass::Invariant => {
            error!(kind, class, policy = action, "Invariant violated: {}", err)
        }
        ErrorClass::ProtocolViolation => {
            warn!(kind, class, policy = action, "Rejecting peer message: {}", err)
        }
        ErrorClass::Infrastructure => {
            warn!(kind, class, policy = action, "Degraded: {}", err)
        }
        ErrorClass::UserCaused => {
            debug!(kind, class, policy = action, "Rejecting request: {}", err)
        }
    }

    policy
}
