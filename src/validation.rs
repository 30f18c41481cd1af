//! Validation of user requests and inbound channel messages
//!
//! The checks here are where each error kind is raised. The channel itself is
//! seen through a read-only [`ChannelView`] snapshot supplied by the caller.

use crate::address::Address;
use crate::config::ValidationConfig;
use crate::error::{ChannelError, Result};
use crate::excerpt::Excerpt;
use crate::locksroot::{merkleroot, Locksroot};
use crate::policy::report;
use tracing::{debug, trace};

/// Channel lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Opened,
    Closed,
    Settled,
}

/// Snapshot of the channel state needed for validation
#[derive(Debug, Clone)]
pub struct ChannelView {
    pub state: ChannelState,
    /// Token contract of the channel
    pub token: Address,
    /// Channel counterparty
    pub partner: Address,
    /// Amount we can still send
    pub our_balance: u64,
    /// Amount the partner can still send us
    pub partner_capacity: u64,
    /// Nonce of the last accepted partner message
    pub last_nonce: Option<u64>,
    /// Lock hashes of pending transfers from the partner
    pub pending_locks: Vec<[u8; 32]>,
}

/// Transfer received from the partner, as decoded from the wire
#[derive(Debug, Clone)]
pub struct InboundTransfer {
    /// Token address as received (unchecked length)
    pub token: Vec<u8>,
    pub nonce: u64,
    pub amount: u64,
    /// Hash of the new lock, for mediated transfers
    pub lock: Option<[u8; 32]>,
    /// Locksroot claimed by the partner
    pub locksroot: Locksroot,
}

/// Validator for requests and inbound messages
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check a user deposit request
    pub fn check_deposit(
        &self,
        channel: &ChannelView,
        on_chain_balance: u64,
        amount: u64,
    ) -> Result<()> {
        if channel.state != ChannelState::Opened {
            return Err(ChannelError::InvalidState);
        }
        if on_chain_balance < amount {
            debug!("Deposit of {} exceeds on-chain balance {}", amount, on_chain_balance);
            return Err(ChannelError::InsufficientFunds);
        }
        Ok(())
    }

    /// Check a user transfer request
    ///
    /// `route` is the path found in the routing graph, if any.
    pub fn check_transfer_request(
        &self,
        channel: &ChannelView,
        target: &Address,
        amount: u64,
        route: Option<&[Address]>,
    ) -> Result<()> {
        if channel.state != ChannelState::Opened {
            return Err(ChannelError::TransferWhenClosed);
        }
        if !self.config.is_known_node(target) {
            return Err(ChannelError::UnknownAddress);
        }
        match route {
            Some(path) if !path.is_empty() => {}
            _ => return Err(ChannelError::NoPathError),
        }
        if amount > channel.our_balance {
            return Err(ChannelError::InsufficientFunds);
        }
        Ok(())
    }

    /// Validate an inbound transfer from the partner
    ///
    /// Returns the locksroot to record once the transfer is accepted. Every
    /// rejection is reported with its handling policy.
    pub fn validate_inbound(
        &self,
        channel: &ChannelView,
        transfer: &InboundTransfer,
    ) -> Result<Locksroot> {
        self.check_inbound(channel, transfer).map_err(|err| {
            debug!(
                partner = %hex::encode(channel.partner),
                nonce = transfer.nonce,
                "Inbound transfer rejected"
            );
            report(&err);
            err
        })
    }

    fn check_inbound(&self, channel: &ChannelView, transfer: &InboundTransfer) -> Result<Locksroot> {
        if !self.config.accept_transfers {
            return Err(ChannelError::TransferUnwanted);
        }

        // A token other than the channel's is as unknown as an unsupported one
        if transfer.token.as_slice() != channel.token.as_slice()
            || !self.config.is_known_token(&transfer.token)
        {
            return Err(ChannelError::unknown_token_address(transfer.token.clone()));
        }

        let expected_nonce = match channel.last_nonce {
            Some(last) => last.checked_add(1).ok_or(ChannelError::InvalidNonce)?,
            None => 1,
        };
        if transfer.nonce != expected_nonce {
            return Err(ChannelError::InvalidNonce);
        }

        if transfer.amount > channel.partner_capacity {
            return Err(ChannelError::InsufficientBalance);
        }

        let mut locks = channel.pending_locks.clone();
        locks.extend(transfer.lock);
        let computed = merkleroot(&locks)?;
        if computed != transfer.locksroot {
            return Err(ChannelError::invalid_locksroot(computed, transfer.locksroot));
        }

        trace!(
            "Inbound transfer accepted: nonce={}, locksroot={}",
            transfer.nonce,
            Excerpt(&computed)
        );
        Ok(computed)
    }
}
