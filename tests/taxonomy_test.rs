//! Integration tests for the channel error taxonomy

use bllvm_channel::config::ValidationConfig;
use bllvm_channel::excerpt::excerpt;
use bllvm_channel::locksroot::EMPTY_LOCKSROOT;
use bllvm_channel::validation::{ChannelState, ChannelView, InboundTransfer, Validator};
use bllvm_channel::{ChannelError, ErrorClass, HandlingPolicy};

const TOKEN: [u8; 20] = [0x42u8; 20];

fn validator() -> Validator {
    let json = format!(r#"{{"known_tokens": ["0x{}"]}}"#, hex::encode(TOKEN));
    Validator::new(ValidationConfig::from_json(&json).unwrap())
}

fn channel() -> ChannelView {
    ChannelView {
        state: ChannelState::Opened,
        token: TOKEN,
        partner: [0x01u8; 20],
        our_balance: 0,
        partner_capacity: 1_000,
        last_nonce: Some(7),
        pending_locks: Vec::new(),
    }
}

#[test]
fn test_locksroot_mismatch_end_to_end() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // No pending locks, so the computed root is all zeros
    let message = InboundTransfer {
        token: TOKEN.to_vec(),
        nonce: 8,
        amount: 5,
        lock: None,
        locksroot: [0xffu8; 32],
    };

    let err = validator().validate_inbound(&channel(), &message).unwrap_err();
    assert_eq!(err.class(), ErrorClass::ProtocolViolation);
    assert_eq!(err.expected_locksroot(), Some(&EMPTY_LOCKSROOT));
    assert_eq!(err.got_locksroot(), Some(&[0xffu8; 32]));
    assert_eq!(
        err.message(),
        "Locksroot mismatch. Expected 00000000 but got ffffffff"
    );
    assert_eq!(
        err.handling_policy(),
        HandlingPolicy::RejectMessage { suspect_peer: true }
    );

    // Same message with a stale nonce fails on the nonce instead
    let stale = InboundTransfer { nonce: 7, ..message };
    let nonce_err = validator().validate_inbound(&channel(), &stale).unwrap_err();
    assert_eq!(nonce_err, ChannelError::InvalidNonce);
    assert_ne!(nonce_err, err);
    assert_ne!(nonce_err.message(), err.message());
}

#[test]
fn test_locksroot_excerpt_order() {
    let a = [0x0au8; 32];
    let b = [0x0bu8; 32];
    let message = ChannelError::invalid_locksroot(a, b).message();

    let pos_a = message.find(&excerpt(&a)).unwrap();
    let pos_b = message.find(&excerpt(&b)).unwrap();
    assert!(pos_a < pos_b);
}

#[test]
fn test_unknown_token_any_length() {
    for len in [0usize, 1, 20, 32, 64] {
        let address: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let err = ChannelError::unknown_token_address(address.clone());
        assert_eq!(err.token_address(), Some(address.as_slice()));
        assert_eq!(err.class(), ErrorClass::ProtocolViolation);
    }
}

#[test]
fn test_deterministic_rendering() {
    let first = ChannelError::unknown_token_address(TOKEN.to_vec());
    let second = ChannelError::unknown_token_address(TOKEN.to_vec());
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

fn deposit(on_chain_balance: u64, amount: u64) -> anyhow::Result<()> {
    validator().check_deposit(&channel(), on_chain_balance, amount)?;
    Ok(())
}

#[test]
fn test_propagates_through_anyhow() {
    assert!(deposit(10, 5).is_ok());

    let err = deposit(1, 5).unwrap_err();
    let channel_err = err.downcast_ref::<ChannelError>().unwrap();
    assert_eq!(channel_err, &ChannelError::InsufficientFunds);
    assert_eq!(channel_err.handling_policy(), HandlingPolicy::RejectRequest);
}

#[test]
fn test_exhaustive_dispatch() {
    fn describe(err: &ChannelError) -> &'static str {
        match err.class() {
            ErrorClass::Invariant => "bug",
            ErrorClass::UserCaused => "caller",
            ErrorClass::ProtocolViolation => "peer",
            ErrorClass::Infrastructure => "environment",
        }
    }

    assert_eq!(describe(&ChannelError::HashLengthNot32), "bug");
    assert_eq!(describe(&ChannelError::TransferWhenClosed), "caller");
    assert_eq!(describe(&ChannelError::TransferUnwanted), "peer");
    assert_eq!(describe(&ChannelError::StunUnavailable), "environment");
}
