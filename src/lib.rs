//! Payment channel error taxonomy and validation for bllvm-node

pub mod address;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod locksroot;
pub mod policy;
pub mod validation;

pub use error::{ChannelError, ErrorClass, Result};
pub use policy::HandlingPolicy;
