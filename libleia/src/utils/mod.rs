//! Utilities for libleia: hex rendering for logs and timeout defaults.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
