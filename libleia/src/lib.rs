// libleia/src/lib.rs

//! libleia
//!
//! Pure Rust host driver for the LEIA smartcard reader, talking to the
//! reader over its USB virtual serial port.
#![warn(missing_docs)]

pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// `crate::Stage` and the types in `types` are available for consumers and
// for convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
