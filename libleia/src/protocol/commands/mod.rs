// libleia/src/protocol/commands/mod.rs

pub mod apdu;
pub mod configure;
pub mod trigger;

pub use apdu::ApduCommand;
pub use configure::ConfigureCommand;
pub use trigger::{TriggerPoint, TriggerStrategyCommand};

/// A structure that can be sent as the payload of a command frame.
///
/// Payload structures are packed little-endian with no padding. New
/// payloads should implement this trait in `protocol::commands::<name>.rs`.
pub trait Packable {
    /// Serialize the structure into its wire representation.
    fn pack(&self) -> Vec<u8>;
}
