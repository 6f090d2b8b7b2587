// libleia/src/protocol/responses/mod.rs

pub mod apdu;
pub mod atr;

pub use apdu::ApduResponse;
pub use atr::AtrInfo;

/// A structure decoded from a response payload. Per-structure decoders
/// live in `protocol::responses::<name>.rs`.
pub trait Unpackable: Sized {
    /// Smallest payload the structure can be decoded from.
    const MIN_SIZE: usize;

    /// Decode the structure from a response payload.
    fn unpack(data: &[u8]) -> crate::Result<Self>;
}
