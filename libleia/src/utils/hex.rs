//! Hexadecimal helpers used for debugging and display purposes.
//!
//! Wire bytes show up in `trace!` output on every exchange, so the
//! [`HexBytes`] wrapper formats lazily: nothing is rendered unless the log
//! record is actually emitted.

use std::fmt;

/// Display adapter rendering bytes as lowercase hex separated by spaces.
///
/// Example: `HexBytes(&[0xde, 0xad])` -> `"de ad"`
#[derive(Debug, Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0x90, 0x00]` -> `"9000"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    HexBytes(bytes).to_string()
}
