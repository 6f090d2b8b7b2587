// libleia/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Ensure the slice has exactly `len` bytes.
pub fn ensure_exact_len(data: &[u8], len: usize) -> Result<()> {
    if data.len() != len {
        return Err(Error::InvalidLength {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(array_at(data, idx)?))
}

/// Read a little-endian u32 at given index, with bounds checking.
pub fn le_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(array_at(data, idx)?))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Copy `N` bytes starting at `idx` into a fixed-size array.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let s = slice_at(data, idx, N)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(s);
    Ok(arr)
}
