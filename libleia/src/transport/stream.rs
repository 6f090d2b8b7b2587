// libleia/src/transport/stream.rs

use std::io::{self, Read};

/// Bytes read per call; the buffer only grows as data actually arrives.
const READ_CHUNK: usize = 512;

/// Read up to `len` bytes from a stream with a read timeout. Stops early on
/// end of stream or timeout and returns what was read so far.
#[cfg_attr(not(feature = "serial"), allow(dead_code))]
pub(crate) fn read_up_to<R: Read + ?Sized>(stream: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(len.min(READ_CHUNK));
    let mut chunk = [0u8; READ_CHUNK];
    while out.len() < len {
        let want = (len - out.len()).min(READ_CHUNK);
        match stream.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => out.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}
