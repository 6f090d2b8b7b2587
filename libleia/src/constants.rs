// libleia/src/constants.rs
//! Common protocol constants used across the crate

/// LEIA USB vendor id
pub const LEIA_USB_VID: u16 = 0x3483;

/// LEIA USB product id
pub const LEIA_USB_PID: u16 = 0x0BB9;

/// Serial line speed of the virtual COM port
pub const LEIA_BAUD_RATE: u32 = 115_200;

/// Read / write timeouts applied to the channel
pub const READ_TIMEOUT_MS: u64 = 1000;
pub const WRITE_TIMEOUT_MS: u64 = 1000;

/// Delay between the liveness probe and reading its answer
pub const PROBE_DELAY_MS: u64 = 100;

/// At most this many ports may share the LEIA VID/PID (control + data)
pub const MAX_MATCHING_PORTS: usize = 2;

/// Liveness probe byte sent by the host and the ready flag expected back
pub const PROBE_BYTE: u8 = b' ';
pub const READY_FLAG: u8 = b'W';

/// Status flags
pub const STATUS_SUCCESS: u8 = b'S';
pub const STATUS_ERROR: u8 = b'E';
pub const STATUS_UNSUPPORTED: u8 = b'U';
pub const STATUS_WAIT_EXTENSION: u8 = b'w';

/// Response acknowledge flag
pub const ACK_FLAG: u8 = b'R';

/// Size of the little-endian length fields of command and response frames
pub const COMMAND_LEN_SIZE: usize = 4;
pub const RESPONSE_LEN_SIZE: usize = 4;

/// Largest APDU data field forwarded to the reader; longer data is truncated
pub const MAX_APDU_PAYLOAD_SIZE: usize = 16384;

/// Packed APDU header: cla, ins, p1, p2, lc(2), le(4), send_le(1)
pub const APDU_HEADER_SIZE: usize = 11;

/// Packed ATR structure size
pub const ATR_SIZE: usize = 55;

/// Packed APDU response header: le(4), sw1, sw2, delta_t(4), delta_t_answer(4)
pub const RESP_HEADER_SIZE: usize = 14;

/// Packed configure command size
pub const CONFIGURE_SIZE: usize = 11;

/// Number of trigger point slots in a trigger strategy
pub const STRATEGY_MAX: usize = 10;

/// Packed trigger strategy command size: index, single, delay(4), size, points(4 * N)
pub const TRIGGER_STRATEGY_SIZE: usize = 1 + 1 + 4 + 1 + 4 * STRATEGY_MAX;
