//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the MockChannel scripting that plays the
//! reader's side of an exchange, so tests across the crate and the tests/
//! directory can reuse the same logic.
#![allow(dead_code)]

use std::time::Duration;

use crate::constants::{ACK_FLAG, READY_FLAG, STATUS_SUCCESS};
use crate::device::{Reader, ReaderConfig};
use crate::protocol::ResponseFrame;
use crate::transport::mock::MockChannel;
use crate::Result;

/// Default config without the probe delay so tests do not sleep.
#[doc(hidden)]
pub fn fast_config() -> ReaderConfig {
    ReaderConfig {
        probe_delay: Duration::ZERO,
        ..ReaderConfig::default()
    }
}

/// Status `S 00` followed by the ack `R`.
#[doc(hidden)]
pub fn status_ok() -> Vec<u8> {
    vec![STATUS_SUCCESS, 0x00, ACK_FLAG]
}

/// Full reader answer for a command returning `payload`.
#[doc(hidden)]
pub fn reply_with_payload(payload: &[u8]) -> Vec<u8> {
    let mut out = status_ok();
    out.extend(ResponseFrame::encode(payload).unwrap_or_default());
    out
}

/// Queue a ready flag and the answer to one command without payload.
#[doc(hidden)]
pub fn script_ack(mock: &MockChannel) {
    mock.push_response(vec![READY_FLAG]);
    mock.push_response(status_ok());
}

/// Queue a ready flag and the answer to one command returning `payload`.
#[doc(hidden)]
pub fn script_response(mock: &MockChannel, payload: &[u8]) {
    mock.push_response(vec![READY_FLAG]);
    mock.push_response(reply_with_payload(payload));
}

/// Queue a ready flag and a raw answer (status, ack, size and payload as
/// given).
#[doc(hidden)]
pub fn script_raw(mock: &MockChannel, raw: Vec<u8>) {
    mock.push_response(vec![READY_FLAG]);
    mock.push_response(raw);
}

/// Create a Reader attached to `mock`, answering the initial handshake.
#[doc(hidden)]
pub fn attached_reader(mock: &MockChannel) -> Result<Reader> {
    mock.push_response(vec![READY_FLAG]);
    let reader = Reader::new(fast_config());
    reader.attach(Box::new(mock.clone()))?;
    Ok(reader)
}
