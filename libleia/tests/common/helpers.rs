// helpers.rs — MockChannel / MockDiscovery setup shared by integration tests

use libleia::Result;
use libleia::device::Reader;
use libleia::test_support;
use libleia::transport::{MockChannel, MockDiscovery, PortInfo};

pub const LEIA_VID: u16 = 0x3483;
pub const LEIA_PID: u16 = 0x0BB9;

pub fn leia_port(name: &str) -> PortInfo {
    PortInfo::usb(name, LEIA_VID, LEIA_PID)
}

/// Discovery listing `ports` and handing out `mock` when opened.
pub fn discovery(ports: Vec<PortInfo>, mock: &MockChannel) -> MockDiscovery {
    MockDiscovery::new(ports, mock.clone())
}

/// A Reader already past its handshake, plus the mock behind it.
pub fn attached_reader() -> Result<(Reader, MockChannel)> {
    let mock = MockChannel::new();
    let reader = test_support::attached_reader(&mock)?;
    Ok((reader, mock))
}

/// Bytes written after the initial handshake probe.
pub fn sent_after_handshake(mock: &MockChannel) -> Vec<u8> {
    let sent = mock.sent_bytes();
    sent[1..].to_vec()
}
