// libleia/src/transport/mock.rs

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::transport::traits::{Channel, ChannelSettings, PortDiscovery, PortInfo};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    rx: VecDeque<u8>,
    responses: VecDeque<Vec<u8>>,
    /// A write happened since the last queued response was released
    written: bool,
    sent: Vec<Vec<u8>>,
    closed: bool,
    close_calls: usize,
    write_limit: Option<usize>,
}

impl MockState {
    // The reader answers once the host stops writing and starts reading.
    fn release(&mut self) {
        if self.written {
            self.written = false;
            if let Some(resp) = self.responses.pop_front() {
                self.rx.extend(resp);
            }
        }
    }
}

/// Mock channel for unit tests. It records written bytes and plays back
/// queued responses: each queued response becomes readable after the host
/// has written something, so a response answers the write burst before it.
///
/// Clones share state, so a test can keep a handle after handing the
/// channel to a [`Reader`](crate::device::Reader).
#[derive(Debug, Clone, Default)]
pub struct MockChannel {
    state: Arc<Mutex<MockState>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue the bytes the reader sends after the next write burst.
    pub fn push_response(&self, resp: Vec<u8>) {
        self.state().responses.push_back(resp);
    }

    /// Bytes already sitting in the receive buffer (left over from an
    /// earlier session).
    pub fn push_stale(&self, bytes: &[u8]) {
        self.state().rx.extend(bytes.iter().copied());
    }

    /// All writes in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    /// All written bytes concatenated.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.state().sent.concat()
    }

    pub fn pending_responses(&self) -> usize {
        self.state().responses.len()
    }

    /// Bytes buffered but not yet read by the host.
    pub fn unread(&self) -> Vec<u8> {
        self.state().rx.iter().copied().collect()
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    pub fn close_calls(&self) -> usize {
        self.state().close_calls
    }

    /// Testing hook: accept at most `n` bytes per write.
    pub fn set_write_limit(&self, n: usize) {
        self.state().write_limit = Some(n);
    }
}

impl Channel for MockChannel {
    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut state = self.state();
        state.release();
        let n = len.min(state.rx.len());
        Ok(state.rx.drain(..n).collect())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut state = self.state();
        let n = state.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
        state.sent.push(data[..n].to_vec());
        state.written = true;
        Ok(n)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let mut state = self.state();
        state.release();
        Ok(state.rx.len())
    }

    fn is_open(&self) -> bool {
        !self.state().closed
    }

    fn close(&mut self) -> Result<()> {
        let mut state = self.state();
        state.closed = true;
        state.close_calls += 1;
        Ok(())
    }

    fn name(&self) -> String {
        String::from("mock")
    }
}

/// Mock discovery that hands out a shared [`MockChannel`] for every port
/// it is asked to open, except the ones marked as failing.
#[derive(Debug, Default)]
pub struct MockDiscovery {
    pub ports: Vec<PortInfo>,
    pub channel: MockChannel,
    failing: HashSet<String>,
    exclusive: bool,
    opened: Mutex<Vec<(String, ChannelSettings)>>,
}

impl MockDiscovery {
    pub fn new(ports: Vec<PortInfo>, channel: MockChannel) -> Self {
        Self {
            ports,
            channel,
            failing: HashSet::new(),
            exclusive: false,
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Refuse to open the channel again while an earlier open still holds
    /// it, like the OS does for serial ports.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Make `open` fail for the named port.
    pub fn fail_port(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Ports successfully opened, with the settings they were opened with.
    pub fn opened(&self) -> Vec<(String, ChannelSettings)> {
        self.opened.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PortDiscovery for MockDiscovery {
    fn list_ports(&self) -> Result<Vec<PortInfo>> {
        Ok(self.ports.clone())
    }

    fn open(&self, port: &PortInfo, settings: &ChannelSettings) -> Result<Box<dyn Channel>> {
        if self.failing.contains(&port.name) {
            return Err(Error::PortOpen(format!("{}: busy", port.name)));
        }
        let mut opened = self.opened.lock().unwrap_or_else(|e| e.into_inner());
        {
            let mut state = self.channel.state();
            if self.exclusive && !opened.is_empty() && !state.closed {
                return Err(Error::PortOpen(format!("{}: busy", port.name)));
            }
            // A fresh handle on the same port
            state.closed = false;
        }
        opened.push((port.name.clone(), *settings));
        Ok(Box::new(self.channel.clone()))
    }
}
