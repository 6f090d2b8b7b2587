// libleia/src/transport/serial/mod.rs

#![cfg(feature = "serial")]

use std::io::{self, Write};

use serialport::{SerialPort, SerialPortType};

use crate::transport::stream::read_up_to;
use crate::transport::traits::{Channel, ChannelSettings, PortDiscovery, PortInfo};
use crate::{Error, Result};

/// Discovery over the host's serial ports, backed by the `serialport`
/// crate. It is feature-gated behind `--features serial`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialDiscovery;

impl SerialDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl PortDiscovery for SerialDiscovery {
    fn list_ports(&self) -> Result<Vec<PortInfo>> {
        let ports = serialport::available_ports()?;
        Ok(ports
            .into_iter()
            .map(|info| match info.port_type {
                SerialPortType::UsbPort(usb) => PortInfo::usb(info.port_name, usb.vid, usb.pid),
                _ => PortInfo::new(info.port_name, None, None),
            })
            .collect())
    }

    fn open(&self, port: &PortInfo, settings: &ChannelSettings) -> Result<Box<dyn Channel>> {
        // serialport exposes a single timeout which governs both directions;
        // the read timeout is the one the protocol depends on.
        let inner = serialport::new(&port.name, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()?;
        Ok(Box::new(SerialChannel {
            name: port.name.clone(),
            port: Some(inner),
        }))
    }
}

/// Channel over an open serial port.
pub struct SerialChannel {
    name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialChannel {
    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(Error::NotConnected)
    }
}

impl Channel for SerialChannel {
    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let port = self.port()?;
        Ok(read_up_to(port, len)?)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let port = self.port()?;
        let mut written = 0usize;
        while written < data.len() {
            match port.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        port.flush()?;
        Ok(written)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        let port = self.port()?;
        Ok(port.bytes_to_read()? as usize)
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the handle closes the OS port.
        self.port = None;
        Ok(())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
