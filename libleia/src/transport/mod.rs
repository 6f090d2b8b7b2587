// libleia/src/transport/mod.rs

pub mod mock;
#[cfg(feature = "serial")]
pub mod serial;
mod stream;
pub mod traits;

pub use mock::{MockChannel, MockDiscovery};
#[cfg(feature = "serial")]
pub use serial::{SerialChannel, SerialDiscovery};
pub use traits::{Channel, ChannelSettings, PortDiscovery, PortInfo};
