// libleia/src/protocol/mod.rs

pub mod commands;
pub mod exchange;
pub mod frame;
pub mod parser;
pub mod responses;
pub mod status;

pub use commands::*;
pub use exchange::Exchange;
pub use frame::{CommandFrame, ResponseFrame};
pub use responses::*;
pub use status::StatusFlag;
