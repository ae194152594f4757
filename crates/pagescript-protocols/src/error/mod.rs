//! Error types for the pagescript protocol layer.

mod host;
mod protocol;
mod provider;
mod store;

pub use host::*;
pub use protocol::*;
pub use provider::*;
pub use store::*;
