//! Chrome DevTools Protocol (CDP) client.
//!
//! Connects to Chrome/Chromium via WebSocket and speaks the CDP JSON-RPC
//! protocol. Start the browser with remote debugging enabled:
//!
//! ```bash
//! chrome --remote-debugging-port=9222
//! ```

mod client;
mod error;
mod protocol;
mod session;
mod transport;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
