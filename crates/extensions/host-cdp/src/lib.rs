//! # pagescript Host - CDP
//!
//! Tab lookup and script injection for a Chromium browser started with
//! `--remote-debugging-port`.
//!
//! - Direct calls run in a named isolated world (`Page.createIsolatedWorld`
//!   plus `Runtime.callFunctionOn`) or in the page's main world
//!   (`Runtime.evaluate`).
//! - Persistent registrations use `Page.addScriptToEvaluateOnNewDocument`
//!   with a URL guard in the page.

pub mod cdp;
mod host;
mod registration;
mod tabs;

pub use host::CdpHost;
pub use registration::guarded_source;
pub use tabs::TabTable;
