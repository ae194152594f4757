//! Text-generation provider protocol definitions.
//!
//! Cloud providers are stateless HTTPS completion services keyed by an API
//! key. The on-device provider hands out a stateful session that the caller
//! owns and must destroy when it fails.

mod request;
mod traits;

pub use request::*;
pub use traits::*;
