//! Browser host protocol definitions.
//!
//! A host gives access to tabs and to the platform's script-injection
//! mechanisms. Which mechanisms exist varies by host, so callers inspect
//! [`InjectionCapabilities`] at call time instead of assuming one.

mod pattern;
mod script;
mod traits;

pub use pattern::*;
pub use script::*;
pub use traits::*;
