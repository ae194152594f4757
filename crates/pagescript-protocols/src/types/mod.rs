//! Common types used across pagescript.

mod execution;
mod settings;
mod status;
mod summary;
mod tab;

pub use execution::*;
pub use settings::*;
pub use status::*;
pub use summary::*;
pub use tab::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
