//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware validates its
//! `machine.toml` at build time and embeds it as postcard binary data.

pub mod actuator;
pub mod machine;

pub use actuator::*;
pub use machine::*;
