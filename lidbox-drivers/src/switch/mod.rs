//! Switch input drivers

pub mod debounce;

pub use debounce::{DebounceButton, DEFAULT_SETTLE_MS};
