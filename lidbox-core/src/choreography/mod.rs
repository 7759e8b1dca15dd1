//! Behavior repertoire and selection
//!
//! Each behavior is a fixed, hand-authored script of servo moves, pauses
//! and (for two of them) proximity checks. The choreographer runs one
//! behavior per invocation and then picks the next one.

pub mod behavior;
pub mod choreographer;

pub use behavior::Behavior;
pub use choreographer::{Choreographer, Ensemble};
