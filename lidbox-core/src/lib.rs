//! Board-agnostic core logic for the lidbox firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo, switch, proximity sensor, motor)
//! - Interruptable stepwise servo motion
//! - Behavior repertoire and the choreographer that runs it
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod choreography;
pub mod config;
pub mod motion;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;
