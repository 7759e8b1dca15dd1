//! Sensor drivers

pub mod proximity;

pub use proximity::{AdcReader, AnalogProximity};
