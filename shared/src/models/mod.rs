//! Domain models for the Smart Farm Dashboard

mod sensor;
mod soil;

pub use sensor::*;
pub use soil::*;
