//! Shared types and models for the Smart Farm Dashboard
//!
//! This crate contains the sensor and soil-analysis domain types shared
//! between the backend and its tests.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
