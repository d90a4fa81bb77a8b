//! HTTP handlers

mod dashboard;
mod health;

pub use dashboard::*;
pub use health::*;
