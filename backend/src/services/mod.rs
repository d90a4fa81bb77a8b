//! Business logic services

pub mod dashboard;
