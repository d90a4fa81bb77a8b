//! External API integrations

pub mod thingspeak;

pub use thingspeak::ThingSpeakClient;
