//! Sensor reading models

use serde::{Deserialize, Serialize};

/// One multi-field reading from the field sensors.
///
/// Constructed fresh for every dashboard request and discarded after
/// rendering; readings are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// Soil moisture percentage (0-100)
    pub soil_moisture: f64,
    /// Ambient temperature in Celsius (-50 to 60)
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Collection timestamp as reported by the channel
    pub timestamp: String,
    /// True when this is the canned fallback reading, not live data
    pub is_demo: bool,
}

impl SensorReading {
    pub const DEMO_SOIL_MOISTURE: f64 = 45.0;
    pub const DEMO_TEMPERATURE: f64 = 25.5;
    pub const DEMO_HUMIDITY: f64 = 65.0;

    /// The constant fallback reading used when the channel cannot be read
    pub fn demo() -> Self {
        Self {
            soil_moisture: Self::DEMO_SOIL_MOISTURE,
            temperature: Self::DEMO_TEMPERATURE,
            humidity: Self::DEMO_HUMIDITY,
            timestamp: "Demo Data (Not Real-time)".to_string(),
            is_demo: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reading_values() {
        let reading = SensorReading::demo();
        assert_eq!(reading.soil_moisture, 45.0);
        assert_eq!(reading.temperature, 25.5);
        assert_eq!(reading.humidity, 65.0);
        assert!(reading.is_demo);
    }
}
