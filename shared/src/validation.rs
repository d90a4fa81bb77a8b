//! Validation utilities for sensor readings
//!
//! Range bounds match what the field hardware can physically report; anything
//! outside them is treated as a broken or miscalibrated sensor.

/// Valid soil moisture range in percent
pub const SOIL_MOISTURE_MIN: f64 = 0.0;
pub const SOIL_MOISTURE_MAX: f64 = 100.0;

/// Realistic ambient temperature range in Celsius
pub const TEMPERATURE_MIN: f64 = -50.0;
pub const TEMPERATURE_MAX: f64 = 60.0;

/// Valid relative humidity range in percent
pub const HUMIDITY_MIN: f64 = 0.0;
pub const HUMIDITY_MAX: f64 = 100.0;

/// Check that a soil moisture percentage is measurable.
///
/// NaN fails the range check, so a garbage reading never passes.
pub fn is_valid_soil_moisture(value: f64) -> bool {
    value >= SOIL_MOISTURE_MIN && value <= SOIL_MOISTURE_MAX
}

/// Validate a soil moisture percentage
pub fn validate_soil_moisture(value: f64) -> Result<(), String> {
    if is_valid_soil_moisture(value) {
        Ok(())
    } else {
        Err(format!(
            "soil moisture {}% out of valid range ({}-{})",
            value, SOIL_MOISTURE_MIN, SOIL_MOISTURE_MAX
        ))
    }
}

/// Validate an ambient temperature in Celsius
pub fn validate_temperature(value: f64) -> Result<(), String> {
    if value >= TEMPERATURE_MIN && value <= TEMPERATURE_MAX {
        Ok(())
    } else {
        Err(format!(
            "temperature {}C out of realistic range ({} to {})",
            value, TEMPERATURE_MIN, TEMPERATURE_MAX
        ))
    }
}

/// Validate a relative humidity percentage
pub fn validate_humidity(value: f64) -> Result<(), String> {
    if value >= HUMIDITY_MIN && value <= HUMIDITY_MAX {
        Ok(())
    } else {
        Err(format!(
            "humidity {}% out of valid range ({}-{})",
            value, HUMIDITY_MIN, HUMIDITY_MAX
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_moisture_valid() {
        assert!(validate_soil_moisture(0.0).is_ok());
        assert!(validate_soil_moisture(45.0).is_ok());
        assert!(validate_soil_moisture(100.0).is_ok());
    }

    #[test]
    fn test_soil_moisture_invalid() {
        assert!(validate_soil_moisture(-0.1).is_err());
        assert!(validate_soil_moisture(100.1).is_err());
        assert!(validate_soil_moisture(150.0).is_err());
        assert!(validate_soil_moisture(f64::NAN).is_err());
    }

    #[test]
    fn test_temperature_bounds() {
        assert!(validate_temperature(-50.0).is_ok());
        assert!(validate_temperature(25.5).is_ok());
        assert!(validate_temperature(60.0).is_ok());
        assert!(validate_temperature(-50.1).is_err());
        assert!(validate_temperature(60.1).is_err());
    }

    #[test]
    fn test_humidity_bounds() {
        assert!(validate_humidity(0.0).is_ok());
        assert!(validate_humidity(65.0).is_ok());
        assert!(validate_humidity(100.0).is_ok());
        assert!(validate_humidity(-1.0).is_err());
        assert!(validate_humidity(101.0).is_err());
    }
}
