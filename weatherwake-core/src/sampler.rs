//! Observation Sampler
//!
//! Turns one round of raw sensor reads into an [`Observation`]. Readings are
//! checked before anything is built, so a failed sample produces no partial
//! record and the caller's last good observation survives untouched.
//!
//! ## Validity Rules
//!
//! | Reading      | Rejected when             |
//! |--------------|---------------------------|
//! | pressure     | not finite, or <= 0 hPa   |
//! | humidity     | not finite                |
//! | temperature  | not finite                |
//!
//! The barometer driver reports 0 hPa when it cannot read the chip, which is
//! why non-positive pressure counts as a fault. A non-finite auxiliary
//! temperature is ignored rather than failing the sample.

use crate::errors::{SensorFault, SensorResult};
use crate::observation::Observation;
use crate::traits::{EnvironmentSensor, TimeSource};

/// Read every sensor and timestamp the result.
pub fn sample<S, T>(sensor: &mut S, clock: &T) -> SensorResult<Observation>
where
    S: EnvironmentSensor,
    T: TimeSource,
{
    let pressure = sensor.read_pressure()?;
    if !pressure.is_finite() || pressure <= 0.0 {
        return Err(SensorFault::InvalidPressure);
    }

    let (humidity, temperature) = sensor.read_humidity_temperature()?;
    if !humidity.is_finite() {
        return Err(SensorFault::InvalidHumidity);
    }
    if !temperature.is_finite() {
        return Err(SensorFault::InvalidTemperature);
    }

    let temperature = match sensor.read_auxiliary_temperature() {
        Some(auxiliary) if auxiliary.is_finite() => (temperature + auxiliary) / 2.0,
        _ => temperature,
    };

    let calendar = clock.calendar_fields();
    Ok(Observation {
        temperature,
        humidity,
        pressure,
        day: calendar.day,
        hour: calendar.hour,
        minute: calendar.minute,
        second: calendar.second,
        epoch: clock.current_epoch(),
    })
}
