//! Environmental Sensor Capability
//!
//! A station carries a barometer (which also measures its own die
//! temperature) and a combined humidity/temperature probe. Drivers stay
//! outside the core; the sampler only sees this trait.
//!
//! Drivers report failure either as an `Err` or by returning the sensor's
//! sentinel value (NaN, or zero pressure). The sampler treats both the same.

use crate::errors::SensorResult;

/// Raw reading capability for the station's sensors
pub trait EnvironmentSensor {
    /// Station-level pressure in hPa.
    fn read_pressure(&mut self) -> SensorResult<f32>;

    /// Relative humidity in % and air temperature in °C, in that order.
    fn read_humidity_temperature(&mut self) -> SensorResult<(f32, f32)>;

    /// Second, independent temperature source in °C, if the hardware has one.
    ///
    /// Barometers usually expose a die temperature. When present it is
    /// averaged with the humidity probe's temperature to cancel sensor bias.
    fn read_auxiliary_temperature(&mut self) -> Option<f32> {
        None
    }
}
