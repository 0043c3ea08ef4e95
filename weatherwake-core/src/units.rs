//! Unit Conversion Library
//!
//! Pure functions converting raw sensor quantities into the units a report
//! is rendered in. Every result is rounded half-up at the 1/1000 scale so
//! repeated conversions cannot accumulate floating point drift.
//!
//! ## Sea-Level Pressure
//!
//! A station barometer measures the weight of the air column above it, so
//! the same weather reads lower on a hill than at the coast. Reports always
//! show pressure reduced to sea level:
//!
//! ```text
//! T  = 273.1 + t(°C)
//! H  = R·T / g           (scale height, ~8.4 km at 15°C)
//! P0 = P · e^(h / H)
//! ```
//!
//! This single-scale-height reduction is adequate for moderate altitudes.
//! Mountain stations would normally use a standard-atmosphere table instead.
//!
//! ## Why libm?
//!
//! `f64::exp` and `f64::round` live in `std`. The core is `no_std`, so the
//! software implementations from `libm` are used on every target to keep
//! results identical between the device and host tests.

use crate::constants::physics::{
    ATM_JOULES_PER_KILOGRAM_KELVIN, FAHRENHEIT_FREEZING, FAHRENHEIT_PER_CELSIUS,
    GRAVITATIONAL_ACCELERATION, HPA_TO_IN_MERCURY, KELVIN_OFFSET_APPROX, MM_PER_INCH,
    ROUNDING_SCALE,
};

/// Round to three decimals, half-up.
#[inline]
pub fn round_milli(value: f64) -> f64 {
    libm::floor(value * ROUNDING_SCALE + 0.5) / ROUNDING_SCALE
}

/// Convert Celsius to Fahrenheit, rounded to 3 decimals.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    let scaled = f64::from(celsius) * FAHRENHEIT_PER_CELSIUS * ROUNDING_SCALE
        + FAHRENHEIT_FREEZING * ROUNDING_SCALE;
    (libm::floor(scaled + 0.5) / ROUNDING_SCALE) as f32
}

/// Convert Fahrenheit to Celsius, rounded to 3 decimals.
pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    round_milli((f64::from(fahrenheit) - FAHRENHEIT_FREEZING) / FAHRENHEIT_PER_CELSIUS) as f32
}

/// Convert hectopascals to inches of mercury, rounded to 3 decimals.
pub fn hpa_to_inhg(hpa: f32) -> f32 {
    round_milli(HPA_TO_IN_MERCURY * f64::from(hpa)) as f32
}

/// Convert inches (of mercury) to millimeters, rounded to 3 decimals.
pub fn inhg_to_mm(inches: f32) -> f32 {
    round_milli(MM_PER_INCH * f64::from(inches)) as f32
}

/// Scale height of the atmosphere for a given air temperature (m).
pub fn scale_height(celsius: f32) -> f64 {
    let kelvin = KELVIN_OFFSET_APPROX + f64::from(celsius);
    ATM_JOULES_PER_KILOGRAM_KELVIN * kelvin / GRAVITATIONAL_ACCELERATION
}

/// Reduce a station pressure reading to sea level, rounded to 3 decimals.
///
/// `altitude` is the station height in meters; negative values (below sea
/// level) reduce the pressure.
pub fn station_pressure_to_sea_level(celsius: f32, hpa: f32, altitude: i32) -> f32 {
    let factor = libm::exp(f64::from(altitude) / scale_height(celsius));
    round_milli(f64::from(hpa) * factor) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn fahrenheit_reference_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert!(close(celsius_to_fahrenheit(21.5), 70.7, 0.0005));
    }

    #[test]
    fn rounding_is_three_decimals() {
        assert_eq!(round_milli(1.23449), 1.234);
        assert_eq!(round_milli(2.0625), 2.063);
        assert_eq!(round_milli(-1.2344), -1.234);
    }

    #[test]
    fn mercury_conversions() {
        assert!(close(hpa_to_inhg(1013.25), 29.921, 0.0005));
        assert!(close(inhg_to_mm(29.921), 759.993, 0.001));
        assert!(close(inhg_to_mm(1.0), 25.4, 0.0005));
    }

    #[test]
    fn sea_level_without_altitude_is_identity() {
        assert!(close(station_pressure_to_sea_level(15.0, 1013.25, 0), 1013.25, 0.0005));
    }

    #[test]
    fn sea_level_raises_pressure_at_altitude() {
        // Denver-ish station: 1600 m, 835 hPa, 15°C
        let reduced = station_pressure_to_sea_level(15.0, 835.0, 1600);
        assert!(reduced > 1000.0 && reduced < 1030.0, "got {}", reduced);

        // Below sea level lowers it
        assert!(station_pressure_to_sea_level(25.0, 1065.0, -430) < 1065.0);
    }

    #[test]
    fn colder_air_means_larger_correction() {
        let cold = station_pressure_to_sea_level(-10.0, 900.0, 1000);
        let warm = station_pressure_to_sea_level(30.0, 900.0, 1000);
        assert!(cold > warm);
    }
}
