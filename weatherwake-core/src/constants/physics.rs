//! Physical Constants for WeatherWake
//!
//! Fixed values used by the unit conversion library. They are kept exactly as
//! the station's reference formulas state them, including the simplified
//! Kelvin offset, so derived values stay comparable with historical reports.

// ===== PRESSURE =====

/// Inches of mercury per hectopascal.
///
/// Source: NIST SP 811, Appendix B.8 (1 inHg = 33.8639 hPa)
pub const HPA_TO_IN_MERCURY: f64 = 0.0295299830714;

/// Millimeters per inch (exact by definition).
pub const MM_PER_INCH: f64 = 25.4;

// ===== SCALE HEIGHT =====

/// Standard gravitational acceleration used for the scale height (m/s²).
///
/// Rounded to three decimals; the standard value is 9.80665.
pub const GRAVITATIONAL_ACCELERATION: f64 = 9.807;

/// Specific gas constant of dry air (J/kg·K).
///
/// Source: ICAO Standard Atmosphere (287.05, rounded)
pub const ATM_JOULES_PER_KILOGRAM_KELVIN: f64 = 287.1;

/// Offset from Celsius to Kelvin used by the sea-level reduction.
///
/// Known accuracy gap: the exact offset is 273.15. The reduction formula has
/// always used 273.1 and changing it would shift every reported sea-level
/// pressure by a few hundredths of a hPa at altitude.
pub const KELVIN_OFFSET_APPROX: f64 = 273.1;

// ===== TEMPERATURE =====

/// Fahrenheit degrees per Celsius degree.
pub const FAHRENHEIT_PER_CELSIUS: f64 = 9.0 / 5.0;

/// Fahrenheit value of 0°C.
pub const FAHRENHEIT_FREEZING: f64 = 32.0;

// ===== ROUNDING =====

/// Scale at which every conversion is rounded (three decimals).
pub const ROUNDING_SCALE: f64 = 1000.0;
