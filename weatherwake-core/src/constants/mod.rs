//! Constants for WeatherWake Core
//!
//! Centralized numeric values used throughout the engine, grouped by domain:
//! - **Physics**: conversion factors for the unit library
//! - **Time**: intervals and calendar arithmetic
//! - **Buffers**: fixed capacities of every produced string
//! - **Station**: accepted ranges for configuration setters

/// Physical constants used by unit conversions.
pub mod physics;

/// Time-related constants for intervals and calendar math.
pub mod time;

/// Buffer capacities for payloads, reports and identities.
pub mod buffers;

/// Configuration ranges for the station setters.
pub mod station;

// Re-export commonly used constants for convenience
pub use physics::{HPA_TO_IN_MERCURY, KELVIN_OFFSET_APPROX};

pub use time::{
    DEFAULT_SAMPLE_INTERVAL_MS, MIN_SAMPLE_INTERVAL_MS, MISSED_ALARM_WINDOW_SAMPLES, MS_PER_SECOND,
    SECONDS_PER_DAY,
};

pub use buffers::{IDENTITY_MAX_LEN, MAX_PACKAGE_SIZE, REPORT_MAX_LEN, TOPIC_MAX_LEN};

pub use station::{ALTITUDE_MAX_M, ALTITUDE_MIN_M, TZ_OFFSET_MAX_MIN, TZ_OFFSET_MIN_MIN};
