//! Error Types for the Observation and Alarm Engine
//!
//! ## Design Philosophy
//!
//! The engine runs on devices with a few KiB of free heap, so errors follow
//! the same rules as the rest of the core:
//!
//! 1. **Small Size**: every variant carries at most a couple of scalars or a
//!    `&'static str`.
//! 2. **No Heap Allocation**: messages are static strings only.
//! 3. **Copy Semantics**: errors are cheap to return, log and store.
//!
//! ## Error Categories
//!
//! ### Sensor Faults
//! - `SensorFault`: a driver returned a non-finite or sentinel reading. The
//!   engine skips the tick and keeps the last good observation.
//!
//! ### Transport Faults
//! - `TransportFault`: a publish or message send failed. Surfaced to the
//!   caller as a non-fatal warning. Nothing in the core retries.
//!
//! ### Validation Faults
//! - `ValidationFault`: a configuration setter rejected its input. The prior
//!   value is kept.
//!
//! An out-of-range day-of-week index is not represented here: it can only
//! come from a broken time source and is treated as an assertion.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use weatherwake_core::{SensorFault, TransportFault};
//!
//! fn on_sensor(result: Result<(), SensorFault>) {
//!     match result {
//!         Ok(()) => {}
//!         Err(SensorFault::InvalidPressure) => {
//!             // check_i2c_wiring();
//!         }
//!         Err(_) => {
//!             // keep the previous observation and wait for the next tick
//!         }
//!     }
//! }
//!
//! fn on_publish(result: Result<(), TransportFault>) {
//!     if let Err(fault) = result {
//!         // warn and move on, the shadow will be reported again later
//!         let _ = fault;
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for sensor reads
pub type SensorResult<T> = Result<T, SensorFault>;

/// Result type for publish and send operations
pub type TransportResult = Result<(), TransportFault>;

/// Result type for configuration setters
pub type ValidationResult = Result<(), ValidationFault>;

/// Sensor read failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFault {
    /// Pressure reading was NaN, infinite or the driver's zero sentinel
    #[error("Invalid pressure reading")]
    InvalidPressure,

    /// Humidity reading was NaN or infinite
    #[error("Invalid humidity reading")]
    InvalidHumidity,

    /// Temperature reading was NaN or infinite
    #[error("Invalid temperature reading")]
    InvalidTemperature,

    /// Driver could not talk to the device at all
    #[error("Sensor bus error: {reason}")]
    Bus {
        /// Driver supplied description
        reason: &'static str,
    },
}

/// Publish or outbound message failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportFault {
    /// Transport has no live connection
    #[error("Transport not connected")]
    NotConnected,

    /// Payload larger than the transport accepts
    #[error("Payload of {len} bytes exceeds limit of {max}")]
    PayloadTooLarge {
        /// Payload length in bytes
        len: usize,
        /// Transport limit in bytes
        max: usize,
    },

    /// Transport refused the request
    #[error("Transport rejected request: {reason}")]
    Rejected {
        /// Transport supplied description
        reason: &'static str,
    },
}

/// Configuration setter rejected its input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationFault {
    /// Unit system was neither "metric" nor "imperial"
    #[error("Unit type must be 'imperial' or 'metric'")]
    UnknownUnits,

    /// Altitude outside the supported range
    #[error("Altitude {value} m outside range [{min}, {max}]")]
    AltitudeOutOfRange {
        /// Requested altitude in meters
        value: i32,
        /// Lowest accepted altitude
        min: i32,
        /// Highest accepted altitude
        max: i32,
    },

    /// Timezone offset outside the supported range
    #[error("Timezone offset {value} min outside range [{min}, {max}]")]
    TimezoneOutOfRange {
        /// Requested offset in minutes
        value: i32,
        /// Lowest accepted offset
        min: i32,
        /// Highest accepted offset
        max: i32,
    },

    /// Notification identity malformed or too long
    #[error("Invalid identity: {reason}")]
    InvalidIdentity {
        /// What was wrong with it
        reason: &'static str,
    },

    /// Topic empty or too long
    #[error("Invalid topic: {reason}")]
    InvalidTopic {
        /// What was wrong with it
        reason: &'static str,
    },

    /// Sample interval too short for a missed-alarm window
    #[error("Sample interval {value_ms} ms below minimum of {min_ms} ms")]
    SampleIntervalTooShort {
        /// Requested interval
        value_ms: u64,
        /// Shortest accepted interval
        min_ms: u64,
    },
}
