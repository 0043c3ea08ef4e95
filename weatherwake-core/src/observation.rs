//! Weather Observation Record
//!
//! One sampled reading with its timestamp. The engine keeps exactly one,
//! overwritten as a whole on every successful sample and left untouched when
//! a sample faults.
//!
//! ```text
//! Observation (24 bytes)
//! ├── temperature  f32  °C, averaged over all sources
//! ├── humidity     f32  %RH
//! ├── pressure     f32  hPa at the station (not sea level)
//! ├── day/hour/minute/second  4 × u8
//! └── epoch        i32  local seconds since 1970
//! ```

use serde::Serialize;

use crate::time::{CalendarFields, Epoch};

/// Short weekday names, indexed 0 = Sunday
pub const DAY_NAMES: [&str; 7] = ["Sun.", "Mon.", "Tue.", "Wed.", "Thu.", "Fri.", "Sat."];

/// Name of a weekday index.
///
/// # Panics
///
/// Panics when `day > 6`. Valid calendar input never produces such an index,
/// so reaching this is a broken time source, not a recoverable condition.
pub fn day_name(day: u8) -> &'static str {
    assert!(
        usize::from(day) < DAY_NAMES.len(),
        "day of week index {} out of range",
        day
    );
    DAY_NAMES[usize::from(day)]
}

/// Single environmental observation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// Station-level pressure in hPa
    pub pressure: f32,
    /// Day of week, 0 = Sunday
    pub day: u8,
    /// Hour of day
    pub hour: u8,
    /// Minute
    pub minute: u8,
    /// Second
    pub second: u8,
    /// Local epoch seconds
    pub epoch: Epoch,
}

impl Observation {
    /// Calendar fields of this observation.
    pub fn calendar(&self) -> CalendarFields {
        CalendarFields {
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
        }
    }

    /// Weekday name of this observation.
    pub fn day_name(&self) -> &'static str {
        day_name(self.day)
    }

    /// True until the first successful sample.
    pub fn is_empty(&self) -> bool {
        self.epoch == 0
    }
}
