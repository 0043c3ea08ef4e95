//! Station Configuration Limits
//!
//! Accepted ranges for the validated configuration setters.

/// Lowest accepted station altitude (m).
///
/// Dead Sea shore is about -430 m.
pub const ALTITUDE_MIN_M: i32 = -500;

/// Highest accepted station altitude (m).
///
/// Above this the single scale-height reduction is no longer meaningful.
pub const ALTITUDE_MAX_M: i32 = 9000;

/// Lowest accepted timezone offset (minutes), UTC-14:00.
pub const TZ_OFFSET_MIN_MIN: i32 = -14 * 60;

/// Highest accepted timezone offset (minutes), UTC+14:00.
pub const TZ_OFFSET_MAX_MIN: i32 = 14 * 60;

/// Intro prepended to the report sent when the alarm fires.
pub const ALARM_REPORT_INTRO: &str = "Daily Report!\n";
