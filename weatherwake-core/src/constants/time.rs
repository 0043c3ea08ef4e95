//! Time-Related Constants
//!
//! Intervals and conversion factors used for heartbeat gating, alarm
//! rescheduling and calendar arithmetic.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day. A fired alarm is rescheduled exactly this far ahead.
pub const SECONDS_PER_DAY: i32 = (SECONDS_PER_HOUR * HOURS_PER_DAY) as i32;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE as u64;

/// Days per week.
pub const DAYS_PER_WEEK: u8 = 7;

/// Day of week of the Unix epoch (1970-01-01 was a Thursday, 0 = Sunday).
pub const EPOCH_WEEKDAY: i64 = 4;

// ===== SAMPLING INTERVALS =====

/// Default weather sampling interval (milliseconds).
///
/// Three minutes keeps the sensors cool and the radio mostly idle while the
/// missed-alarm window (twice this) stays at six minutes.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 3 * MS_PER_MINUTE;

/// Multiplier from sample interval to missed-alarm detection window.
///
/// Alarm crossings are only seen at sample boundaries, so the window must
/// cover one skipped tick.
pub const MISSED_ALARM_WINDOW_SAMPLES: i64 = 2;

/// Shortest accepted sample interval (milliseconds).
///
/// The missed-alarm window is counted in whole seconds, so a shorter interval
/// would leave an empty window and no alarm could ever fire.
pub const MIN_SAMPLE_INTERVAL_MS: u64 = MS_PER_SECOND;
