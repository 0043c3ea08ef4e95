//! Station Configuration
//!
//! Preferences mirrored in the shadow store: altitude, timezone, unit system,
//! who gets notified and from which identity, and the two pub/sub topics.
//!
//! Every field changes through a setter that validates first and replaces
//! the single field only on success. A rejected value leaves the previous
//! one in place, so the configuration is always internally valid.

use core::fmt;
use core::str::FromStr;

use heapless::String;
use serde::{Serialize, Serializer};

use crate::constants::buffers::{IDENTITY_MAX_LEN, TOPIC_MAX_LEN};
use crate::constants::station::{ALTITUDE_MAX_M, ALTITUDE_MIN_M, TZ_OFFSET_MAX_MIN, TZ_OFFSET_MIN_MIN};
use crate::constants::time::{
    DEFAULT_SAMPLE_INTERVAL_MS, MIN_SAMPLE_INTERVAL_MS, MISSED_ALARM_WINDOW_SAMPLES, MS_PER_SECOND,
};
use crate::errors::{ValidationFault, ValidationResult};

/// Notification identity (phone number in E.164 form)
pub type Identity = String<IDENTITY_MAX_LEN>;

/// Pub/sub topic name
pub type Topic = String<TOPIC_MAX_LEN>;

/// Unit system used for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitSystem {
    /// Celsius and millimeters of mercury
    #[default]
    Metric,
    /// Fahrenheit and inches of mercury
    Imperial,
}

impl UnitSystem {
    /// Wire name used in shadow documents and commands.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Temperature symbol shown after the value.
    pub const fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "C",
            Self::Imperial => "F",
        }
    }

    /// Length unit of the mercury column shown for pressure.
    pub const fn mercury_unit(self) -> &'static str {
        match self {
            Self::Metric => "mm",
            Self::Imperial => "in",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ValidationFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(ValidationFault::UnknownUnits),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UnitSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Check and copy a notification identity.
///
/// Accepts a '+' followed by 1 to `IDENTITY_MAX_LEN - 1` digits.
pub fn parse_identity(raw: &str) -> Result<Identity, ValidationFault> {
    let digits = raw.strip_prefix('+').ok_or(ValidationFault::InvalidIdentity {
        reason: "must start with '+'",
    })?;
    if digits.is_empty() {
        return Err(ValidationFault::InvalidIdentity { reason: "no digits" });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationFault::InvalidIdentity { reason: "digits only after '+'" });
    }

    let mut identity = Identity::new();
    identity
        .push_str(raw)
        .map_err(|_| ValidationFault::InvalidIdentity { reason: "too long" })?;
    Ok(identity)
}

/// Check and copy a publish topic.
///
/// Publish topics must be non-empty and free of the MQTT wildcards.
pub fn parse_topic(raw: &str) -> Result<Topic, ValidationFault> {
    if raw.is_empty() {
        return Err(ValidationFault::InvalidTopic { reason: "empty" });
    }
    if raw.contains(['+', '#']) {
        return Err(ValidationFault::InvalidTopic { reason: "wildcards not allowed" });
    }

    let mut topic = Topic::new();
    topic
        .push_str(raw)
        .map_err(|_| ValidationFault::InvalidTopic { reason: "too long" })?;
    Ok(topic)
}

/// Preferences of one station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationConfig {
    altitude_m: i32,
    tz_offset_min: i32,
    units: UnitSystem,
    master_identity: Identity,
    device_identity: Identity,
    message_topic: Topic,
    shadow_topic: Topic,
}

impl StationConfig {
    /// Config at sea level, UTC, metric units.
    pub fn new(
        device_identity: &str,
        master_identity: &str,
        message_topic: &str,
        shadow_topic: &str,
    ) -> Result<Self, ValidationFault> {
        Ok(Self {
            altitude_m: 0,
            tz_offset_min: 0,
            units: UnitSystem::Metric,
            master_identity: parse_identity(master_identity)?,
            device_identity: parse_identity(device_identity)?,
            message_topic: parse_topic(message_topic)?,
            shadow_topic: parse_topic(shadow_topic)?,
        })
    }

    /// Station altitude in meters.
    pub fn altitude_m(&self) -> i32 {
        self.altitude_m
    }

    /// Timezone offset in minutes east of UTC.
    pub fn tz_offset_min(&self) -> i32 {
        self.tz_offset_min
    }

    /// Unit system for reports.
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Who receives alarm notifications.
    pub fn master_identity(&self) -> &str {
        &self.master_identity
    }

    /// Identity notifications are sent from.
    pub fn device_identity(&self) -> &str {
        &self.device_identity
    }

    /// Channel the message gateway listens on.
    pub fn message_topic(&self) -> &str {
        &self.message_topic
    }

    /// Topic shadow documents are published to.
    pub fn shadow_topic(&self) -> &str {
        &self.shadow_topic
    }

    /// Replace the unit system from its wire name.
    pub fn set_units(&mut self, raw: &str) -> ValidationResult {
        self.units = raw.parse()?;
        Ok(())
    }

    /// Replace the altitude.
    pub fn set_altitude(&mut self, altitude_m: i32) -> ValidationResult {
        if !(ALTITUDE_MIN_M..=ALTITUDE_MAX_M).contains(&altitude_m) {
            return Err(ValidationFault::AltitudeOutOfRange {
                value: altitude_m,
                min: ALTITUDE_MIN_M,
                max: ALTITUDE_MAX_M,
            });
        }
        self.altitude_m = altitude_m;
        Ok(())
    }

    /// Replace the timezone offset.
    pub fn set_tz_offset(&mut self, minutes: i32) -> ValidationResult {
        if !(TZ_OFFSET_MIN_MIN..=TZ_OFFSET_MAX_MIN).contains(&minutes) {
            return Err(ValidationFault::TimezoneOutOfRange {
                value: minutes,
                min: TZ_OFFSET_MIN_MIN,
                max: TZ_OFFSET_MAX_MIN,
            });
        }
        self.tz_offset_min = minutes;
        Ok(())
    }

    /// Replace the device's own identity.
    pub fn set_device_identity(&mut self, raw: &str) -> ValidationResult {
        self.device_identity = parse_identity(raw)?;
        Ok(())
    }

    /// Replace the notification destination.
    pub fn set_master_identity(&mut self, raw: &str) -> ValidationResult {
        self.master_identity = parse_identity(raw)?;
        Ok(())
    }
}

/// Engine timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    sample_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
        }
    }
}

impl EngineSettings {
    /// Settings with a custom sample interval.
    ///
    /// Intervals under one second are rejected: the missed-alarm window
    /// would round down to zero seconds.
    pub fn with_sample_interval_ms(mut self, interval_ms: u64) -> Result<Self, ValidationFault> {
        if interval_ms < MIN_SAMPLE_INTERVAL_MS {
            return Err(ValidationFault::SampleIntervalTooShort {
                value_ms: interval_ms,
                min_ms: MIN_SAMPLE_INTERVAL_MS,
            });
        }
        self.sample_interval_ms = interval_ms;
        Ok(self)
    }

    /// Milliseconds between weather samples.
    pub fn sample_interval_ms(&self) -> u64 {
        self.sample_interval_ms
    }

    /// Missed-alarm detection window in seconds: two sample intervals.
    pub fn missed_alarm_window_s(&self) -> i64 {
        (self.sample_interval_ms / MS_PER_SECOND) as i64 * MISSED_ALARM_WINDOW_SAMPLES
    }
}
