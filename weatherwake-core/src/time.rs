//! Time management for the station
//!
//! Provides the calendar breakdown every `TimeSource` reports, plus two
//! ready-made sources:
//! - `ManualClock` (tests, simulation, replay)
//! - `SystemClock` (host wall clock, requires `std`)

use crate::constants::time::{DAYS_PER_WEEK, EPOCH_WEEKDAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::traits::TimeSource;

/// Epoch seconds as carried by observations and alarms
pub type Epoch = i32;

/// Calendar fields of a local epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarFields {
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub day: u8,
    /// Hour of day, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
}

impl CalendarFields {
    /// Break a local epoch down into weekday and time of day.
    ///
    /// Works for epochs before 1970 as well (Euclidean remainder).
    pub fn from_epoch(local_epoch: i64) -> Self {
        let seconds_per_day = i64::from(SECONDS_PER_HOUR) * 24;
        let days = local_epoch.div_euclid(seconds_per_day);
        let of_day = local_epoch.rem_euclid(seconds_per_day);

        Self {
            day: (days + EPOCH_WEEKDAY).rem_euclid(i64::from(DAYS_PER_WEEK)) as u8,
            hour: (of_day / i64::from(SECONDS_PER_HOUR)) as u8,
            minute: ((of_day % i64::from(SECONDS_PER_HOUR)) / i64::from(SECONDS_PER_MINUTE)) as u8,
            second: (of_day % i64::from(SECONDS_PER_MINUTE)) as u8,
        }
    }
}

/// Convert a 64-bit epoch to the 32-bit device representation, saturating.
pub fn clamp_epoch(epoch: i64) -> Epoch {
    epoch.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as Epoch
}

/// Controllable time source
///
/// Monotonic and wall-clock time advance together through `advance_ms()`;
/// `set_utc_epoch()` simulates an NTP step without touching the tick counter.
#[derive(Debug, Clone)]
pub struct ManualClock {
    monotonic_ms: u64,
    utc_ms: i64,
    offset_min: i32,
    updates: u32,
    resyncs: u32,
}

impl ManualClock {
    /// Clock at boot (tick 0) showing `utc_epoch` seconds, no offset.
    pub fn new(utc_epoch: i64) -> Self {
        Self {
            monotonic_ms: 0,
            utc_ms: utc_epoch * 1000,
            offset_min: 0,
            updates: 0,
            resyncs: 0,
        }
    }

    /// Set the timezone offset without counting it as a resync.
    pub fn with_offset(mut self, minutes: i32) -> Self {
        self.offset_min = minutes;
        self
    }

    /// Move both clocks forward.
    pub fn advance_ms(&mut self, ms: u64) {
        self.monotonic_ms = self.monotonic_ms.saturating_add(ms);
        self.utc_ms = self.utc_ms.saturating_add(ms as i64);
    }

    /// Step the wall clock only.
    pub fn set_utc_epoch(&mut self, utc_epoch: i64) {
        self.utc_ms = utc_epoch * 1000;
    }

    /// Current offset in minutes.
    pub fn offset_min(&self) -> i32 {
        self.offset_min
    }

    /// Number of `update()` polls seen.
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Number of forced resynchronizations.
    pub fn resyncs(&self) -> u32 {
        self.resyncs
    }

    fn local_epoch(&self) -> i64 {
        self.utc_ms.div_euclid(1000) + i64::from(self.offset_min) * i64::from(SECONDS_PER_MINUTE)
    }
}

impl TimeSource for ManualClock {
    fn update(&mut self) {
        self.updates = self.updates.saturating_add(1);
    }

    fn monotonic_ms(&self) -> u64 {
        self.monotonic_ms
    }

    fn current_epoch(&self) -> Epoch {
        clamp_epoch(self.local_epoch())
    }

    fn calendar_fields(&self) -> CalendarFields {
        CalendarFields::from_epoch(self.local_epoch())
    }

    fn set_offset(&mut self, minutes: i32) {
        self.offset_min = minutes;
    }

    fn force_resync(&mut self) {
        self.resyncs = self.resyncs.saturating_add(1);
    }
}

/// Host wall clock (requires std)
///
/// The operating system keeps the clock in sync, so `update()` and
/// `force_resync()` have nothing to do.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock {
    boot: std::time::Instant,
    offset_min: i32,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Clock with the given timezone offset in minutes.
    pub fn new(offset_min: i32) -> Self {
        Self {
            boot: std::time::Instant::now(),
            offset_min,
        }
    }

    fn local_epoch(&self) -> i64 {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        let utc = StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        utc + i64::from(self.offset_min) * i64::from(SECONDS_PER_MINUTE)
    }
}

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn update(&mut self) {}

    fn monotonic_ms(&self) -> u64 {
        self.boot.elapsed().as_millis() as u64
    }

    fn current_epoch(&self) -> Epoch {
        clamp_epoch(self.local_epoch())
    }

    fn calendar_fields(&self) -> CalendarFields {
        CalendarFields::from_epoch(self.local_epoch())
    }

    fn set_offset(&mut self, minutes: i32) {
        self.offset_min = minutes;
    }

    fn force_resync(&mut self) {
        log_debug!("System clock resync requested, nothing to do");
    }
}
