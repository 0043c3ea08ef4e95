//! Daily Alarm State Machine
//!
//! A single epoch-based trigger. The station samples on a fixed interval, so
//! the alarm is never hit exactly: it fires on the first sample that lands
//! inside the missed-alarm window after its timestamp.
//!
//! ```text
//! update(0)                   ──► Disabled
//! update(T), T <= last epoch  ──► Rung
//! update(T), T >  last epoch  ──► Armed
//! Armed, sample T < E <= T+w  ──► Rung (fires)
//! ```
//!
//! A sample that lands beyond the window never fires; the engine marks such
//! an alarm rung without notifying. Nothing here sends anything, the engine
//! drives the side effects of a firing.

use crate::constants::time::SECONDS_PER_DAY;
use crate::time::Epoch;

/// Observable alarm state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Timestamp is zero
    Disabled,
    /// Waiting for its timestamp
    Armed,
    /// Fired, or was already in the past when set
    Rung,
}

/// What `Alarm::update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmUpdate {
    /// Same timestamp as before, nothing touched
    Unchanged,
    /// Timestamp zero, alarm off
    Disabled,
    /// Timestamp at or before the last observation, marked rung silently
    Passed,
    /// Timestamp in the future, waiting to fire
    Armed,
}

/// Single daily alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    timestamp: Epoch,
    rang: bool,
}

impl Default for Alarm {
    fn default() -> Self {
        Self::new()
    }
}

impl Alarm {
    /// Bootstrap state: disabled and rung.
    pub const fn new() -> Self {
        Self {
            timestamp: 0,
            rang: true,
        }
    }

    /// Local epoch the alarm is set for, 0 when disabled.
    pub fn timestamp(&self) -> Epoch {
        self.timestamp
    }

    /// Whether the alarm has fired (or can no longer fire).
    pub fn rang(&self) -> bool {
        self.rang
    }

    /// Current state.
    pub fn state(&self) -> AlarmState {
        if self.timestamp == 0 {
            AlarmState::Disabled
        } else if self.rang {
            AlarmState::Rung
        } else {
            AlarmState::Armed
        }
    }

    /// Set a new timestamp, judged against the most recent observation epoch.
    pub fn update(&mut self, timestamp: Epoch, last_epoch: Epoch) -> AlarmUpdate {
        if timestamp == self.timestamp {
            return AlarmUpdate::Unchanged;
        }

        self.timestamp = timestamp;
        if timestamp == 0 {
            self.rang = true;
            AlarmUpdate::Disabled
        } else if timestamp <= last_epoch {
            self.rang = true;
            AlarmUpdate::Passed
        } else {
            self.rang = false;
            AlarmUpdate::Armed
        }
    }

    /// True when an armed alarm should fire for a sample taken at `epoch`.
    ///
    /// Fires when `T < epoch <= T + window_s`.
    pub fn is_due(&self, epoch: Epoch, window_s: i64) -> bool {
        if self.rang {
            return false;
        }
        let timestamp = i64::from(self.timestamp);
        let epoch = i64::from(epoch);
        timestamp < epoch && epoch <= timestamp + window_s
    }

    /// True when an armed alarm's window closed before any sample saw it.
    pub fn is_missed(&self, epoch: Epoch, window_s: i64) -> bool {
        !self.rang && i64::from(epoch) > i64::from(self.timestamp) + window_s
    }

    /// Record that the alarm fired.
    pub fn mark_rung(&mut self) {
        self.rang = true;
    }

    /// Same time tomorrow.
    pub fn next_day(&self) -> Epoch {
        self.timestamp.saturating_add(SECONDS_PER_DAY)
    }
}
