//! Time Source Capability
//!
//! The engine never reads a hardware clock directly. It asks an injected
//! `TimeSource` for two kinds of time:
//!
//! - **Monotonic milliseconds** for heartbeat gating. Never jumps, starts at
//!   boot.
//! - **Local wall-clock epoch** (seconds, timezone offset already applied)
//!   plus calendar fields for observations and alarm comparisons.
//!
//! ## Common Implementations
//!
//! - An NTP client polled from `update()`
//! - `ManualClock`: controllable time for tests and simulation
//! - `SystemClock`: host wall clock (requires `std`)

use crate::time::CalendarFields;

/// Source of time for the engine
///
/// ## Implementation Requirements
///
/// - `update()` is polled once per heartbeat and must not block longer than
///   one network round trip
/// - `current_epoch()` and `calendar_fields()` must describe the same instant
///   when called back to back
/// - `set_offset()` must take effect on the next read, not the next sync
pub trait TimeSource {
    /// Poll the underlying synchronization (e.g. NTP). Called every heartbeat.
    fn update(&mut self);

    /// Milliseconds since boot. Used only for interval gating.
    fn monotonic_ms(&self) -> u64;

    /// Local epoch seconds (UTC epoch plus the configured offset).
    ///
    /// Signed 32-bit to match the Unix `time_t` of the device; rolls over in
    /// 2038.
    fn current_epoch(&self) -> i32;

    /// Day of week (0 = Sunday), hour, minute and second of `current_epoch()`.
    fn calendar_fields(&self) -> CalendarFields;

    /// Change the timezone offset, in minutes east of UTC.
    fn set_offset(&mut self, minutes: i32);

    /// Resynchronize with the network now instead of at the next interval.
    fn force_resync(&mut self);
}
