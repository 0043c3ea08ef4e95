//! Core engine for WeatherWake
//!
//! Samples a barometer and a humidity probe, keeps one daily alarm and
//! texts a weather report when it rings. Preferences are mirrored to a
//! cloud shadow document over pub/sub.
//!
//! Key constraints:
//! - Runs on ESP8266-class boards (~40KB free heap)
//! - Every produced string has a fixed capacity
//! - One heartbeat at a time, no threads, no async
//!
//! ```no_run
//! use weatherwake_core::{compose_report, Observation, UnitSystem};
//!
//! let obs = Observation {
//!     temperature: 21.0,
//!     humidity: 48.0,
//!     pressure: 1009.5,
//!     ..Observation::default()
//! };
//!
//! let report = compose_report("Hello!\n", &obs, UnitSystem::Imperial, 120);
//! assert!(report.len() <= 160);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod logging;

pub mod alarm;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod observation;
pub mod report;
pub mod sampler;
pub mod shadow;
pub mod text;
pub mod time;
pub mod traits;
pub mod units;

// Public API
pub use alarm::{Alarm, AlarmState, AlarmUpdate};
pub use config::{EngineSettings, StationConfig, UnitSystem};
pub use engine::{AlarmFiring, Engine, EngineState, Tick};
pub use errors::{
    SensorFault, SensorResult, TransportFault, TransportResult, ValidationFault, ValidationResult,
};
pub use observation::Observation;
pub use report::{compose_report, Report};
pub use shadow::{build_desired_document, build_reported_document, ShadowPayload, ShadowPreferences};
pub use time::{CalendarFields, Epoch, ManualClock};
pub use traits::{EnvironmentSensor, Messenger, OutboundMessage, Publisher, TimeSource};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
