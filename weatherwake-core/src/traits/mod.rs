//! Capability Traits for WeatherWake
//!
//! The engine owns its state but none of its hardware. Everything that
//! touches the outside world is injected as one of these traits, which keeps
//! the core testable on a host with plain test doubles.
//!
//! ## Module Organization
//!
//! - [`sensor`] - raw environmental readings
//! - [`time`] - monotonic ticks, wall clock and calendar
//! - [`transport`] - pub/sub publishing and outbound notifications
//!
//! ## Design Philosophy
//!
//! The engine is generic over these traits, so calls are statically
//! dispatched and a firmware build only contains the drivers it uses.
//!
//! ```rust
//! use weatherwake_core::traits::EnvironmentSensor;
//! use weatherwake_core::SensorResult;
//!
//! struct BenchSensor;
//!
//! impl EnvironmentSensor for BenchSensor {
//!     fn read_pressure(&mut self) -> SensorResult<f32> {
//!         Ok(1013.25)
//!     }
//!
//!     fn read_humidity_temperature(&mut self) -> SensorResult<(f32, f32)> {
//!         Ok((45.0, 21.0))
//!     }
//! }
//! ```

pub mod sensor;
pub mod time;
pub mod transport;

pub use sensor::EnvironmentSensor;
pub use time::TimeSource;
pub use transport::{Messenger, OutboundMessage, Publisher};
