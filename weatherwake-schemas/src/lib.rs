//! Wire Documents for WeatherWake
//!
//! ## Overview
//!
//! The core engine only produces documents; this crate reads them. It covers
//! everything that crosses the pub/sub boundary in the other direction, plus
//! the settings file a host build starts from:
//!
//! | Document            | Direction        | Module       |
//! |---------------------|------------------|--------------|
//! | shadow delta / full | cloud → station  | [`desired`]  |
//! | message envelope    | both             | [`envelope`] |
//! | station settings    | disk → station   | [`settings`] |
//!
//! ## Applying Desired State
//!
//! A decoded [`DesiredState`] is applied to a running engine field by field
//! through its validated setters. One bad field never blocks the others;
//! the [`ApplyReport`] lists what was applied and what was rejected:
//!
//! ```text
//! {"state":{"alt":120,"units":"kelvin"}}
//!        │
//!        ▼
//! decode_desired ──► DesiredState { alt: Some(120), units: Some("kelvin"), .. }
//!        │
//!        ▼
//! apply_desired  ──► ApplyReport { applied: [alt], rejected: [(units, UnknownUnits)] }
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use weatherwake_schemas::decode_desired;
//!
//! let desired = decode_desired(br#"{"state":{"desired":{"alarm":1710083529,"tz":-480}}}"#)?;
//! assert_eq!(desired.alarm, Some(1_710_083_529));
//! assert_eq!(desired.tz, Some(-480));
//! assert!(desired.units.is_none());
//! # Ok::<(), weatherwake_schemas::SchemaError>(())
//! ```

pub mod apply;
pub mod desired;
pub mod envelope;
pub mod settings;

pub use apply::{apply_desired, ApplyReport, Field, Rejection};
pub use desired::{decode_desired, DesiredState};
pub use envelope::{decode_envelope, MessageEnvelope, MessageKind};
pub use settings::{StationParts, StationSettings};

/// Wire document errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Not valid JSON, or a field has the wrong type
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Shadow document without a `state` object
    #[error("Document has no state object")]
    MissingState,

    /// Settings failed validation
    #[error("Invalid setting {field}: {fault}")]
    InvalidSetting {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        fault: weatherwake_core::ValidationFault,
    },
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Malformed(err.to_string())
    }
}
