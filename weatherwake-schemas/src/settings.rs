//! Station Settings File
//!
//! Host builds start from a JSON file instead of compiled-in constants:
//!
//! ```json
//! {
//!   "device_identity": "+15550001111",
//!   "master_identity": "+15550002222",
//!   "message_topic": "twilio",
//!   "shadow_topic": "$aws/things/station/shadow/update",
//!   "altitude_m": 120,
//!   "tz_offset_min": -480,
//!   "units": "imperial",
//!   "initial_alarm": 0,
//!   "sample_interval_ms": 180000
//! }
//! ```
//!
//! Everything below the topics is optional. Values go through the same
//! validation as the runtime setters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use weatherwake_core::constants::DEFAULT_SAMPLE_INTERVAL_MS;
use weatherwake_core::{EngineSettings, Epoch, StationConfig, ValidationFault};

use crate::SchemaError;

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSettings {
    /// Identity notifications are sent from
    pub device_identity: String,
    /// Identity notifications are sent to
    pub master_identity: String,
    /// Message gateway topic
    pub message_topic: String,
    /// Shadow update topic
    pub shadow_topic: String,
    /// Station altitude in meters
    #[serde(default)]
    pub altitude_m: i32,
    /// Timezone offset in minutes
    #[serde(default)]
    pub tz_offset_min: i32,
    /// "metric" or "imperial"
    #[serde(default = "default_units")]
    pub units: String,
    /// Alarm armed at boot, 0 for none
    #[serde(default)]
    pub initial_alarm: Epoch,
    /// Milliseconds between samples
    #[serde(default = "default_sample_interval")]
    pub sample_interval_ms: u64,
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_sample_interval() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}

/// Validated settings, ready to build an engine from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationParts {
    /// Station preferences
    pub config: StationConfig,
    /// Engine timing
    pub settings: EngineSettings,
    /// Alarm to pass to `Engine::start`
    pub initial_alarm: Epoch,
}

impl StationSettings {
    /// Parse settings from JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read and parse a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|err| SchemaError::Malformed(format!("{}: {}", path.as_ref().display(), err)))?;
        Self::from_json(&bytes)
    }

    /// Validate into engine configuration.
    pub fn into_parts(self) -> Result<StationParts, SchemaError> {
        let mut config = StationConfig::new(
            &self.device_identity,
            &self.master_identity,
            &self.message_topic,
            &self.shadow_topic,
        )
        .map_err(|fault| invalid(identity_field(fault), fault))?;

        config
            .set_altitude(self.altitude_m)
            .map_err(|fault| invalid("altitude_m", fault))?;
        config
            .set_tz_offset(self.tz_offset_min)
            .map_err(|fault| invalid("tz_offset_min", fault))?;
        config
            .set_units(&self.units)
            .map_err(|fault| invalid("units", fault))?;

        let settings = EngineSettings::default()
            .with_sample_interval_ms(self.sample_interval_ms)
            .map_err(|fault| invalid("sample_interval_ms", fault))?;

        Ok(StationParts {
            config,
            settings,
            initial_alarm: self.initial_alarm,
        })
    }
}

fn invalid(field: &'static str, fault: ValidationFault) -> SchemaError {
    SchemaError::InvalidSetting { field, fault }
}

fn identity_field(fault: ValidationFault) -> &'static str {
    match fault {
        ValidationFault::InvalidTopic { .. } => "topics",
        _ => "identities",
    }
}
