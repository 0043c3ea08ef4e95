//! Shadow Document Builder
//!
//! The cloud keeps a mirror of the station's preferences (the "shadow").
//! The station publishes what it currently uses under `reported`, and asks
//! for changes (such as tomorrow's alarm) under `desired`:
//!
//! ```json
//! {"state":{"reported":{"alarm":1710083529,"units":"metric","alt":0,
//!                       "tz":-480,"t_num":"+15550001111","m_num":"+15550002222"}}}
//! ```
//!
//! Documents are built into a `MAX_PACKAGE_SIZE` buffer. A document that
//! does not fit is cut at the last whole UTF-8 character and published
//! anyway; the identities and topics are bounded so this only happens with
//! an unusually small package size.

use serde::Serialize;

use crate::alarm::Alarm;
use crate::config::{StationConfig, UnitSystem};
use crate::constants::buffers::MAX_PACKAGE_SIZE;
use crate::text::truncate_into;
use crate::time::Epoch;

/// Serialized shadow document, ready to publish
pub type ShadowPayload = heapless::String<MAX_PACKAGE_SIZE>;

/// Full set of mirrored preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShadowPreferences<'a> {
    /// Alarm timestamp, 0 when disabled
    pub alarm: Epoch,
    /// Unit system
    pub units: UnitSystem,
    /// Altitude in meters
    pub alt: i32,
    /// Timezone offset in minutes
    pub tz: i32,
    /// Device identity
    pub t_num: &'a str,
    /// Master identity
    pub m_num: &'a str,
}

impl<'a> ShadowPreferences<'a> {
    /// Preferences currently in effect.
    pub fn current(config: &'a StationConfig, alarm: &Alarm) -> Self {
        Self {
            alarm: alarm.timestamp(),
            units: config.units(),
            alt: config.altitude_m(),
            tz: config.tz_offset_min(),
            t_num: config.device_identity(),
            m_num: config.master_identity(),
        }
    }

    /// Same preferences with a different alarm.
    pub fn with_alarm(mut self, alarm: Epoch) -> Self {
        self.alarm = alarm;
        self
    }
}

#[derive(Serialize)]
struct Document<'a> {
    state: Section<'a>,
}

#[derive(Serialize)]
enum Section<'a> {
    #[serde(rename = "reported")]
    Reported(&'a ShadowPreferences<'a>),
    #[serde(rename = "desired")]
    Desired(&'a ShadowPreferences<'a>),
}

/// Document reporting the preferences currently in effect.
pub fn build_reported_document(config: &StationConfig, alarm: &Alarm) -> ShadowPayload {
    let preferences = ShadowPreferences::current(config, alarm);
    render(&Document {
        state: Section::Reported(&preferences),
    })
}

/// Document requesting a change of preferences.
pub fn build_desired_document(preferences: &ShadowPreferences<'_>) -> ShadowPayload {
    render(&Document {
        state: Section::Desired(preferences),
    })
}

fn render(document: &Document<'_>) -> ShadowPayload {
    let json = match serde_json::to_string(document) {
        Ok(json) => json,
        Err(_) => {
            log_error!("Shadow document serialization failed");
            return ShadowPayload::new();
        }
    };

    let (payload, truncated) = truncate_into::<MAX_PACKAGE_SIZE>(&json);
    if truncated {
        log_warn!("Shadow document truncated from {} to {} bytes", json.len(), payload.len());
    }
    payload
}
