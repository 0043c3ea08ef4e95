//! Desired Shadow State
//!
//! The shadow service sends changes in one of two shapes. A delta, published
//! on `.../shadow/update/delta`, carries only the fields that differ from
//! what the station last reported:
//!
//! ```json
//! {"version":12,"timestamp":1710083529,"state":{"alarm":1710170000}}
//! ```
//!
//! A full document nests them under `desired`:
//!
//! ```json
//! {"state":{"desired":{"alarm":1710170000,"units":"metric"}}}
//! ```
//!
//! Both decode to the same [`DesiredState`]. Every field is optional;
//! unknown fields (metadata, version) are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SchemaError;

/// Requested preference changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Alarm epoch, 0 disables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<i32>,
    /// "metric" or "imperial"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Altitude in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<i32>,
    /// Timezone offset in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<i32>,
    /// Device identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_num: Option<String>,
    /// Master identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m_num: Option<String>,
}

impl DesiredState {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize)]
struct Document {
    state: Option<Value>,
}

/// Decode a shadow delta or full desired document.
pub fn decode_desired(bytes: &[u8]) -> Result<DesiredState, SchemaError> {
    let document: Document = serde_json::from_slice(bytes)?;
    let mut state = match document.state {
        Some(state @ Value::Object(_)) => state,
        Some(_) => return Err(SchemaError::Malformed("state is not an object".into())),
        None => return Err(SchemaError::MissingState),
    };

    let desired = state.as_object_mut().and_then(|fields| fields.remove("desired"));
    Ok(serde_json::from_value(desired.unwrap_or(state))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_delta() {
        let desired = decode_desired(
            br#"{"version":12,"timestamp":1710083529,"state":{"alarm":1710170000,"units":"imperial"},"metadata":{}}"#,
        )
        .unwrap();
        assert_eq!(desired.alarm, Some(1_710_170_000));
        assert_eq!(desired.units.as_deref(), Some("imperial"));
        assert_eq!(desired.alt, None);
    }

    #[test]
    fn decodes_full_document() {
        let desired = decode_desired(
            br#"{"state":{"desired":{"alt":120,"t_num":"+15550001111"},"reported":{"alt":0}}}"#,
        )
        .unwrap();
        assert_eq!(desired.alt, Some(120));
        assert_eq!(desired.t_num.as_deref(), Some("+15550001111"));
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(decode_desired(b"{not json"), Err(SchemaError::Malformed(_))));
        assert_eq!(decode_desired(br#"{"version":3}"#), Err(SchemaError::MissingState));
        assert!(matches!(
            decode_desired(br#"{"state":{"alt":"high"}}"#),
            Err(SchemaError::Malformed(_))
        ));
        assert!(matches!(decode_desired(br#"{"state":[1,2]}"#), Err(SchemaError::Malformed(_))));
    }

    #[test]
    fn empty_state_is_empty() {
        assert!(decode_desired(br#"{"state":{}}"#).unwrap().is_empty());
    }
}
