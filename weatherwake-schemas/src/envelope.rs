//! Message Envelope
//!
//! Notifications travel over the message topic as a small JSON object named
//! after the SMS gateway's webhook parameters. The station publishes
//! `Outgoing` envelopes for the gateway to deliver; the cloud function
//! publishes `Incoming` envelopes when someone texts the station.
//!
//! ```json
//! {"To":"+15550002222","From":"+15550001111","Body":"Daily Report!\n...","Type":"Outgoing"}
//! ```

use serde::{Deserialize, Serialize};
use weatherwake_core::OutboundMessage;

use crate::SchemaError;

/// Body the cloud function forwards for any message it does not handle itself
pub const WEATHER_REQUEST_BODY: &str = "Give me some weather!";

/// Direction of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Station to gateway, to be delivered
    Outgoing,
    /// Gateway to station, someone texted in
    Incoming,
}

/// One message on the message topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Recipient
    #[serde(rename = "To")]
    pub to: String,
    /// Sender
    #[serde(rename = "From")]
    pub from: String,
    /// Text
    #[serde(rename = "Body")]
    pub body: String,
    /// Direction
    #[serde(rename = "Type")]
    pub kind: MessageKind,
    /// Optional media attachment
    #[serde(rename = "MediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl MessageEnvelope {
    /// Outgoing envelope for a message the engine wants delivered.
    pub fn outgoing(message: &OutboundMessage<'_>) -> Self {
        Self {
            to: message.destination.to_string(),
            from: message.source.to_string(),
            body: message.body.to_string(),
            kind: MessageKind::Outgoing,
            media_url: message.media_url.filter(|url| !url.is_empty()).map(str::to_string),
        }
    }

    /// Incoming weather request from `from` to the station at `to`.
    pub fn weather_request(to: &str, from: &str) -> Self {
        Self {
            to: to.to_string(),
            from: from.to_string(),
            body: WEATHER_REQUEST_BODY.to_string(),
            kind: MessageKind::Incoming,
            media_url: None,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decode an envelope received on the message topic.
pub fn decode_envelope(bytes: &[u8]) -> Result<MessageEnvelope, SchemaError> {
    Ok(serde_json::from_slice(bytes)?)
}
