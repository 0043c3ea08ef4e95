//! Pub/Sub and Outbound Message Capabilities
//!
//! Two collaborators carry everything the engine says to the outside world:
//! a publisher for shadow documents and a messenger for human-readable
//! notifications. Both are blocking and complete within the heartbeat tick.
//! Failures are reported back and never retried by the engine.

use crate::errors::TransportResult;

/// Publish a payload on a pub/sub topic
pub trait Publisher {
    /// Publish `payload` on `topic`.
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult;
}

/// One outbound notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundMessage<'a> {
    /// Topic or channel the message gateway listens on
    pub channel: &'a str,
    /// Who receives the message
    pub destination: &'a str,
    /// Identity the message is sent from
    pub source: &'a str,
    /// Message text
    pub body: &'a str,
    /// Optional media attachment
    pub media_url: Option<&'a str>,
}

/// Send a notification to a person
pub trait Messenger {
    /// Hand `message` to the message gateway.
    fn send(&mut self, message: &OutboundMessage<'_>) -> TransportResult;
}
