//! Inbound publish routing
//!
//! The station subscribes to its shadow delta topic and to the message
//! topic. Because it also publishes its own outgoing envelopes on the
//! message topic, it hears those back and must ignore them.

use weatherwake_core::{
    Engine, EnvironmentSensor, Messenger, Publisher, StationConfig, TimeSource, TransportResult,
};
use weatherwake_schemas::{
    apply_desired, decode_desired, decode_envelope, ApplyReport, DesiredState, MessageKind,
    SchemaError,
};

/// Topics a station publishes and listens on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTopics {
    /// Message gateway topic (envelopes both ways)
    pub message: String,
    /// Shadow update topic (reported and desired documents)
    pub shadow_update: String,
    /// Shadow delta topic (changes pushed to the station)
    pub shadow_delta: String,
}

impl StationTopics {
    /// Topics for a message topic and shadow update topic.
    pub fn new(message: &str, shadow_update: &str) -> Self {
        Self {
            message: message.to_string(),
            shadow_update: shadow_update.to_string(),
            shadow_delta: format!("{}/delta", shadow_update),
        }
    }

    /// Topics of a configured station.
    pub fn from_config(config: &StationConfig) -> Self {
        Self::new(config.message_topic(), config.shadow_topic())
    }
}

/// Classified inbound publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Preference changes from the shadow service
    Desired(DesiredState),
    /// Someone texted the station and wants the weather
    WeatherRequest {
        /// Who asked, and gets the reply
        from: String,
    },
    /// Not for us (our own outgoing envelope, unknown topic)
    Ignored,
    /// Payload on a known topic could not be decoded
    Malformed(SchemaError),
}

/// What `handle_inbound` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Desired state applied, then the new state reported back
    Applied {
        /// Per-field outcome
        report: ApplyReport,
        /// Result of reporting the shadow state
        reported: TransportResult,
    },
    /// Weather report sent to the requester
    Replied(TransportResult),
    /// Nothing to do
    Nothing,
}

/// Classify a publish received on `topic`.
pub fn route(topics: &StationTopics, topic: &str, payload: &[u8]) -> Inbound {
    if topic == topics.shadow_delta {
        return match decode_desired(payload) {
            Ok(desired) => Inbound::Desired(desired),
            Err(err) => Inbound::Malformed(err),
        };
    }

    if topic == topics.message {
        return match decode_envelope(payload) {
            Ok(envelope) if envelope.kind == MessageKind::Incoming => Inbound::WeatherRequest {
                from: envelope.from,
            },
            Ok(_) => Inbound::Ignored,
            Err(err) => Inbound::Malformed(err),
        };
    }

    Inbound::Ignored
}

/// Act on a classified publish.
///
/// Applied desired state is always reported back so the shadow service can
/// clear the delta, including when some fields were rejected.
pub fn handle_inbound<S, T, P, M>(engine: &mut Engine<S, T, P, M>, inbound: Inbound) -> Handled
where
    S: EnvironmentSensor,
    T: TimeSource,
    P: Publisher,
    M: Messenger,
{
    match inbound {
        Inbound::Desired(desired) => {
            let report = apply_desired(engine, &desired);
            for rejection in &report.rejected {
                log::warn!("Desired {} rejected: {}", rejection.field.as_str(), rejection.fault);
            }
            let reported = engine.report_shadow_state();
            Handled::Applied { report, reported }
        }
        Inbound::WeatherRequest { from } => {
            log::info!("Weather requested by {}", from);
            Handled::Replied(engine.reply_with_report(&from))
        }
        Inbound::Malformed(err) => {
            log::warn!("Dropping malformed publish: {}", err);
            Handled::Nothing
        }
        Inbound::Ignored => Handled::Nothing,
    }
}
