//! Connectors between a WeatherWake station and the cloud
//!
//! ## Overview
//!
//! A station talks to exactly one broker. Everything crosses it as MQTT
//! publishes on three topics:
//!
//! ```text
//!                     ┌──────────── broker ─────────────┐
//! station ──publish──►│ shadow/update        (reported,  │──► shadow service
//!                     │                       desired)   │
//! station ◄─subscribe─│ shadow/update/delta  (changes)   │◄── shadow service
//! station ◄──────────►│ message topic        (envelopes) │◄─► SMS gateway
//!                     └─────────────────────────────────┘
//! ```
//!
//! - [`mqtt`]: the transport. `MqttConnector` implements the core
//!   `Publisher` and `Messenger` capabilities on a `rumqttc` client.
//! - [`routing`]: classifies inbound publishes and hands them to the engine.
//! - [`commands`]: the SMS command protocol served in front of the station.
//!   Texts starting with `?`/`help` or `s`/`set` are answered there; anything
//!   else is forwarded to the station as a weather request.
//!
//! ## Connection Handling
//!
//! `rumqttc` splits a client into a cheap, cloneable request handle and a
//! `Connection` that must be polled for anything to happen. The engine only
//! ever holds request handles; the outer loop owns the connection, feeds
//! each event to [`mqtt::MqttConnector::observe`] and routes incoming
//! publishes.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use weatherwake_connectors::mqtt::{MqttConfig, MqttConnector};
//! use weatherwake_connectors::StationTopics;
//!
//! let config = MqttConfig::new("station-1", "broker.local", 1883).keep_alive_secs(30);
//! let (mut mqtt, mut connection) = MqttConnector::connect(&config)?;
//!
//! let topics = StationTopics::new("twilio", "$aws/things/station/shadow/update");
//! mqtt.subscribe_station(&topics)?;
//!
//! for event in connection.iter().take(1) {
//!     mqtt.observe(&event);
//! }
//! # Ok::<(), weatherwake_connectors::mqtt::MqttError>(())
//! ```

pub mod commands;
pub mod routing;

#[cfg(feature = "mqtt")]
pub mod mqtt;

// Re-export common types
pub use commands::{
    authorize, handle_sms, help_text, next_alarm_epoch, Command, HelpTopic, Preference,
    PreferenceError, SmsResponse,
};
pub use routing::{handle_inbound, route, Handled, Inbound, StationTopics};

#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttConnector, MqttError, QoS};
