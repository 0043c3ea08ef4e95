//! MQTT connector for WeatherWake
//!
//! Wraps the synchronous `rumqttc` client. Requests are queued with
//! `try_publish`/`try_subscribe`, so a heartbeat never blocks on the
//! network; a full queue is reported as a rejected publish instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{Client, ClientError, Connection, ConnectionError, Event, MqttOptions, Packet};
use thiserror::Error;
use weatherwake_core::constants::MAX_PACKAGE_SIZE;
use weatherwake_core::{Messenger, OutboundMessage, Publisher, TransportFault, TransportResult};
use weatherwake_schemas::MessageEnvelope;

use crate::routing::StationTopics;

pub use rumqttc::QoS;

/// Largest incoming packet accepted (shadow deltas carry metadata)
const MAX_INCOMING_PACKET: usize = 10 * 1024;

/// Shortest keep-alive the client accepts, 0 disables keep-alive
const MIN_KEEP_ALIVE_SECS: u64 = 5;

/// MQTT connector errors
#[derive(Debug, Error)]
pub enum MqttError {
    /// Request could not be queued
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Event loop failure
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Payload larger than the configured packet size
    #[error("Payload of {len} bytes exceeds limit of {max}")]
    PayloadTooLarge {
        /// Payload length
        len: usize,
        /// Configured limit
        max: usize,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broker connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttConfig {
    /// Client identifier, unique per broker
    pub client_id: String,
    /// Broker host name or address
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,
    /// QoS for publishes and subscriptions
    pub qos: QoS,
    /// Capacity of the outgoing request queue
    pub request_capacity: usize,
    /// Largest outgoing packet in bytes
    pub max_packet_size: usize,
    /// Username and password
    pub credentials: Option<(String, String)>,
}

impl MqttConfig {
    /// Settings with 60 s keep-alive, QoS 1 and a queue of 10 requests.
    pub fn new(client_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            client_id: client_id.into(),
            host: host.into(),
            port,
            keep_alive_secs: 60,
            qos: QoS::AtLeastOnce,
            request_capacity: 10,
            max_packet_size: MAX_PACKAGE_SIZE,
            credentials: None,
        }
    }

    /// Set the keep-alive interval.
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive_secs = secs;
        self
    }

    /// Set the QoS level.
    pub fn qos(mut self, qos: QoS) -> Self {
        self.qos = qos;
        self
    }

    /// Set the request queue capacity.
    pub fn request_capacity(mut self, capacity: usize) -> Self {
        self.request_capacity = capacity;
        self
    }

    /// Set the largest outgoing packet.
    pub fn max_packet_size(mut self, bytes: usize) -> Self {
        self.max_packet_size = bytes;
        self
    }

    /// Authenticate with username and password.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Check the settings.
    pub fn validate(&self) -> Result<(), MqttError> {
        if self.client_id.is_empty() {
            return Err(MqttError::Config("client id is empty".into()));
        }
        if self.host.is_empty() {
            return Err(MqttError::Config("broker host is empty".into()));
        }
        if self.keep_alive_secs != 0 && self.keep_alive_secs < MIN_KEEP_ALIVE_SECS {
            return Err(MqttError::Config(format!(
                "keep-alive must be 0 or at least {} seconds",
                MIN_KEEP_ALIVE_SECS
            )));
        }
        if self.request_capacity == 0 {
            return Err(MqttError::Config("request capacity must be positive".into()));
        }
        Ok(())
    }

    /// Client options for these settings.
    pub fn to_options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(self.client_id.clone(), self.host.clone(), self.port);
        options.set_keep_alive(Duration::from_secs(self.keep_alive_secs));
        options.set_max_packet_size(MAX_INCOMING_PACKET, self.max_packet_size);
        if let Some((username, password)) = &self.credentials {
            options.set_credentials(username.clone(), password.clone());
        }
        options
    }
}

/// MQTT request handle
///
/// Cloning is cheap and every clone shares the connection state, so one
/// clone can serve as the engine's publisher and another as its messenger.
#[derive(Clone)]
pub struct MqttConnector {
    client: Client,
    qos: QoS,
    max_packet_size: usize,
    connected: Arc<AtomicBool>,
    subscriptions: Option<StationTopics>,
}

impl MqttConnector {
    /// Create the client. Nothing is sent until the connection is polled.
    pub fn connect(config: &MqttConfig) -> Result<(Self, Connection), MqttError> {
        config.validate()?;
        let (client, connection) = Client::new(config.to_options(), config.request_capacity);
        log::info!("MQTT client {} -> {}:{}", config.client_id, config.host, config.port);

        Ok((
            Self {
                client,
                qos: config.qos,
                max_packet_size: config.max_packet_size,
                connected: Arc::new(AtomicBool::new(false)),
                subscriptions: None,
            },
            connection,
        ))
    }

    /// Subscribe to the shadow delta and message topics.
    ///
    /// The subscriptions are remembered and renewed on every reconnect.
    pub fn subscribe_station(&mut self, topics: &StationTopics) -> Result<(), MqttError> {
        self.client.try_subscribe(topics.shadow_delta.clone(), self.qos)?;
        self.client.try_subscribe(topics.message.clone(), self.qos)?;
        log::info!("Subscribed to {} and {}", topics.shadow_delta, topics.message);
        self.subscriptions = Some(topics.clone());
        Ok(())
    }

    /// Track connection state from an event loop notification.
    ///
    /// Returns the topic and payload of an incoming publish.
    pub fn observe<'e>(
        &mut self,
        event: &'e Result<Event, ConnectionError>,
    ) -> Option<(&'e str, &'e [u8])> {
        match event {
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                Some((publish.topic.as_str(), &publish.payload[..]))
            }
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                self.connected.store(true, Ordering::Relaxed);
                log::info!("MQTT connected");
                if let Some(topics) = self.subscriptions.clone() {
                    if let Err(err) = self.subscribe_station(&topics) {
                        log::error!("Re-subscribe failed: {}", err);
                    }
                }
                None
            }
            Ok(Event::Incoming(Packet::Disconnect)) => {
                self.connected.store(false, Ordering::Relaxed);
                log::warn!("MQTT disconnected by broker");
                None
            }
            Ok(_) => None,
            Err(err) => {
                self.connected.store(false, Ordering::Relaxed);
                log::warn!("MQTT connection error: {}", err);
                None
            }
        }
    }

    /// Whether the last observed event left the connection up.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn enqueue(&mut self, topic: &str, payload: &[u8]) -> Result<(), MqttError> {
        if payload.len() > self.max_packet_size {
            return Err(MqttError::PayloadTooLarge {
                len: payload.len(),
                max: self.max_packet_size,
            });
        }
        self.client.try_publish(topic, self.qos, false, payload.to_vec())?;
        Ok(())
    }
}

impl From<MqttError> for TransportFault {
    fn from(err: MqttError) -> Self {
        match err {
            MqttError::PayloadTooLarge { len, max } => TransportFault::PayloadTooLarge { len, max },
            MqttError::Client(ClientError::TryRequest(_)) => TransportFault::Rejected {
                reason: "request queue full",
            },
            MqttError::Client(_) | MqttError::Connection(_) => TransportFault::NotConnected,
            MqttError::Config(_) => TransportFault::Rejected {
                reason: "invalid configuration",
            },
        }
    }
}

impl Publisher for MqttConnector {
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult {
        self.enqueue(topic, payload.as_bytes()).map_err(|err| {
            log::warn!("Publish to {} failed: {}", topic, err);
            TransportFault::from(err)
        })
    }
}

impl Messenger for MqttConnector {
    fn send(&mut self, message: &OutboundMessage<'_>) -> TransportResult {
        let json = MessageEnvelope::outgoing(message).to_json().map_err(|err| {
            log::error!("Envelope encoding failed: {}", err);
            TransportFault::Rejected {
                reason: "envelope encoding failed",
            }
        })?;
        self.publish(message.channel, &json)
    }
}
