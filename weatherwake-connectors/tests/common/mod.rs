//! Engine doubles for connector tests
//!
//! Publishes and messages are captured so a test can feed the station's
//! own output back through `route`, the way the broker echoes it.

#![allow(dead_code)]

use weatherwake_core::{
    Engine, EngineSettings, EnvironmentSensor, ManualClock, Messenger, OutboundMessage,
    Publisher, SensorResult, StationConfig, TransportResult,
};
use weatherwake_connectors::StationTopics;

/// 2024-03-10 15:12:09 UTC
pub const START_EPOCH: i64 = 1_710_083_529;

pub const DEVICE: &str = "+15550001111";
pub const MASTER: &str = "+15550002222";
pub const STRANGER: &str = "+15559998888";
pub const MESSAGE_TOPIC: &str = "twilio";
pub const SHADOW_TOPIC: &str = "$aws/things/station/shadow/update";

pub struct SteadySensor;

impl EnvironmentSensor for SteadySensor {
    fn read_pressure(&mut self) -> SensorResult<f32> {
        Ok(1013.25)
    }

    fn read_humidity_temperature(&mut self) -> SensorResult<(f32, f32)> {
        Ok((48.0, 15.0))
    }
}

/// Everything the engine sent, as (topic, payload)
#[derive(Debug, Default)]
pub struct Outbox {
    pub published: Vec<(String, String)>,
}

impl Publisher for Outbox {
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult {
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Messages the engine asked to deliver
#[derive(Debug, Default)]
pub struct Mailbox {
    pub sent: Vec<(String, String, String)>,
}

impl Messenger for Mailbox {
    fn send(&mut self, message: &OutboundMessage<'_>) -> TransportResult {
        self.sent.push((
            message.destination.to_string(),
            message.source.to_string(),
            message.body.to_string(),
        ));
        Ok(())
    }
}

pub type TestEngine = Engine<SteadySensor, ManualClock, Outbox, Mailbox>;

pub fn topics() -> StationTopics {
    StationTopics::new(MESSAGE_TOPIC, SHADOW_TOPIC)
}

/// Started engine at `START_EPOCH` with no alarm
pub fn engine() -> TestEngine {
    let config = StationConfig::new(DEVICE, MASTER, MESSAGE_TOPIC, SHADOW_TOPIC).unwrap();
    let mut engine = Engine::new(
        SteadySensor,
        ManualClock::new(START_EPOCH),
        Outbox::default(),
        Mailbox::default(),
        config,
        EngineSettings::default(),
    );
    engine.start(0);
    engine
}
