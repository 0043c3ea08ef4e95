//! Common test doubles for engine integration tests
//!
//! - `ScriptedSensor`: fixed readings with injectable faults
//! - `RecordingPublisher` / `RecordingMessenger`: capture everything sent,
//!   optionally failing every call
//! - `station()` / `engine()`: a ready-made station around a `ManualClock`

#![allow(dead_code)]

use weatherwake_core::{
    Engine, EngineSettings, EnvironmentSensor, ManualClock, Messenger, OutboundMessage,
    Publisher, SensorFault, SensorResult, StationConfig, TransportFault, TransportResult,
};

/// 2024-03-10 15:12:09 UTC, a Sunday
pub const START_EPOCH: i64 = 1_710_083_529;

pub const DEVICE: &str = "+15550001111";
pub const MASTER: &str = "+15550002222";
pub const MESSAGE_TOPIC: &str = "twilio";
pub const SHADOW_TOPIC: &str = "$aws/things/station/shadow/update";

/// Sample interval used by the tests (one minute, window of 120 s)
pub const INTERVAL_MS: u64 = 60_000;

/// Sensor returning fixed readings
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    pub pressure: f32,
    pub humidity: f32,
    pub temperature: f32,
    pub auxiliary: Option<f32>,
    /// Fault returned by the next pressure read, then cleared
    pub fail_next: Option<SensorFault>,
    pub reads: u32,
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self {
            pressure: 1013.25,
            humidity: 48.0,
            temperature: 15.0,
            auxiliary: None,
            fail_next: None,
            reads: 0,
        }
    }
}

impl EnvironmentSensor for ScriptedSensor {
    fn read_pressure(&mut self) -> SensorResult<f32> {
        self.reads += 1;
        match self.fail_next.take() {
            Some(fault) => Err(fault),
            None => Ok(self.pressure),
        }
    }

    fn read_humidity_temperature(&mut self) -> SensorResult<(f32, f32)> {
        Ok((self.humidity, self.temperature))
    }

    fn read_auxiliary_temperature(&mut self) -> Option<f32> {
        self.auxiliary
    }
}

/// Publisher keeping every (topic, payload)
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Vec<(String, String)>,
    pub fail_with: Option<TransportFault>,
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, topic: &str, payload: &str) -> TransportResult {
        if let Some(fault) = self.fail_with {
            return Err(fault);
        }
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Owned copy of an `OutboundMessage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: String,
    pub destination: String,
    pub source: String,
    pub body: String,
}

/// Messenger keeping every sent message
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    pub sent: Vec<SentMessage>,
    pub fail_with: Option<TransportFault>,
}

impl Messenger for RecordingMessenger {
    fn send(&mut self, message: &OutboundMessage<'_>) -> TransportResult {
        if let Some(fault) = self.fail_with {
            return Err(fault);
        }
        self.sent.push(SentMessage {
            channel: message.channel.to_string(),
            destination: message.destination.to_string(),
            source: message.source.to_string(),
            body: message.body.to_string(),
        });
        Ok(())
    }
}

pub type TestEngine = Engine<ScriptedSensor, ManualClock, RecordingPublisher, RecordingMessenger>;

/// Valid station config with default preferences
pub fn station() -> StationConfig {
    StationConfig::new(DEVICE, MASTER, MESSAGE_TOPIC, SHADOW_TOPIC).unwrap()
}

/// Engine around a manual clock at `START_EPOCH`, not yet started
pub fn engine() -> TestEngine {
    Engine::new(
        ScriptedSensor::default(),
        ManualClock::new(START_EPOCH),
        RecordingPublisher::default(),
        RecordingMessenger::default(),
        station(),
        EngineSettings::default()
            .with_sample_interval_ms(INTERVAL_MS)
            .expect("test interval is valid"),
    )
}

/// Advance the clock by `ms` and run one heartbeat
pub fn step(engine: &mut TestEngine, ms: u64) -> weatherwake_core::Tick {
    engine.clock_mut().advance_ms(ms);
    engine.heartbeat()
}
