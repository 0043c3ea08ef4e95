//! Minimal engine doubles for applying decoded documents

#![allow(dead_code)]

use weatherwake_core::{
    Engine, EngineSettings, EnvironmentSensor, ManualClock, Messenger, OutboundMessage,
    Publisher, SensorResult, StationConfig, TransportResult,
};

pub const START_EPOCH: i64 = 1_710_083_529;

pub struct CalmSensor;

impl EnvironmentSensor for CalmSensor {
    fn read_pressure(&mut self) -> SensorResult<f32> {
        Ok(1013.25)
    }

    fn read_humidity_temperature(&mut self) -> SensorResult<(f32, f32)> {
        Ok((50.0, 15.0))
    }
}

#[derive(Default)]
pub struct Sink {
    pub payloads: Vec<String>,
}

impl Publisher for Sink {
    fn publish(&mut self, _topic: &str, payload: &str) -> TransportResult {
        self.payloads.push(payload.to_string());
        Ok(())
    }
}

impl Messenger for Sink {
    fn send(&mut self, message: &OutboundMessage<'_>) -> TransportResult {
        self.payloads.push(message.body.to_string());
        Ok(())
    }
}

pub type TestEngine = Engine<CalmSensor, ManualClock, Sink, Sink>;

/// Started engine at `START_EPOCH`
pub fn engine() -> TestEngine {
    let config = StationConfig::new(
        "+15550001111",
        "+15550002222",
        "twilio",
        "$aws/things/station/shadow/update",
    )
    .unwrap();
    let mut engine = Engine::new(
        CalmSensor,
        ManualClock::new(START_EPOCH),
        Sink::default(),
        Sink::default(),
        config,
        EngineSettings::default(),
    );
    engine.start(0);
    engine
}
