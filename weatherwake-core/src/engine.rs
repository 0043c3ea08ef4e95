//! Observation and Alarm Engine
//!
//! ## Overview
//!
//! The engine is the whole station in one struct. It owns the latest
//! observation, the daily alarm and the station configuration, and borrows
//! nothing: every piece of hardware or network is an injected capability.
//!
//! ```text
//!             ┌──────────────────── Engine ────────────────────┐
//! sensor ───► │ sampler ──► Observation ──► alarm due? ──┐     │
//! clock  ───► │                                          ▼     │
//!             │ StationConfig ◄── setters     fire: shadow ────┼──► publisher
//!             │                               push + report ───┼──► messenger
//!             └────────────────────────────────────────────────┘
//! ```
//!
//! ## Heartbeat
//!
//! The outer loop calls [`Engine::heartbeat`] as often as it likes. The
//! clock is polled every time, but sensors are only read once the sample
//! interval has elapsed on the monotonic clock. The interval is consumed
//! before the read, so a faulted sample is not retried until the next
//! interval.
//!
//! ## Alarm Firing
//!
//! After each good sample the alarm is checked against the missed-alarm
//! window (twice the sample interval). When it is due the engine:
//!
//! 1. asks the shadow for the same alarm one day later (desired state),
//! 2. marks the alarm rung,
//! 3. sends the daily report to the master identity.
//!
//! Publish and send failures are returned in the [`Tick`] and logged; the
//! alarm is rung either way and nothing is retried. A sample that first sees
//! the alarm after its window closed marks it rung without notifying.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut engine = Engine::new(sensor, clock, mqtt.clone(), mqtt, config, EngineSettings::default());
//! engine.start(settings.initial_alarm);
//! engine.report_shadow_state()?;
//!
//! loop {
//!     if let Tick::Sampled { firing: Some(firing) } = engine.heartbeat() {
//!         log::info!("Alarm fired, next at {}", firing.rescheduled);
//!     }
//! }
//! ```

use crate::alarm::{Alarm, AlarmState, AlarmUpdate};
use crate::config::{EngineSettings, StationConfig};
use crate::constants::station::ALARM_REPORT_INTRO;
use crate::errors::{SensorFault, TransportResult, ValidationResult};
use crate::observation::Observation;
use crate::report::{compose_report, Report};
use crate::sampler;
use crate::shadow::{build_desired_document, build_reported_document, ShadowPayload, ShadowPreferences};
use crate::time::Epoch;
use crate::traits::{EnvironmentSensor, Messenger, OutboundMessage, Publisher, TimeSource};
use crate::units::{celsius_to_fahrenheit, hpa_to_inhg, station_pressure_to_sea_level};

/// Mutable state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Latest good observation
    pub observation: Observation,
    /// Daily alarm
    pub alarm: Alarm,
    /// Station preferences
    pub config: StationConfig,
    /// Monotonic tick of the last sample attempt
    pub last_sample_ms: u64,
}

/// Outcome of an alarm firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmFiring {
    /// Timestamp requested for tomorrow's alarm
    pub rescheduled: Epoch,
    /// Result of publishing the desired shadow document
    pub shadow: TransportResult,
    /// Result of sending the daily report
    pub notification: TransportResult,
}

/// What one heartbeat did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Sample interval not yet elapsed
    Idle,
    /// New observation stored, possibly firing the alarm
    Sampled {
        /// Present when the alarm fired on this sample
        firing: Option<AlarmFiring>,
    },
    /// Sensor read failed, previous observation kept
    Faulted(SensorFault),
}

/// Weather station engine
pub struct Engine<S, T, P, M> {
    sensor: S,
    clock: T,
    publisher: P,
    messenger: M,
    settings: EngineSettings,
    state: EngineState,
}

impl<S, T, P, M> Engine<S, T, P, M>
where
    S: EnvironmentSensor,
    T: TimeSource,
    P: Publisher,
    M: Messenger,
{
    /// Assemble an engine. Touches no hardware.
    pub fn new(
        sensor: S,
        clock: T,
        publisher: P,
        messenger: M,
        config: StationConfig,
        settings: EngineSettings,
    ) -> Self {
        Self {
            sensor,
            clock,
            publisher,
            messenger,
            settings,
            state: EngineState {
                observation: Observation::default(),
                alarm: Alarm::new(),
                config,
                last_sample_ms: 0,
            },
        }
    }

    /// Sync the clock, set the boot alarm and take the first sample.
    ///
    /// The clock takes its timezone offset from the configuration, so
    /// observations and alarms are local epochs from the first sample on.
    /// The boot alarm is judged before any observation exists, so any
    /// non-zero timestamp arms it. The first sample then fires it if it is
    /// inside the window.
    pub fn start(&mut self, initial_alarm: Epoch) -> Tick {
        self.clock.set_offset(self.state.config.tz_offset_min());
        self.clock.update();
        self.state.last_sample_ms = self.clock.monotonic_ms();
        self.update_alarm(initial_alarm);
        log_info!("Engine started, sample interval {} ms", self.settings.sample_interval_ms());
        self.sample()
    }

    /// Periodic maintenance. Call from the main loop.
    pub fn heartbeat(&mut self) -> Tick {
        self.clock.update();

        let now = self.clock.monotonic_ms();
        let due = self
            .state
            .last_sample_ms
            .saturating_add(self.settings.sample_interval_ms());
        if now <= due {
            return Tick::Idle;
        }

        self.state.last_sample_ms = now;
        self.sample()
    }

    fn sample(&mut self) -> Tick {
        match sampler::sample(&mut self.sensor, &self.clock) {
            Ok(observation) => {
                self.state.observation = observation;
                self.log_observation();

                let window = self.settings.missed_alarm_window_s();
                let firing = if self.state.alarm.is_due(observation.epoch, window) {
                    Some(self.fire_alarm())
                } else {
                    if self.state.alarm.is_missed(observation.epoch, window) {
                        log_warn!("Alarm {} missed, not notifying", self.state.alarm.timestamp());
                        self.state.alarm.mark_rung();
                    }
                    None
                };
                Tick::Sampled { firing }
            }
            Err(fault) => {
                log_warn!("Sensor errors, check the board: {}", fault);
                Tick::Faulted(fault)
            }
        }
    }

    fn fire_alarm(&mut self) -> AlarmFiring {
        let rescheduled = self.state.alarm.next_day();
        log_info!("Alarm {} rang, rescheduling to {}", self.state.alarm.timestamp(), rescheduled);

        let payload = {
            let preferences = ShadowPreferences::current(&self.state.config, &self.state.alarm)
                .with_alarm(rescheduled);
            build_desired_document(&preferences)
        };
        let shadow = self.publish_shadow(&payload);

        self.state.alarm.mark_rung();

        let report = self.weather_report(ALARM_REPORT_INTRO);
        let config = &self.state.config;
        let notification = send_report(&mut self.messenger, config, config.master_identity(), &report);

        AlarmFiring {
            rescheduled,
            shadow,
            notification,
        }
    }

    fn publish_shadow(&mut self, payload: &ShadowPayload) -> TransportResult {
        let result = self.publisher.publish(self.state.config.shadow_topic(), payload);
        if let Err(fault) = result {
            log_warn!("Shadow publish failed: {}", fault);
        }
        result
    }

    /// Publish the preferences currently in effect.
    pub fn report_shadow_state(&mut self) -> TransportResult {
        let payload = build_reported_document(&self.state.config, &self.state.alarm);
        log_debug!("Reporting shadow state: {}", payload.as_str());
        self.publish_shadow(&payload)
    }

    /// Ask the shadow store to change preferences.
    pub fn push_desired_state(&mut self, preferences: &ShadowPreferences<'_>) -> TransportResult {
        let payload = build_desired_document(preferences);
        log_debug!("Pushing desired state: {}", payload.as_str());
        self.publish_shadow(&payload)
    }

    /// Report of the latest observation in the configured units.
    pub fn weather_report(&self, intro: &str) -> Report {
        let config = &self.state.config;
        compose_report(intro, &self.state.observation, config.units(), config.altitude_m())
    }

    /// Answer an inbound weather request from `destination`.
    pub fn reply_with_report(&mut self, destination: &str) -> TransportResult {
        let report = self.weather_report("");
        send_report(&mut self.messenger, &self.state.config, destination, &report)
    }

    /// Set the alarm timestamp.
    pub fn update_alarm(&mut self, timestamp: Epoch) -> AlarmUpdate {
        let outcome = self
            .state
            .alarm
            .update(timestamp, self.state.observation.epoch);
        if outcome != AlarmUpdate::Unchanged {
            log_info!("Alarm updated to: {}", timestamp);
        }
        outcome
    }

    /// Set the unit system from its wire name.
    pub fn update_units(&mut self, units: &str) -> ValidationResult {
        let result = self.state.config.set_units(units);
        log_setter("Units", result);
        result
    }

    /// Set the station altitude in meters.
    pub fn update_alt(&mut self, altitude_m: i32) -> ValidationResult {
        let result = self.state.config.set_altitude(altitude_m);
        log_setter("Altitude", result);
        result
    }

    /// Set the timezone offset in minutes and resync the clock.
    pub fn update_tz(&mut self, minutes: i32) -> ValidationResult {
        let result = self.state.config.set_tz_offset(minutes);
        if result.is_ok() {
            self.clock.set_offset(minutes);
            self.clock.force_resync();
        }
        log_setter("Timezone", result);
        result
    }

    /// Set the identity notifications are sent from.
    pub fn update_device_identity(&mut self, identity: &str) -> ValidationResult {
        let result = self.state.config.set_device_identity(identity);
        log_setter("Device identity", result);
        result
    }

    /// Set the identity notifications are sent to.
    pub fn update_master_identity(&mut self, identity: &str) -> ValidationResult {
        let result = self.state.config.set_master_identity(identity);
        log_setter("Master identity", result);
        result
    }

    /// Dump the latest observation to the log.
    pub fn log_observation(&self) {
        let obs = &self.state.observation;
        let sea_level = station_pressure_to_sea_level(
            obs.temperature,
            obs.pressure,
            self.state.config.altitude_m(),
        );
        log_info!(
            "Observation at {} {}:{}:{} ({}): pressure {} hPa, {} inHg at sea level, temperature {} *C, {} *F, humidity {} %",
            obs.day_name(),
            obs.hour,
            obs.minute,
            obs.second,
            obs.epoch,
            obs.pressure,
            hpa_to_inhg(sea_level),
            obs.temperature,
            celsius_to_fahrenheit(obs.temperature),
            obs.humidity
        );
    }

    /// Latest good observation.
    pub fn observation(&self) -> &Observation {
        &self.state.observation
    }

    /// Daily alarm.
    pub fn alarm(&self) -> &Alarm {
        &self.state.alarm
    }

    /// Current alarm state.
    pub fn alarm_state(&self) -> AlarmState {
        self.state.alarm.state()
    }

    /// Station preferences.
    pub fn config(&self) -> &StationConfig {
        &self.state.config
    }

    /// Timing settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Full engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Injected time source.
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Injected time source, mutably.
    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Injected sensor, mutably.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Injected publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Injected messenger.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }
}

fn send_report<M: Messenger>(
    messenger: &mut M,
    config: &StationConfig,
    destination: &str,
    report: &Report,
) -> TransportResult {
    let message = OutboundMessage {
        channel: config.message_topic(),
        destination,
        source: config.device_identity(),
        body: report,
        media_url: None,
    };
    let result = messenger.send(&message);
    if let Err(fault) = result {
        log_warn!("Report to {} not sent: {}", destination, fault);
    }
    result
}

fn log_setter(field: &str, result: ValidationResult) {
    match result {
        Ok(()) => {
            log_info!("{} updated", field);
        }
        Err(fault) => {
            log_warn!("{} rejected: {}", field, fault);
        }
    }
}
