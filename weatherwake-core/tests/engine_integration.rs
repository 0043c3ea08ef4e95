//! Engine integration tests
//!
//! Drive the full heartbeat loop against test doubles: interval gating,
//! alarm firing and rescheduling, sensor faults, setters and shadow output.

mod common;

use common::*;
use weatherwake_core::{
    AlarmState, AlarmUpdate, Engine, EngineSettings, ManualClock, SensorFault, TimeSource, Tick,
    TransportFault, UnitSystem, ValidationFault,
};

#[test]
fn start_takes_the_first_sample() {
    let mut engine = engine();
    let tick = engine.start(0);

    assert_eq!(tick, Tick::Sampled { firing: None });
    assert_eq!(engine.observation().epoch, START_EPOCH as i32);
    assert_eq!(engine.observation().pressure, 1013.25);
    assert_eq!(engine.alarm_state(), AlarmState::Disabled);
    assert_eq!(engine.clock().updates(), 1);
}

#[test]
fn heartbeat_waits_for_the_interval() {
    let mut engine = engine();
    engine.start(0);

    assert_eq!(step(&mut engine, INTERVAL_MS / 2), Tick::Idle);
    assert_eq!(step(&mut engine, INTERVAL_MS / 2), Tick::Idle);
    assert!(matches!(step(&mut engine, 1), Tick::Sampled { .. }));
    assert_eq!(engine.sensor_mut().reads, 2);

    // Clock is polled on every heartbeat, sampled or not
    assert_eq!(engine.clock().updates(), 4);
}

#[test]
fn alarm_fires_exactly_once_inside_the_window() {
    let mut engine = engine();
    engine.start(0);

    let alarm = START_EPOCH as i32 + 30;
    assert_eq!(engine.update_alarm(alarm), AlarmUpdate::Armed);

    let tick = step(&mut engine, INTERVAL_MS + 1);
    let firing = match tick {
        Tick::Sampled { firing: Some(firing) } => firing,
        other => panic!("expected a firing, got {:?}", other),
    };
    assert_eq!(firing.rescheduled, alarm + 86_400);
    assert_eq!(firing.shadow, Ok(()));
    assert_eq!(firing.notification, Ok(()));
    assert_eq!(engine.alarm_state(), AlarmState::Rung);

    let published = &engine.publisher().published;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, SHADOW_TOPIC);
    assert!(published[0]
        .1
        .starts_with(&format!(r#"{{"state":{{"desired":{{"alarm":{},"#, alarm + 86_400)));

    let sent = &engine.messenger().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, MESSAGE_TOPIC);
    assert_eq!(sent[0].destination, MASTER);
    assert_eq!(sent[0].source, DEVICE);
    assert!(sent[0]
        .body
        .starts_with("Daily Report!\nConditions as of Sun. 15:13:09\n"));

    // Next sample is still inside the window but must not fire again
    assert_eq!(step(&mut engine, INTERVAL_MS + 1), Tick::Sampled { firing: None });
    assert_eq!(engine.messenger().sent.len(), 1);
}

#[test]
fn alarm_seen_after_the_window_is_skipped_silently() {
    let mut engine = engine();
    engine.start(0);

    let alarm = START_EPOCH as i32 + 10;
    engine.update_alarm(alarm);

    // Station was offline: the next sample lands well past T + window
    engine.clock_mut().set_utc_epoch(START_EPOCH + 510);
    assert_eq!(step(&mut engine, INTERVAL_MS + 1), Tick::Sampled { firing: None });

    assert_eq!(engine.alarm_state(), AlarmState::Rung);
    assert!(engine.messenger().sent.is_empty());
    assert!(engine.publisher().published.is_empty());
}

#[test]
fn shortest_sample_interval_still_fires_the_alarm() {
    let mut engine = Engine::new(
        ScriptedSensor::default(),
        ManualClock::new(START_EPOCH),
        RecordingPublisher::default(),
        RecordingMessenger::default(),
        station(),
        EngineSettings::default().with_sample_interval_ms(1000).unwrap(),
    );
    engine.start(START_EPOCH as i32 + 1);
    assert_eq!(engine.alarm_state(), AlarmState::Armed);

    for _ in 0..6 {
        step(&mut engine, 1001);
    }
    assert_eq!(engine.messenger().sent.len(), 1);
    assert_eq!(engine.alarm_state(), AlarmState::Rung);
}

#[test]
fn boot_alarm_inside_the_window_fires_on_first_sample() {
    let mut engine = engine();
    let tick = engine.start(START_EPOCH as i32 - 30);

    assert!(matches!(tick, Tick::Sampled { firing: Some(_) }));
    assert_eq!(engine.messenger().sent.len(), 1);
}

#[test]
fn past_alarm_is_rung_without_notification() {
    let mut engine = engine();
    engine.start(0);

    assert_eq!(engine.update_alarm(START_EPOCH as i32), AlarmUpdate::Passed);
    assert_eq!(engine.alarm_state(), AlarmState::Rung);
    assert_eq!(engine.update_alarm(START_EPOCH as i32 - 100), AlarmUpdate::Passed);

    step(&mut engine, INTERVAL_MS + 1);
    assert!(engine.messenger().sent.is_empty());
}

#[test]
fn repeated_alarm_update_is_a_no_op() {
    let mut engine = engine();
    engine.start(0);

    let alarm = START_EPOCH as i32 + 500;
    assert_eq!(engine.update_alarm(alarm), AlarmUpdate::Armed);
    let before = engine.state().clone();

    assert_eq!(engine.update_alarm(alarm), AlarmUpdate::Unchanged);
    assert_eq!(engine.state(), &before);
    assert!(engine.publisher().published.is_empty());
}

#[test]
fn zero_alarm_disables() {
    let mut engine = engine();
    engine.start(0);
    engine.update_alarm(START_EPOCH as i32 + 500);

    assert_eq!(engine.update_alarm(0), AlarmUpdate::Disabled);
    assert_eq!(engine.alarm_state(), AlarmState::Disabled);
    assert!(engine.alarm().rang());
}

#[test]
fn sensor_fault_keeps_the_previous_observation() {
    let mut engine = engine();
    engine.start(0);
    let before = *engine.observation();

    engine.sensor_mut().pressure = 1000.0;
    engine.sensor_mut().fail_next = Some(SensorFault::InvalidPressure);
    assert_eq!(
        step(&mut engine, INTERVAL_MS + 1),
        Tick::Faulted(SensorFault::InvalidPressure)
    );

    let after = *engine.observation();
    assert_eq!(after.pressure.to_bits(), before.pressure.to_bits());
    assert_eq!(after.temperature.to_bits(), before.temperature.to_bits());
    assert_eq!(after.humidity.to_bits(), before.humidity.to_bits());
    assert_eq!(after.epoch, before.epoch);

    // The faulted attempt consumed the interval
    assert_eq!(step(&mut engine, 1), Tick::Idle);
    assert!(matches!(step(&mut engine, INTERVAL_MS), Tick::Sampled { .. }));
    assert_eq!(engine.observation().pressure, 1000.0);
}

#[test]
fn zero_pressure_is_a_fault() {
    let mut engine = engine();
    engine.sensor_mut().pressure = 0.0;
    assert_eq!(engine.start(0), Tick::Faulted(SensorFault::InvalidPressure));
    assert!(engine.observation().is_empty());
}

#[test]
fn timezone_update_moves_the_clock() {
    let mut engine = engine();
    engine.start(0);

    assert_eq!(engine.update_tz(-480), Ok(()));
    assert_eq!(engine.config().tz_offset_min(), -480);
    assert_eq!(engine.clock().offset_min(), -480);
    assert_eq!(engine.clock().resyncs(), 1);
    assert_eq!(engine.clock().calendar_fields().hour, 7);

    assert!(matches!(
        engine.update_tz(5000),
        Err(ValidationFault::TimezoneOutOfRange { value: 5000, .. })
    ));
    assert_eq!(engine.clock().offset_min(), -480);
    assert_eq!(engine.clock().resyncs(), 1);
}

#[test]
fn configured_timezone_reaches_the_clock_at_start() {
    let mut config = station();
    config.set_tz_offset(-480).unwrap();
    let mut engine = Engine::new(
        ScriptedSensor::default(),
        ManualClock::new(START_EPOCH),
        RecordingPublisher::default(),
        RecordingMessenger::default(),
        config,
        EngineSettings::default().with_sample_interval_ms(INTERVAL_MS).unwrap(),
    );

    assert_eq!(engine.start(0), Tick::Sampled { firing: None });
    assert_eq!(engine.clock().offset_min(), -480);
    assert_eq!(engine.clock().resyncs(), 0);

    let local_now = START_EPOCH as i32 - 480 * 60;
    assert_eq!(engine.observation().epoch, local_now);
    assert_eq!(engine.observation().hour, 7);

    // Local 07:13:00, the way an SMS alarm is stored
    assert_eq!(engine.update_alarm(local_now + 51), AlarmUpdate::Armed);
    let tick = step(&mut engine, INTERVAL_MS + 1);
    assert!(matches!(tick, Tick::Sampled { firing: Some(_) }));
    assert_eq!(engine.messenger().sent.len(), 1);
}

#[test]
fn rejected_setters_leave_config_unchanged() {
    let mut engine = engine();
    let before = engine.config().clone();

    assert_eq!(engine.update_units("bogus"), Err(ValidationFault::UnknownUnits));
    assert!(engine.update_alt(12_000).is_err());
    assert!(engine.update_master_identity("5550002222").is_err());
    assert!(engine.update_device_identity("+1555abc").is_err());
    assert_eq!(engine.config(), &before);

    assert_eq!(engine.update_units("imperial"), Ok(()));
    assert_eq!(engine.update_alt(1600), Ok(()));
    assert_eq!(engine.update_master_identity("+15550003333"), Ok(()));
    assert_eq!(engine.config().units(), UnitSystem::Imperial);
    assert_eq!(engine.config().altitude_m(), 1600);
    assert_eq!(engine.config().master_identity(), "+15550003333");
}

#[test]
fn reported_shadow_document() {
    let mut engine = engine();
    engine.start(0);
    engine.update_alarm(START_EPOCH as i32 + 500);

    assert_eq!(engine.report_shadow_state(), Ok(()));
    let (topic, payload) = &engine.publisher().published[0];
    assert_eq!(topic, SHADOW_TOPIC);
    assert_eq!(
        payload,
        &format!(
            r#"{{"state":{{"reported":{{"alarm":{},"units":"metric","alt":0,"tz":0,"t_num":"{}","m_num":"{}"}}}}}}"#,
            START_EPOCH + 500,
            DEVICE,
            MASTER
        )
    );
}

#[test]
fn transport_failures_are_surfaced_but_alarm_still_rings() {
    let mut engine = Engine::new(
        ScriptedSensor::default(),
        ManualClock::new(START_EPOCH),
        RecordingPublisher {
            fail_with: Some(TransportFault::NotConnected),
            ..Default::default()
        },
        RecordingMessenger {
            fail_with: Some(TransportFault::Rejected { reason: "gateway down" }),
            ..Default::default()
        },
        station(),
        EngineSettings::default().with_sample_interval_ms(INTERVAL_MS).unwrap(),
    );

    let tick = engine.start(START_EPOCH as i32 - 5);
    let firing = match tick {
        Tick::Sampled { firing: Some(firing) } => firing,
        other => panic!("expected a firing, got {:?}", other),
    };
    assert_eq!(firing.shadow, Err(TransportFault::NotConnected));
    assert_eq!(
        firing.notification,
        Err(TransportFault::Rejected { reason: "gateway down" })
    );
    assert_eq!(engine.alarm_state(), AlarmState::Rung);
    assert_eq!(engine.report_shadow_state(), Err(TransportFault::NotConnected));
}

#[test]
fn weather_request_is_answered_to_the_sender() {
    let mut engine = engine();
    engine.start(0);

    assert_eq!(engine.reply_with_report("+15559998888"), Ok(()));
    let sent = &engine.messenger().sent[0];
    assert_eq!(sent.destination, "+15559998888");
    assert_eq!(sent.source, DEVICE);
    assert!(sent.body.starts_with("Conditions as of Sun. 15:12:09\n"));
    assert!(sent.body.contains("*C\n"));
}

#[test]
fn report_follows_unit_system() {
    let mut engine = engine();
    engine.start(0);
    engine.update_units("imperial").unwrap();

    let report = engine.weather_report("");
    assert!(report.contains("   59.00 *F\n"));
    assert!(report.contains(" in Hg)"));
}
