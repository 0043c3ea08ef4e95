//! SMS commands travelling through the shadow and message topics to a
//! running engine

mod common;

use common::*;
use weatherwake_connectors::{handle_inbound, handle_sms, route, Handled, Inbound};
use weatherwake_core::{AlarmState, OutboundMessage, UnitSystem};
use weatherwake_schemas::{DesiredState, MessageEnvelope};

/// Wrap a shadow update the way the shadow service publishes a delta
fn delta(update: &DesiredState) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "version": 7, "state": update })).unwrap()
}

fn desired_shadow() -> DesiredState {
    DesiredState {
        m_num: Some(MASTER.into()),
        tz: Some(-480),
        ..DesiredState::default()
    }
}

#[test]
fn set_altitude_reaches_the_engine() {
    let mut engine = engine();
    let response = handle_sms("set alt 50", MASTER, DEVICE, Some(&desired_shadow()), START_EPOCH);
    let update = response.shadow_update.expect("set produces a shadow update");

    let inbound = route(&topics(), &topics().shadow_delta, &delta(&update));
    let handled = handle_inbound(&mut engine, inbound);

    assert!(matches!(handled, Handled::Applied { ref report, reported: Ok(()) } if report.is_clean()));
    assert_eq!(engine.config().altitude_m(), 50);

    let (topic, payload) = engine.publisher().published.last().unwrap();
    assert_eq!(topic, SHADOW_TOPIC);
    assert!(payload.contains(r#""alt":50"#));
}

#[test]
fn set_units_and_alarm_reach_the_engine() {
    let mut engine = engine();
    let shadow = desired_shadow();

    for body in ["s units imperial", "set alarm 20:00"] {
        let update = handle_sms(body, MASTER, DEVICE, Some(&shadow), START_EPOCH)
            .shadow_update
            .unwrap();
        handle_inbound(&mut engine, route(&topics(), &topics().shadow_delta, &delta(&update)));
    }

    assert_eq!(engine.config().units(), UnitSystem::Imperial);
    assert_eq!(engine.alarm_state(), AlarmState::Armed);
    assert_eq!(engine.alarm().timestamp(), 1_710_028_800 + 20 * 3600);
}

#[test]
fn stranger_cannot_change_preferences() {
    let response = handle_sms("set alt 50", STRANGER, DEVICE, Some(&desired_shadow()), START_EPOCH);
    assert_eq!(response.reply.as_deref(), Some("UNAUTHORIZED!"));
    assert!(response.shadow_update.is_none());
    assert!(response.forward.is_none());
}

#[test]
fn weather_request_is_answered_to_the_sender() {
    let mut engine = engine();
    let response = handle_sms("weather?", STRANGER, DEVICE, None, START_EPOCH);
    let envelope = response.forward.expect("plain text is forwarded");
    let payload = envelope.to_json().unwrap();

    let inbound = route(&topics(), MESSAGE_TOPIC, payload.as_bytes());
    assert_eq!(inbound, Inbound::WeatherRequest { from: STRANGER.into() });
    assert_eq!(handle_inbound(&mut engine, inbound), Handled::Replied(Ok(())));

    let (destination, source, body) = engine.messenger().sent.last().unwrap();
    assert_eq!(destination, STRANGER);
    assert_eq!(source, DEVICE);
    assert!(body.starts_with("Conditions as of "));
    assert!(body.contains("% Humidity"));
}

#[test]
fn echoed_outgoing_envelope_does_nothing() {
    let mut engine = engine();
    let message = OutboundMessage {
        channel: MESSAGE_TOPIC,
        destination: MASTER,
        source: DEVICE,
        body: "Daily Report!\n",
        media_url: None,
    };
    let echo = MessageEnvelope::outgoing(&message).to_json().unwrap();

    let inbound = route(&topics(), MESSAGE_TOPIC, echo.as_bytes());
    assert_eq!(inbound, Inbound::Ignored);
    assert_eq!(handle_inbound(&mut engine, inbound), Handled::Nothing);
    assert!(engine.messenger().sent.is_empty());
}

#[test]
fn rejected_delta_field_is_still_reported() {
    let mut engine = engine();
    let published_before = engine.publisher().published.len();

    let inbound = route(
        &topics(),
        &topics().shadow_delta,
        br#"{"state":{"alt":120,"units":"kelvin"}}"#,
    );
    let handled = handle_inbound(&mut engine, inbound);

    match handled {
        Handled::Applied { report, reported } => {
            assert_eq!(report.rejected.len(), 1);
            assert_eq!(reported, Ok(()));
        }
        other => panic!("expected Applied, got {:?}", other),
    }
    assert_eq!(engine.config().altitude_m(), 120);
    assert_eq!(engine.config().units(), UnitSystem::Metric);
    assert_eq!(engine.publisher().published.len(), published_before + 1);
}
