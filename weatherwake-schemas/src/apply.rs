//! Field-by-field application of a desired state

use weatherwake_core::{
    AlarmUpdate, Engine, EnvironmentSensor, Messenger, Publisher, TimeSource, ValidationFault,
};

use crate::desired::DesiredState;

/// Shadow preference field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `alarm`
    Alarm,
    /// `units`
    Units,
    /// `alt`
    Alt,
    /// `tz`
    Tz,
    /// `t_num`
    DeviceIdentity,
    /// `m_num`
    MasterIdentity,
}

impl Field {
    /// Name used in shadow documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Alarm => "alarm",
            Field::Units => "units",
            Field::Alt => "alt",
            Field::Tz => "tz",
            Field::DeviceIdentity => "t_num",
            Field::MasterIdentity => "m_num",
        }
    }
}

/// A field the engine refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    /// Which field
    pub field: Field,
    /// Why
    pub fault: ValidationFault,
}

/// What `apply_desired` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Fields accepted by the engine, in application order
    pub applied: Vec<Field>,
    /// Fields rejected, previous value kept
    pub rejected: Vec<Rejection>,
    /// Alarm transition, when the document carried an alarm
    pub alarm: Option<AlarmUpdate>,
}

impl ApplyReport {
    /// True when nothing was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    fn record(&mut self, field: Field, result: Result<(), ValidationFault>) {
        match result {
            Ok(()) => self.applied.push(field),
            Err(fault) => self.rejected.push(Rejection { field, fault }),
        }
    }
}

/// Apply every present field through the engine's setters.
///
/// Order: alarm, units, altitude, timezone, device identity, master
/// identity. A rejected field does not stop the rest.
pub fn apply_desired<S, T, P, M>(
    engine: &mut Engine<S, T, P, M>,
    desired: &DesiredState,
) -> ApplyReport
where
    S: EnvironmentSensor,
    T: TimeSource,
    P: Publisher,
    M: Messenger,
{
    let mut report = ApplyReport::default();

    if let Some(alarm) = desired.alarm {
        report.alarm = Some(engine.update_alarm(alarm));
        report.applied.push(Field::Alarm);
    }
    if let Some(units) = &desired.units {
        report.record(Field::Units, engine.update_units(units));
    }
    if let Some(alt) = desired.alt {
        report.record(Field::Alt, engine.update_alt(alt));
    }
    if let Some(tz) = desired.tz {
        report.record(Field::Tz, engine.update_tz(tz));
    }
    if let Some(t_num) = &desired.t_num {
        report.record(Field::DeviceIdentity, engine.update_device_identity(t_num));
    }
    if let Some(m_num) = &desired.m_num {
        report.record(Field::MasterIdentity, engine.update_master_identity(m_num));
    }

    report
}
