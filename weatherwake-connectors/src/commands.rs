//! SMS Command Protocol
//!
//! Texts to the station's number reach a cloud function before they reach
//! the station. It answers two kinds of message on its own and forwards
//! everything else:
//!
//! | Text                     | Handling                                   |
//! |--------------------------|--------------------------------------------|
//! | `?`, `? alt`, `help tz`  | help text for a preference, or the menu    |
//! | `? cur`                  | current desired preferences                |
//! | `s alt 50`, `set tz -480`| validated preference change (master only)  |
//! | anything else            | forwarded to the station as a weather ask  |
//!
//! Preference changes are not sent to the station directly. They become a
//! desired shadow update, and the station picks them up from the delta.
//!
//! ## Alarm Times
//!
//! `set alarm HH:MM` is given in the station's local time. The station's
//! clock runs on local epochs (UTC shifted by the timezone offset), so the
//! alarm is stored as a local epoch too: today at `HH:MM` if that is still
//! ahead of the local now, tomorrow otherwise.

use chrono::DateTime;
use thiserror::Error;
use weatherwake_core::config::parse_identity;
use weatherwake_core::constants::SECONDS_PER_DAY;
use weatherwake_core::UnitSystem;
use weatherwake_schemas::{DesiredState, MessageEnvelope};

/// Answer for a set request from anyone but the master identity
pub const UNAUTHORIZED: &str = "UNAUTHORIZED!";

/// Answer for a set request without exactly three words
pub const WRONG_ARITY: &str =
    "Should be exactly 3 terms:\nset <term> <preference>\nPerhaps see help with '?'?";

/// Answer for `? cur` when no desired state exists yet
pub const NO_SHADOW: &str = "No shadow set, set it through AWS IoT.\n";

/// What a help request asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    /// The menu
    General,
    /// Altitude
    Alt,
    /// Timezone offset
    Tz,
    /// Master identity
    MasterNumber,
    /// Device identity
    DeviceNumber,
    /// Alarm time
    Alarm,
    /// Unit system
    Units,
    /// Current desired preferences
    Current,
}

impl HelpTopic {
    fn from_word(word: &str) -> Self {
        match word.to_ascii_lowercase().as_str() {
            "alt" => Self::Alt,
            "tz" => Self::Tz,
            "m_num" => Self::MasterNumber,
            "t_num" => Self::DeviceNumber,
            "alarm" => Self::Alarm,
            "units" => Self::Units,
            "cur" => Self::Current,
            _ => Self::General,
        }
    }
}

/// Help text for a topic.
///
/// `Current` depends on the shadow and is built by [`handle_sms`]; its
/// static text is the menu.
pub fn help_text(topic: HelpTopic) -> &'static str {
    match topic {
        HelpTopic::General | HelpTopic::Current => {
            ":: Help (var)\nalt - Altitude\ncur - Current Set\nm_num - Master number\n\
             t_num - Twilio Number\nalarm - Alarm\nunits - Units\ntz - Timezone"
        }
        HelpTopic::Alt => ":: Help alt\nSet altitude in meters (integers):\nset alt 50\n",
        HelpTopic::Tz => ":: Help tz\nSet timezone adjust in minutes:\nset tz -480\n",
        HelpTopic::MasterNumber => ":: Help m_num\nSet master number:\nset m_num +18005551212\n",
        HelpTopic::DeviceNumber => ":: Help t_num\nSet Twilio number:\nset t_num +18005551212\n",
        HelpTopic::Alarm => {
            ":: Help alarm\nSet alarm hours:minutes, 24 hour clock:\nset alarm 15:12\n"
        }
        HelpTopic::Units => {
            ":: Help units\nSet units type:\nset units imperial\nor\nset units metric"
        }
    }
}

/// Rejected preference value, displayed as the SMS answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// Not one of the six preference names
    #[error("Should be exactly 3 terms:\nset <term> <preference>\nPerhaps see help with '?'?")]
    UnknownKey,

    /// Altitude is not an integer
    #[error("Altitude must be an integer, in meters.\n")]
    InvalidAltitude,

    /// Timezone offset is not an integer
    #[error("Timezone must be an integer, in minutes.\n")]
    InvalidTimezone,

    /// Identity is not '+' and digits
    #[error(
        "Number must start with '+' followed by county + local code then phone number ie '+18005551212'\n"
    )]
    InvalidNumber,

    /// Alarm is not a valid `HH:MM`
    #[error("Alarm must be in XX:YY format, will adjust to local timezone automatically.\n")]
    InvalidAlarm,

    /// Units other than metric or imperial
    #[error("Must be 'imperial' or 'metric' units, sans quotes.")]
    InvalidUnits,
}

/// A parsed `set` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// Altitude in meters
    Alt(i32),
    /// Timezone offset in minutes
    Tz(i32),
    /// Identity allowed to change preferences
    MasterIdentity(String),
    /// Identity the station sends from
    DeviceIdentity(String),
    /// Local alarm time
    Alarm {
        /// 0..=23
        hour: u32,
        /// 0..=59
        minute: u32,
    },
    /// Unit system
    Units(UnitSystem),
}

impl Preference {
    /// Parse `value` for the preference named `key`.
    pub fn parse(key: &str, value: &str) -> Result<Self, PreferenceError> {
        match key.to_ascii_lowercase().as_str() {
            "alt" => value
                .parse()
                .map(Self::Alt)
                .map_err(|_| PreferenceError::InvalidAltitude),
            "tz" => value
                .parse()
                .map(Self::Tz)
                .map_err(|_| PreferenceError::InvalidTimezone),
            "m_num" => parse_identity(value)
                .map(|id| Self::MasterIdentity(id.as_str().to_string()))
                .map_err(|_| PreferenceError::InvalidNumber),
            "t_num" => parse_identity(value)
                .map(|id| Self::DeviceIdentity(id.as_str().to_string()))
                .map_err(|_| PreferenceError::InvalidNumber),
            "alarm" => parse_clock(value),
            "units" => value
                .to_ascii_lowercase()
                .parse()
                .map(Self::Units)
                .map_err(|_| PreferenceError::InvalidUnits),
            _ => Err(PreferenceError::UnknownKey),
        }
    }
}

fn parse_clock(value: &str) -> Result<Preference, PreferenceError> {
    let (hour, minute) = value.split_once(':').ok_or(PreferenceError::InvalidAlarm)?;
    let hour: u32 = hour.parse().map_err(|_| PreferenceError::InvalidAlarm)?;
    let minute: u32 = minute.parse().map_err(|_| PreferenceError::InvalidAlarm)?;
    if hour > 23 || minute > 59 {
        return Err(PreferenceError::InvalidAlarm);
    }
    Ok(Preference::Alarm { hour, minute })
}

/// Classified SMS body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `?...` or `help...`
    Help(HelpTopic),
    /// `s ...` or `set ...`, split on single spaces
    Set {
        /// Words after the verb
        args: Vec<String>,
    },
    /// Anything else
    Weather,
}

impl Command {
    /// Classify a message body.
    pub fn parse(body: &str) -> Self {
        let lower = body.to_ascii_lowercase();
        let words: Vec<&str> = body.split(' ').collect();

        if body.starts_with('?') || (body.len() > 3 && lower.starts_with("help")) {
            let topic = words.get(1).map_or(HelpTopic::General, |w| HelpTopic::from_word(w));
            return Command::Help(topic);
        }

        if lower.starts_with("s ") || lower.starts_with("set ") {
            return Command::Set {
                args: words[1..].iter().map(|w| w.to_string()).collect(),
            };
        }

        Command::Weather
    }
}

/// Whether `from` may change preferences.
///
/// Anyone may while no master identity is set.
pub fn authorize(from: &str, master: Option<&str>) -> bool {
    master.map_or(true, |master| master == from)
}

/// Local epoch of the next `hour:minute` in the station's timezone.
///
/// Returns `None` when `now_utc` is outside the representable date range.
pub fn next_alarm_epoch(hour: u32, minute: u32, now_utc: i64, tz_offset_min: i32) -> Option<i64> {
    let local_now = now_utc + 60 * i64::from(tz_offset_min);
    let today = DateTime::from_timestamp(local_now, 0)?.date_naive();
    let proposed = today.and_hms_opt(hour, minute, 0)?.and_utc().timestamp();

    if proposed < local_now {
        Some(proposed + SECONDS_PER_DAY as i64)
    } else {
        Some(proposed)
    }
}

/// Outcome of one SMS
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsResponse {
    /// Immediate answer to the sender
    pub reply: Option<String>,
    /// Desired shadow fields to merge and publish
    pub shadow_update: Option<DesiredState>,
    /// Envelope to publish on the message topic
    pub forward: Option<MessageEnvelope>,
}

impl SmsResponse {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Handle one SMS sent by `from` to the station number `to`.
///
/// `shadow` is the current desired state, if the shadow exists.
pub fn handle_sms(
    body: &str,
    from: &str,
    to: &str,
    shadow: Option<&DesiredState>,
    now_utc: i64,
) -> SmsResponse {
    match Command::parse(body) {
        Command::Help(HelpTopic::Current) => {
            SmsResponse::reply(shadow.map_or_else(|| NO_SHADOW.to_string(), |s| current_text(s, from)))
        }
        Command::Help(topic) => SmsResponse::reply(help_text(topic)),
        Command::Set { args } => handle_set(&args, from, shadow, now_utc),
        Command::Weather => {
            log::info!("Forwarding weather request from {}", from);
            SmsResponse {
                forward: Some(MessageEnvelope::weather_request(to, from)),
                ..SmsResponse::default()
            }
        }
    }
}

fn handle_set(
    args: &[String],
    from: &str,
    shadow: Option<&DesiredState>,
    now_utc: i64,
) -> SmsResponse {
    if !authorize(from, shadow.and_then(|s| s.m_num.as_deref())) {
        log::warn!("Rejected set from {}", from);
        return SmsResponse::reply(UNAUTHORIZED);
    }

    let (key, value) = match args {
        [key, value] => (key, value),
        _ => return SmsResponse::reply(WRONG_ARITY),
    };

    let preference = match Preference::parse(key, value) {
        Ok(preference) => preference,
        Err(err) => return SmsResponse::reply(err.to_string()),
    };

    let mut update = DesiredState::default();
    let reply = match preference {
        Preference::Alt(alt) => {
            update.alt = Some(alt);
            format!("Updating altitude to {}m.\n", alt)
        }
        Preference::Tz(tz) => {
            update.tz = Some(tz);
            format!("Updating timezone to {} min.\n", tz)
        }
        Preference::MasterIdentity(number) => {
            let reply = format!("Updating master number to {}.\n", number);
            update.m_num = Some(number);
            reply
        }
        Preference::DeviceIdentity(number) => {
            let reply = format!(
                "Updating Twilio number to {}.  Update webhook in Twilio console too!\n",
                number
            );
            update.t_num = Some(number);
            reply
        }
        Preference::Alarm { hour, minute } => {
            let tz = shadow.and_then(|s| s.tz).unwrap_or(0);
            let epoch = next_alarm_epoch(hour, minute, now_utc, tz)
                .and_then(|epoch| i32::try_from(epoch).ok());
            match epoch {
                Some(epoch) => {
                    update.alarm = Some(epoch);
                    format!("Updating alarm to {}.", epoch)
                }
                None => return SmsResponse::reply(PreferenceError::InvalidAlarm.to_string()),
            }
        }
        Preference::Units(units) => {
            update.units = Some(units.as_str().to_string());
            format!("Updating units to {}.", units)
        }
    };

    log::info!("{}", reply.trim_end());
    SmsResponse {
        reply: Some(reply),
        shadow_update: Some(update),
        forward: None,
    }
}

fn current_text(desired: &DesiredState, from: &str) -> String {
    let mut text = String::new();
    if let Some(tz) = desired.tz {
        text.push_str(&format!("tz: {}\n", tz));
    }
    if let Some(t_num) = &desired.t_num {
        text.push_str(&format!("t_num: {}\n", t_num));
    }
    match &desired.m_num {
        Some(m_num) if m_num == from => text.push_str(&format!("m_num: {}\n", m_num)),
        Some(_) => text.push_str("m_num: (not this number)\n"),
        None => {}
    }
    if let Some(alarm) = desired.alarm {
        text.push_str(&format!("alarm: {}\n", alarm));
    }
    if let Some(units) = &desired.units {
        text.push_str(&format!("units: {}\n", units));
    }
    if let Some(alt) = desired.alt {
        text.push_str(&format!("alt: {}\n", alt));
    }
    text
}
