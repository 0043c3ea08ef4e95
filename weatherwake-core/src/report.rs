//! Weather Report Composer
//!
//! Renders an observation as a single SMS-sized text:
//!
//! ```text
//! Daily Report!
//! Conditions as of Sun. 7:12:09
//!    70.70 *F
//!    48.00 % Humidity
//!  1021.38 hPa (   30.16 in Hg)
//! ```
//!
//! Numbers are right-aligned in eight columns with two decimals. Pressure is
//! always reduced to sea level first, using the observation's own
//! temperature and the station altitude. Output longer than one SMS segment
//! (`REPORT_MAX_LEN`) is cut, which only happens with a long intro.

use core::fmt::Write;

use heapless::String;

use crate::config::UnitSystem;
use crate::constants::buffers::REPORT_MAX_LEN;
use crate::observation::Observation;
use crate::text::TruncatingWriter;
use crate::units::{celsius_to_fahrenheit, hpa_to_inhg, inhg_to_mm, station_pressure_to_sea_level};

/// Composed report text
pub type Report = String<REPORT_MAX_LEN>;

/// Render `observation` in `units`, prefixed with `intro`.
///
/// # Panics
///
/// Panics if the observation's day of week is out of range.
pub fn compose_report(
    intro: &str,
    observation: &Observation,
    units: UnitSystem,
    altitude_m: i32,
) -> Report {
    let sea_level = station_pressure_to_sea_level(
        observation.temperature,
        observation.pressure,
        altitude_m,
    );

    let (temperature, mercury) = match units {
        UnitSystem::Imperial => (
            celsius_to_fahrenheit(observation.temperature),
            hpa_to_inhg(sea_level),
        ),
        UnitSystem::Metric => (observation.temperature, inhg_to_mm(hpa_to_inhg(sea_level))),
    };

    let mut writer = TruncatingWriter::<REPORT_MAX_LEN>::new();
    // TruncatingWriter never fails
    let _ = write!(
        writer,
        "{}Conditions as of {} {}:{:02}:{:02}\n{:8.2} *{}\n{:8.2} % Humidity\n{:8.2} hPa ({:8.2} {} Hg)\n",
        intro,
        observation.day_name(),
        observation.hour,
        observation.minute,
        observation.second,
        temperature,
        units.temperature_symbol(),
        observation.humidity,
        sea_level,
        mercury,
        units.mercury_unit(),
    );
    writer.into_inner()
}
