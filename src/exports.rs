//! Side-channel exports for downstream overlay modules.
//!
//! Besides the rendered overlay, each pass computes a small set of key/value
//! pairs other modules consume: the sun's current altitude and azimuth, and
//! the next moon rise/set/transit/antitransit and sun transit/antitransit
//! searched from the window start, as HH:MM UTC strings. The pairs are
//! returned as plain data; writing them into the process environment is an
//! explicit opt-in step the host performs.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::ephemeris::{Body, Edge, Ephemeris, Location, MeridianKind, SearchDirection};

/// Environment keys, kept compatible with the original all-sky pipeline.
pub const KEY_SUN_ALT: &str = "AS_SUN_ALT";
pub const KEY_SUN_AZ: &str = "AS_SUN_AZ";
pub const KEY_MOON_TRANSIT: &str = "AS_MOON_TRANSIT";
pub const KEY_MOON_ANTITRANSIT: &str = "AS_MOON_ANTITRANSIT";
pub const KEY_MOONRISE: &str = "AS_MOONRISE";
pub const KEY_MOONSET: &str = "AS_MOONSET";
pub const KEY_SUN_NOON: &str = "AS_SUN_NOON";
pub const KEY_SUN_MIDNIGHT: &str = "AS_SUN_MIDNIGHT";

fn hhmm(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

/// Compute the export set for one render pass.
///
/// Events that never occur (polar moon) simply omit their key.
pub fn compute_exports(
    ephemeris: &dyn Ephemeris,
    location: Location,
    now: DateTime<Utc>,
    window_start: DateTime<Utc>,
) -> Result<Vec<(String, String)>> {
    let mut exports = Vec::with_capacity(8);

    let sun = ephemeris.position(location, now, Body::Sun)?;
    exports.push((KEY_SUN_ALT.to_string(), format!("{:.3}", sun.altitude_deg)));
    exports.push((KEY_SUN_AZ.to_string(), format!("{:.3}", sun.azimuth_deg)));

    let mut push_meridian = |key: &str, body: Body, kind: MeridianKind| -> Result<()> {
        let outcome = ephemeris.meridian_passage(
            location,
            window_start,
            body,
            kind,
            SearchDirection::Forward,
        )?;
        if let Some(instant) = outcome.occurs() {
            exports.push((key.to_string(), hhmm(instant)));
        }
        Ok(())
    };
    push_meridian(KEY_MOON_TRANSIT, Body::Moon, MeridianKind::Transit)?;
    push_meridian(KEY_MOON_ANTITRANSIT, Body::Moon, MeridianKind::Antitransit)?;

    for (key, edge) in [(KEY_MOONRISE, Edge::Rising), (KEY_MOONSET, Edge::Setting)] {
        let outcome = ephemeris.horizon_crossing(
            location,
            window_start,
            Body::Moon,
            0.0,
            edge,
            SearchDirection::Forward,
        )?;
        if let Some(instant) = outcome.occurs() {
            exports.push((key.to_string(), hhmm(instant)));
        }
    }

    let mut push_meridian = |key: &str, kind: MeridianKind| -> Result<()> {
        let outcome = ephemeris.meridian_passage(
            location,
            window_start,
            Body::Sun,
            kind,
            SearchDirection::Forward,
        )?;
        if let Some(instant) = outcome.occurs() {
            exports.push((key.to_string(), hhmm(instant)));
        }
        Ok(())
    };
    push_meridian(KEY_SUN_NOON, MeridianKind::Transit)?;
    push_meridian(KEY_SUN_MIDNIGHT, MeridianKind::Antitransit)?;

    Ok(exports)
}

/// Write the exports into the process environment.
///
/// Invocations are sequential per the host contract, so last-writer-wins is
/// the intended overwrite behavior.
pub fn apply_to_env(exports: &[(String, String)]) {
    for (key, value) in exports {
        // SAFETY: the host invokes one render pass at a time; no other
        // thread reads or writes the environment concurrently.
        unsafe { std::env::set_var(key, value) };
    }
}
