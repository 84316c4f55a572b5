//! Closed-form spherical-astronomy gateway.
//!
//! Display-grade model of sun and moon positions built from declination and
//! hour angle only:
//!
//! - solar declination follows the standard cosine-of-day-number
//!   approximation, the hour angle advances 15°/h from UTC plus longitude;
//! - the moon is modeled as a retarded sun: its hour angle lags the sun's by
//!   the synodic phase (new moon 2000-01-06 18:14 UTC), giving the 24.84 h
//!   lunar day, and its declination oscillates with the 27.32-day tropical
//!   month.
//!
//! Crossings are solved exactly for a declination frozen at the query
//! instant, so an event search is a single `acos`, never an iteration. The
//! frozen declination costs well under a minute per event near the solstices
//! and a few minutes near the equinoxes. At the overlay's scale of roughly
//! half a pixel per minute that is invisible; hosts that need arcminute
//! accuracy supply their own [`Ephemeris`] implementation.
//!
//! No atmospheric refraction is applied anywhere.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

use super::{
    Body, Edge, Ephemeris, HorizontalPosition, Location, MeridianKind, SearchDirection,
    SearchOutcome,
};

/// Earth axial tilt, degrees.
const OBLIQUITY_DEG: f64 = 23.44;

/// Mean synodic month (new moon to new moon), days.
const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Mean tropical month (declination cycle), days.
const TROPICAL_MONTH_DAYS: f64 = 27.321582;

/// New moon of 2000-01-06 18:14 UTC as a unix timestamp.
const NEW_MOON_EPOCH: i64 = 947_182_440;

/// Sun hour-angle rate, degrees per second.
const SUN_RATE: f64 = 360.0 / 86_400.0;

/// Moon hour-angle rate, degrees per second (lunar day of ~24.84 h).
const MOON_RATE: f64 = SUN_RATE - 360.0 / (SYNODIC_MONTH_DAYS * 86_400.0);

/// Self-contained analytic ephemeris.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

/// Normalize an angle in degrees to (-180, 180].
fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Fractional days since the new-moon epoch.
fn days_since_epoch(at: DateTime<Utc>) -> f64 {
    let secs = at.timestamp() - NEW_MOON_EPOCH;
    secs as f64 / 86_400.0 + f64::from(at.nanosecond()) / 1e9 / 86_400.0
}

/// Fractional UTC hours elapsed since midnight.
fn hours_of_day(at: DateTime<Utc>) -> f64 {
    f64::from(at.time().num_seconds_from_midnight()) / 3_600.0
        + f64::from(at.nanosecond()) / 1e9 / 3_600.0
}

impl AnalyticEphemeris {
    /// Declination of `body` at `at`, degrees.
    fn declination(&self, at: DateTime<Utc>, body: Body) -> f64 {
        match body {
            Body::Sun => {
                let day = f64::from(at.ordinal() - 1) + hours_of_day(at) / 24.0;
                -OBLIQUITY_DEG * (std::f64::consts::TAU * (day + 10.0) / 365.2422).cos()
            }
            Body::Moon => {
                let cycles = days_since_epoch(at) / TROPICAL_MONTH_DAYS;
                OBLIQUITY_DEG * (std::f64::consts::TAU * cycles).sin()
            }
        }
    }

    /// Local hour angle of `body` at `at`, degrees in (-180, 180].
    fn hour_angle(&self, location: Location, at: DateTime<Utc>, body: Body) -> f64 {
        let solar = (hours_of_day(at) - 12.0) * 15.0 + location.longitude;
        match body {
            Body::Sun => normalize_degrees(solar),
            Body::Moon => {
                let phase_lag = 360.0 * days_since_epoch(at) / SYNODIC_MONTH_DAYS;
                normalize_degrees(solar - phase_lag)
            }
        }
    }

    fn rate(&self, body: Body) -> f64 {
        match body {
            Body::Sun => SUN_RATE,
            Body::Moon => MOON_RATE,
        }
    }

    /// Instant at which the body's hour angle reaches `target_deg`, searched
    /// from `from` in `direction`. Exact for the body's linear hour angle.
    fn solve_hour_angle(
        &self,
        location: Location,
        from: DateTime<Utc>,
        body: Body,
        target_deg: f64,
        direction: SearchDirection,
    ) -> DateTime<Utc> {
        let current = self.hour_angle(location, from, body);
        let mut delta_deg = match direction {
            SearchDirection::Forward => (target_deg - current).rem_euclid(360.0),
            SearchDirection::Backward => (current - target_deg).rem_euclid(360.0),
        };
        // "Next" and "previous" are strict: an event exactly at `from`
        // resolves to the following (or preceding) revolution.
        if delta_deg < 1e-9 {
            delta_deg = 360.0;
        }
        let delta_secs = delta_deg / self.rate(body);
        let offset = Duration::milliseconds((delta_secs * 1_000.0).round() as i64);
        match direction {
            SearchDirection::Forward => from + offset,
            SearchDirection::Backward => from - offset,
        }
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn horizon_crossing(
        &self,
        location: Location,
        from: DateTime<Utc>,
        body: Body,
        horizon_deg: f64,
        edge: Edge,
        direction: SearchDirection,
    ) -> Result<SearchOutcome> {
        let lat = location.latitude.to_radians();
        let dec = self.declination(from, body).to_radians();

        // cos H0 = (sin h0 - sin lat sin dec) / (cos lat cos dec); outside
        // [-1, 1] the body never reaches the horizon angle (polar day/night).
        let cos_h0 = (horizon_deg.to_radians().sin() - lat.sin() * dec.sin())
            / (lat.cos() * dec.cos());
        if !(-1.0..=1.0).contains(&cos_h0) {
            return Ok(SearchOutcome::NeverOccurs);
        }

        let half_arc_deg = cos_h0.acos().to_degrees();
        let target = match edge {
            Edge::Rising => -half_arc_deg,
            Edge::Setting => half_arc_deg,
        };
        Ok(SearchOutcome::Occurs(self.solve_hour_angle(
            location, from, body, target, direction,
        )))
    }

    fn meridian_passage(
        &self,
        location: Location,
        from: DateTime<Utc>,
        body: Body,
        kind: MeridianKind,
        direction: SearchDirection,
    ) -> Result<SearchOutcome> {
        let target = match kind {
            MeridianKind::Transit => 0.0,
            MeridianKind::Antitransit => 180.0,
        };
        Ok(SearchOutcome::Occurs(self.solve_hour_angle(
            location, from, body, target, direction,
        )))
    }

    fn position(
        &self,
        location: Location,
        at: DateTime<Utc>,
        body: Body,
    ) -> Result<HorizontalPosition> {
        let lat = location.latitude.to_radians();
        let dec = self.declination(at, body).to_radians();
        let hour_angle = self.hour_angle(location, at, body).to_radians();

        let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos();
        let altitude_deg = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

        // Azimuth from north, clockwise.
        let azimuth_deg = (hour_angle
            .sin()
            .atan2(hour_angle.cos() * lat.sin() - dec.tan() * lat.cos())
            .to_degrees()
            + 180.0)
            .rem_euclid(360.0);

        Ok(HorizontalPosition {
            altitude_deg,
            azimuth_deg,
        })
    }
}
