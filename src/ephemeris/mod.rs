//! Ephemeris gateway capability.
//!
//! The timeline engine never computes rise/set instants itself; it asks an
//! [`Ephemeris`] implementation. The trait makes the polar "this event does
//! not occur within a bounded search" case a first-class value
//! ([`SearchOutcome::NeverOccurs`]) instead of an exception to swallow, so
//! callers and tests can exercise it directly.
//!
//! [`analytic::AnalyticEphemeris`] is the in-crate implementation used by the
//! CLI and the test suite. Hosts with a precision ephemeris implement the
//! trait over their own engine.

pub mod analytic;

use anyhow::Result;
use chrono::{DateTime, Utc};

pub use analytic::AnalyticEphemeris;

/// Observer position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Build a location, rejecting out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Location> {
        if !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!("latitude must be between -90 and 90 degrees (got {latitude})");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!("longitude must be between -180 and 180 degrees (got {longitude})");
        }
        Ok(Location {
            latitude,
            longitude,
        })
    }
}

/// Celestial body the gateway can answer questions about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Sun,
    Moon,
}

/// Which side of a horizon crossing is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Setting,
}

/// Which meridian passage is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeridianKind {
    /// Upper passage, solar noon for the sun.
    Transit,
    /// Lower passage, solar midnight for the sun.
    Antitransit,
}

/// Search direction relative to the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// The next occurrence strictly after the reference instant.
    Forward,
    /// The most recent occurrence strictly before the reference instant.
    Backward,
}

/// Result of a bounded event search.
///
/// `NeverOccurs` is the structural answer for polar day/night: the body never
/// crosses the requested horizon angle. It is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Occurs(DateTime<Utc>),
    NeverOccurs,
}

impl SearchOutcome {
    /// The instant, if the event occurs.
    pub fn occurs(self) -> Option<DateTime<Utc>> {
        match self {
            SearchOutcome::Occurs(t) => Some(t),
            SearchOutcome::NeverOccurs => None,
        }
    }
}

/// Instantaneous horizontal coordinates of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Altitude above the visible horizon, degrees.
    pub altitude_deg: f64,
    /// Azimuth from north, clockwise, degrees in [0, 360).
    pub azimuth_deg: f64,
}

/// External ephemeris computation consumed by the timeline engine.
///
/// All searches are synchronous and guaranteed to terminate: they yield
/// either an instant or `NeverOccurs`.
pub trait Ephemeris {
    /// Find the crossing of `horizon_deg` altitude by `body`, on the given
    /// `edge`, searching in `direction` from `from`.
    fn horizon_crossing(
        &self,
        location: Location,
        from: DateTime<Utc>,
        body: Body,
        horizon_deg: f64,
        edge: Edge,
        direction: SearchDirection,
    ) -> Result<SearchOutcome>;

    /// Find the meridian passage of `body`, searching in `direction` from
    /// `from`. Meridian passages always occur.
    fn meridian_passage(
        &self,
        location: Location,
        from: DateTime<Utc>,
        body: Body,
        kind: MeridianKind,
        direction: SearchDirection,
    ) -> Result<SearchOutcome>;

    /// Altitude and azimuth of `body` at `at`.
    fn position(
        &self,
        location: Location,
        at: DateTime<Utc>,
        body: Body,
    ) -> Result<HorizontalPosition>;
}
