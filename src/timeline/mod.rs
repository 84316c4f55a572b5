//! Timeline resolution: from ephemeris queries to a pixel-mapped event band.
//!
//! The pipeline is a sequence of immutable values. [`TimeWindow`] fixes the
//! 24-hour span around "now", [`resolve_events`] collects every twilight
//! boundary and meridian passage the gateway reports, and [`build_timeline`]
//! sorts, clips, injects the window boundaries, maps instants to pixel
//! offsets, and pulls the Noon/Midnight markers out into their own slots.
//!
//! A window that ends up with no events at all is a defined failure here, not
//! undefined behavior: the caller decides how to degrade.

pub mod phase;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::config::NowAnchor;
use crate::constants::{HORIZON_ASTRONOMICAL, HORIZON_CIVIL, HORIZON_NAUTICAL, HORIZON_VISIBLE};
use crate::ephemeris::{Body, Edge, Ephemeris, Location, MeridianKind, SearchDirection};

/// Twilight phase boundaries plus the synthetic window edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    DawnAstro,
    DuskAstro,
    DawnNauti,
    DuskNauti,
    DawnCivil,
    DuskCivil,
    Sunrise,
    Sunset,
    Start,
    Finish,
}

/// Meridian passages rendered as single reference lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Noon,
    Midnight,
}

/// One raw event out of the resolver, before clipping and pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Phase(EventKind),
    Marker(MarkerKind),
}

/// An event as enumerated by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub instant: DateTime<Utc>,
    pub kind: RawKind,
}

/// A phase-boundary event placed on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEvent {
    pub instant: DateTime<Utc>,
    pub kind: EventKind,
    /// Horizontal offset within the rendered strip, pixels.
    pub pixel_x: i32,
}

/// A Noon or Midnight reference line placed on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantMarker {
    pub instant: DateTime<Utc>,
    pub kind: MarkerKind,
    pub pixel_x: i32,
}

/// The rendered 24-hour span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub finish: DateTime<Utc>,
}

impl TimeWindow {
    /// Derive the window from "now" and the configured anchor.
    pub fn from_now(now: DateTime<Utc>, anchor: NowAnchor) -> TimeWindow {
        match anchor {
            NowAnchor::Center => TimeWindow {
                start: now - Duration::hours(12),
                finish: now + Duration::hours(12),
            },
            NowAnchor::Left => TimeWindow {
                start: now,
                finish: now + Duration::hours(24),
            },
        }
    }

    pub fn duration(&self) -> Duration {
        self.finish - self.start
    }

    /// Affine map from an instant inside the window to a pixel offset in a
    /// strip of `width` pixels. Start maps to 0, finish to `width`.
    pub fn pixel_x(&self, instant: DateTime<Utc>, width: u32) -> i32 {
        let elapsed = (instant - self.start).num_milliseconds() as f64;
        let total = self.duration().num_milliseconds() as f64;
        (elapsed / total * f64::from(width)).round() as i32
    }
}

/// The ordered, clipped, boundary-injected event band.
#[derive(Debug, Clone)]
pub struct Timeline {
    /// Strictly ordered by instant; first is always `Start`, last `Finish`.
    pub events: Vec<PhaseEvent>,
    pub noon: Option<InstantMarker>,
    pub midnight: Option<InstantMarker>,
}

/// Horizon angle to dawn/dusk kind mapping, in query order.
const HORIZON_BANDS: [(f64, EventKind, EventKind); 4] = [
    (HORIZON_ASTRONOMICAL, EventKind::DawnAstro, EventKind::DuskAstro),
    (HORIZON_NAUTICAL, EventKind::DawnNauti, EventKind::DuskNauti),
    (HORIZON_CIVIL, EventKind::DawnCivil, EventKind::DuskCivil),
    (HORIZON_VISIBLE, EventKind::Sunrise, EventKind::Sunset),
];

/// Enumerate every phase-boundary event and meridian passage around `now`.
///
/// Queries run forward from `now` always, and backward too when the window
/// is centered. A gateway answer of "never occurs" simply contributes no
/// event; only genuine gateway failures propagate.
pub fn resolve_events(
    ephemeris: &dyn Ephemeris,
    location: Location,
    now: DateTime<Utc>,
    anchor: NowAnchor,
) -> Result<Vec<RawEvent>> {
    let directions: &[SearchDirection] = match anchor {
        NowAnchor::Center => &[SearchDirection::Forward, SearchDirection::Backward],
        NowAnchor::Left => &[SearchDirection::Forward],
    };

    let mut events = Vec::new();
    for &direction in directions {
        for (horizon, dawn, dusk) in HORIZON_BANDS {
            for (edge, kind) in [(Edge::Rising, dawn), (Edge::Setting, dusk)] {
                let outcome = ephemeris
                    .horizon_crossing(location, now, Body::Sun, horizon, edge, direction)?;
                if let Some(instant) = outcome.occurs() {
                    events.push(RawEvent {
                        instant,
                        kind: RawKind::Phase(kind),
                    });
                }
            }
        }
        for (passage, marker) in [
            (MeridianKind::Transit, MarkerKind::Noon),
            (MeridianKind::Antitransit, MarkerKind::Midnight),
        ] {
            let outcome =
                ephemeris.meridian_passage(location, now, Body::Sun, passage, direction)?;
            if let Some(instant) = outcome.occurs() {
                events.push(RawEvent {
                    instant,
                    kind: RawKind::Marker(marker),
                });
            }
        }
    }
    Ok(events)
}

/// Order, clip, and pixel-map the raw event set into a [`Timeline`].
///
/// `strip_width` is the rendered (already clamped) strip width. The forward
/// and backward searches may each contribute a Noon and a Midnight; the
/// later-discovered one of each kind wins, so at most one marker per kind
/// survives.
pub fn build_timeline(
    mut raw: Vec<RawEvent>,
    window: TimeWindow,
    strip_width: u32,
) -> Result<Timeline> {
    raw.sort_by_key(|event| event.instant);
    raw.retain(|event| event.instant >= window.start && event.instant <= window.finish);

    if raw.is_empty() {
        anyhow::bail!(
            "no astronomical events fall inside the window {} .. {}",
            window.start,
            window.finish
        );
    }

    let mut events = Vec::with_capacity(raw.len() + 2);
    let mut noon = None;
    let mut midnight = None;

    events.push(PhaseEvent {
        instant: window.start,
        kind: EventKind::Start,
        pixel_x: 0,
    });
    for event in raw {
        let pixel_x = window.pixel_x(event.instant, strip_width);
        match event.kind {
            RawKind::Phase(kind) => events.push(PhaseEvent {
                instant: event.instant,
                kind,
                pixel_x,
            }),
            RawKind::Marker(kind) => {
                let marker = InstantMarker {
                    instant: event.instant,
                    kind,
                    pixel_x,
                };
                match kind {
                    MarkerKind::Noon => noon = Some(marker),
                    MarkerKind::Midnight => midnight = Some(marker),
                }
            }
        }
    }
    events.push(PhaseEvent {
        instant: window.finish,
        kind: EventKind::Finish,
        pixel_x: strip_width as i32,
    });

    Ok(Timeline {
        events,
        noon,
        midnight,
    })
}
