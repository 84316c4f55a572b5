//! Twilight phase classification.
//!
//! An interval between two adjacent timeline events is classified by sampling
//! the sun's altitude at the interval midpoint. Consecutive twilight
//! boundaries bracket a single altitude band by construction, so the midpoint
//! sample is exact for every interior interval; only the synthetic
//! Start/Finish intervals could straddle more than one band, and the midpoint
//! policy is the accepted approximation there.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::color::{Color, ColorSet};
use crate::constants::{HORIZON_ASTRONOMICAL, HORIZON_CIVIL, HORIZON_NAUTICAL, HORIZON_VISIBLE};
use crate::ephemeris::{Body, Ephemeris, Location};

/// The five sun-altitude bands, darkest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TwilightPhase {
    /// Below -18°: full night.
    Night,
    /// -18° to -12°: astronomical twilight.
    NightNautical,
    /// -12° to -6°: nautical twilight.
    NightCivil,
    /// -6° to 0°: civil twilight.
    NightToDay,
    /// Above the horizon.
    Day,
}

impl TwilightPhase {
    /// Classify a sun altitude in degrees.
    pub fn from_altitude(altitude_deg: f64) -> TwilightPhase {
        if altitude_deg < HORIZON_ASTRONOMICAL {
            TwilightPhase::Night
        } else if altitude_deg < HORIZON_NAUTICAL {
            TwilightPhase::NightNautical
        } else if altitude_deg < HORIZON_CIVIL {
            TwilightPhase::NightCivil
        } else if altitude_deg < HORIZON_VISIBLE {
            TwilightPhase::NightToDay
        } else {
            TwilightPhase::Day
        }
    }

    /// The fill color this phase paints with.
    pub fn fill(self, colors: &ColorSet) -> Color {
        match self {
            TwilightPhase::Night => colors.dark,
            TwilightPhase::NightNautical => colors.nautical_to_astro,
            TwilightPhase::NightCivil => colors.civil_to_nautical,
            TwilightPhase::NightToDay => colors.day_to_civil,
            TwilightPhase::Day => colors.light,
        }
    }
}

/// Classify the interval between two chronologically adjacent events.
pub fn classify_interval(
    ephemeris: &dyn Ephemeris,
    location: Location,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<TwilightPhase> {
    let midpoint = from + (to - from) / 2;
    let position = ephemeris.position(location, midpoint, Body::Sun)?;
    Ok(TwilightPhase::from_altitude(position.altitude_deg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{HorizontalPosition, MeridianKind, SearchDirection, SearchOutcome};
    use chrono::TimeZone;

    /// Gateway stub reporting a constant sun altitude.
    struct FixedAltitude(f64);

    impl Ephemeris for FixedAltitude {
        fn horizon_crossing(
            &self,
            _: Location,
            _: DateTime<Utc>,
            _: Body,
            _: f64,
            _: crate::ephemeris::Edge,
            _: SearchDirection,
        ) -> Result<SearchOutcome> {
            Ok(SearchOutcome::NeverOccurs)
        }

        fn meridian_passage(
            &self,
            _: Location,
            _: DateTime<Utc>,
            _: Body,
            _: MeridianKind,
            _: SearchDirection,
        ) -> Result<SearchOutcome> {
            Ok(SearchOutcome::NeverOccurs)
        }

        fn position(
            &self,
            _: Location,
            _: DateTime<Utc>,
            _: Body,
        ) -> Result<HorizontalPosition> {
            Ok(HorizontalPosition {
                altitude_deg: self.0,
                azimuth_deg: 0.0,
            })
        }
    }

    #[test]
    fn altitude_bands_map_to_phases() {
        assert_eq!(TwilightPhase::from_altitude(-25.0), TwilightPhase::Night);
        assert_eq!(
            TwilightPhase::from_altitude(-15.0),
            TwilightPhase::NightNautical
        );
        assert_eq!(
            TwilightPhase::from_altitude(-9.0),
            TwilightPhase::NightCivil
        );
        assert_eq!(
            TwilightPhase::from_altitude(-3.0),
            TwilightPhase::NightToDay
        );
        assert_eq!(TwilightPhase::from_altitude(0.0), TwilightPhase::Day);
        assert_eq!(TwilightPhase::from_altitude(45.0), TwilightPhase::Day);
    }

    #[test]
    fn thresholds_belong_to_the_lighter_band() {
        assert_eq!(
            TwilightPhase::from_altitude(-18.0),
            TwilightPhase::NightNautical
        );
        assert_eq!(
            TwilightPhase::from_altitude(-12.0),
            TwilightPhase::NightCivil
        );
        assert_eq!(TwilightPhase::from_altitude(-6.0), TwilightPhase::NightToDay);
    }

    #[test]
    fn classification_depends_only_on_the_midpoint() {
        let gateway = FixedAltitude(-10.0);
        let location = Location::new(45.0, 0.0).unwrap();
        let a = Utc.with_ymd_and_hms(2025, 6, 21, 2, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 6, 21, 4, 0, 0).unwrap();
        let forward = classify_interval(&gateway, location, a, b).unwrap();
        // Same interval, endpoints described in the opposite roles
        let backward = classify_interval(&gateway, location, b, a).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, TwilightPhase::NightCivil);
    }

    #[test]
    fn phases_order_from_dark_to_light() {
        assert!(TwilightPhase::Night < TwilightPhase::NightNautical);
        assert!(TwilightPhase::NightNautical < TwilightPhase::NightCivil);
        assert!(TwilightPhase::NightCivil < TwilightPhase::NightToDay);
        assert!(TwilightPhase::NightToDay < TwilightPhase::Day);
    }
}
