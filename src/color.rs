//! Color types and twilight transition blending.
//!
//! The overlay works with raw 3-channel colors; the channel order is whatever
//! the host canvas uses (the original all-sky pipeline is BGR). The only
//! computation done here is the linear interpolation that derives the three
//! twilight transition fills from the configured light/dark endpoints.

use crate::config::{DayPeriod, GraphConfig};
use crate::constants::{BLEND_CIVIL_TO_NAUTICAL, BLEND_DAY_TO_CIVIL, BLEND_NAUTICAL_TO_ASTRO};

/// A 3-channel color, channel order owned by the host canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Component-wise linear blend toward `self`.
    ///
    /// `fraction` is the weight of `self`; 1.0 returns `self` exactly and
    /// 0.0 returns `other` exactly.
    pub fn lerp(self, other: Color, fraction: f64) -> Color {
        let f = fraction.clamp(0.0, 1.0);
        let mut out = [0u8; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let v = f64::from(self.0[i]) * f + f64::from(other.0[i]) * (1.0 - f);
            *slot = v.round() as u8;
        }
        Color(out)
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        Color(channels)
    }
}

/// The resolved palette for one render pass.
///
/// Recomputed once per invocation from the configuration and the host's
/// day/night flag. The three transition colors sit between `light` and
/// `dark` at fixed fractions.
#[derive(Debug, Clone, Copy)]
pub struct ColorSet {
    pub border: Color,
    pub light: Color,
    pub dark: Color,
    pub day_to_civil: Color,
    pub civil_to_nautical: Color,
    pub nautical_to_astro: Color,
    pub elevation: Color,
    pub sun: Color,
    pub moon: Color,
}

impl ColorSet {
    /// Pick the day or night variant of every configured color and derive
    /// the transition fills.
    pub fn resolve(config: &GraphConfig, period: DayPeriod) -> ColorSet {
        let (border, light, dark, elevation, sun, moon) = match period {
            DayPeriod::Day => (
                config.day_border_color,
                config.day_light_color,
                config.day_dark_color,
                config.elev_day_color,
                config.sun_day_color,
                config.moon_day_color,
            ),
            DayPeriod::Night => (
                config.night_border_color,
                config.night_light_color,
                config.night_dark_color,
                config.elev_night_color,
                config.sun_night_color,
                config.moon_night_color,
            ),
        };

        let light = Color::from(light);
        let dark = Color::from(dark);
        ColorSet {
            border: border.into(),
            light,
            dark,
            day_to_civil: light.lerp(dark, BLEND_DAY_TO_CIVIL),
            civil_to_nautical: light.lerp(dark, BLEND_CIVIL_TO_NAUTICAL),
            nautical_to_astro: light.lerp(dark, BLEND_NAUTICAL_TO_ASTRO),
            elevation: elevation.into(),
            sun: sun.into(),
            moon: moon.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_at_one_returns_light_exactly() {
        let light = Color([240, 240, 240]);
        let dark = Color([10, 10, 10]);
        assert_eq!(light.lerp(dark, 1.0), light);
    }

    #[test]
    fn lerp_at_zero_returns_dark_exactly() {
        let light = Color([240, 240, 240]);
        let dark = Color([10, 10, 10]);
        assert_eq!(light.lerp(dark, 0.0), dark);
    }

    #[test]
    fn lerp_midpoint_averages_channels() {
        let a = Color([200, 100, 0]);
        let b = Color([0, 100, 50]);
        assert_eq!(a.lerp(b, 0.5), Color([100, 100, 25]));
    }

    #[test]
    fn resolve_carries_configured_channels_through() {
        let mut config = GraphConfig::default();
        config.night_border_color = [1, 2, 3];
        config.sun_night_color = [4, 5, 6];
        let set = ColorSet::resolve(&config, DayPeriod::Night);
        assert_eq!(set.border, Color::from([1, 2, 3]));
        assert_eq!(set.sun, Color([4, 5, 6]));
    }

    #[test]
    fn transition_colors_sit_between_endpoints() {
        let config = GraphConfig::default();
        let set = ColorSet::resolve(&config, DayPeriod::Night);
        for c in [
            set.day_to_civil,
            set.civil_to_nautical,
            set.nautical_to_astro,
        ] {
            for i in 0..3 {
                let lo = set.dark.0[i].min(set.light.0[i]);
                let hi = set.dark.0[i].max(set.light.0[i]);
                assert!(c.0[i] >= lo && c.0[i] <= hi);
            }
        }
        // Ordered from lightest to darkest transition.
        assert!(set.day_to_civil.0[0] > set.civil_to_nautical.0[0]);
        assert!(set.civil_to_nautical.0[0] > set.nautical_to_astro.0[0]);
    }
}
