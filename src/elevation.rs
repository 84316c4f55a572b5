//! Sun and moon altitude sampling for the elevation chart.
//!
//! Both bodies are sampled at identical instants across the window so their
//! polylines share the x-grid exactly. Altitudes are mapped to signed pixel
//! offsets from the chart's vertical center: +90° is half the chart height
//! above center, -90° half below.

use anyhow::Result;

use crate::constants::ELEVATION_SAMPLE_SPACING_PX;
use crate::ephemeris::{Body, Ephemeris, Location};
use crate::timeline::TimeWindow;

/// One sampled altitude on the chart grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    /// Horizontal offset within the chart, fractional pixels.
    pub x_offset: f64,
    /// Signed vertical offset from the chart center, pixels (up positive).
    pub height: i32,
}

/// The two altitude polylines of one render pass.
#[derive(Debug, Clone)]
pub struct CelestialPaths {
    pub sun: Vec<ElevationSample>,
    pub moon: Vec<ElevationSample>,
}

/// Sample sun and moon altitude across `window` for a chart of
/// `chart_width` × `chart_height` pixels.
///
/// Produces n + 1 samples per body with n = floor(width / 3), so adjacent
/// samples sit roughly three pixels apart.
pub fn sample_paths(
    ephemeris: &dyn Ephemeris,
    location: Location,
    window: TimeWindow,
    chart_width: u32,
    chart_height: u32,
) -> Result<CelestialPaths> {
    let steps = (chart_width / ELEVATION_SAMPLE_SPACING_PX).max(1);
    let step_x = f64::from(chart_width) / f64::from(steps);
    let step_t = window.duration() / steps as i32;

    let mut sun = Vec::with_capacity(steps as usize + 1);
    let mut moon = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let instant = window.start + step_t * i as i32;
        let x_offset = f64::from(i) * step_x;
        for (body, path) in [(Body::Sun, &mut sun), (Body::Moon, &mut moon)] {
            let position = ephemeris.position(location, instant, body)?;
            let height =
                (position.altitude_deg / 90.0 * f64::from(chart_height) / 2.0).round() as i32;
            path.push(ElevationSample { x_offset, height });
        }
    }

    Ok(CelestialPaths { sun, moon })
}
