//! Overlay rendering: timeline strip, markers, decorations, elevation chart.
//!
//! [`render_light_timeline`] is the single entry point, callable from any
//! host adapter. It resolves geometry and colors, runs the timeline pipeline,
//! and issues drawing primitives. With partial opacity everything is drawn on
//! a scratch copy and blended back; at full opacity it draws in place.
//!
//! Failures degrade per feature: a timeline that cannot be built (every event
//! clipped away) skips the strip with a warning while the elevation chart and
//! the exports still run.

use anyhow::{Context, Result};
use chrono::{DateTime, Timelike, Utc};

use crate::canvas::Canvas;
use crate::color::{Color, ColorSet};
use crate::config::{DayPeriod, GraphConfig, NowAnchor, validate_config};
use crate::constants::{HOUR_DIVISIONS, POLAR_CIRCLE_LATITUDE, TROPIC_LATITUDE};
use crate::elevation::{CelestialPaths, sample_paths};
use crate::ephemeris::{Ephemeris, Location};
use crate::exports::compute_exports;
use crate::layout::{LayoutRect, resolve_chart, resolve_strip};
use crate::timeline::phase::classify_interval;
use crate::timeline::{TimeWindow, Timeline, build_timeline, resolve_events};

/// Host-supplied context for one render pass, resolved once by the caller.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub location: Location,
    /// Current UTC instant the window is anchored on.
    pub now: DateTime<Utc>,
    /// Day/night classification of the current frame (selects colors).
    pub period: DayPeriod,
}

/// What one render pass actually did.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub timeline_drawn: bool,
    pub elevation_drawn: bool,
    /// Side-channel key/value pairs for downstream modules; the host decides
    /// whether to publish them (see [`crate::exports::apply_to_env`]).
    pub exports: Vec<(String, String)>,
}

/// Render the 24-hour light timeline overlay onto `canvas`.
pub fn render_light_timeline<C: Canvas>(
    config: &GraphConfig,
    context: &RenderContext,
    canvas: &mut C,
    ephemeris: &dyn Ephemeris,
) -> Result<RenderOutcome> {
    validate_config(config)?;

    let strip = resolve_strip(config, canvas.width(), canvas.height())?;
    let chart = if config.draw_elev {
        match resolve_chart(config, canvas.width(), canvas.height()) {
            Ok(rect) => Some(rect),
            Err(err) => {
                log_pipe!();
                log_warning!("skipping elevation chart: {err}");
                None
            }
        }
    } else {
        None
    };

    let colors = ColorSet::resolve(config, context.period);
    let window = TimeWindow::from_now(context.now, config.now_point);

    if config.debug {
        log_block_start!(
            "Rendering light timeline for {:.4}, {:.4}",
            context.location.latitude,
            context.location.longitude
        );
        log_indented!("window {} .. {}", window.start, window.finish);
        log_indented!(
            "strip {}x{} at ({}, {})",
            strip.width,
            strip.height,
            strip.x,
            strip.y
        );
    }

    let raw = resolve_events(ephemeris, context.location, context.now, config.now_point)?;
    let band = match build_timeline(raw, window, strip.width) {
        Ok(timeline) => {
            let fills = interval_fills(ephemeris, context.location, &timeline, &colors)?;
            Some((timeline, fills))
        }
        Err(err) => {
            log_pipe!();
            log_warning!("skipping timeline strip: {err}");
            None
        }
    };

    let paths = match &chart {
        Some(rect) => {
            match sample_paths(
                ephemeris,
                context.location,
                window,
                rect.width,
                rect.height,
            )
            .context("sampling sun/moon elevation")
            {
                Ok(paths) => Some(paths),
                Err(err) => {
                    log_pipe!();
                    log_warning!("skipping elevation chart: {err:#}");
                    None
                }
            }
        }
        None => None,
    };

    let exports = compute_exports(ephemeris, context.location, context.now, window.start)?;

    let draw_all = |surface: &mut C| {
        if let Some((timeline, fills)) = &band {
            draw_strip(surface, config, &colors, window, timeline, fills, strip);
        }
        if let (Some(rect), Some(paths)) = (&chart, &paths) {
            draw_chart(surface, config, &colors, window, paths, *rect);
        }
    };

    if config.alpha < 1.0 {
        let mut overlay = canvas.scratch();
        draw_all(&mut overlay);
        canvas.blend_from(&overlay, config.alpha);
    } else {
        draw_all(canvas);
    }

    Ok(RenderOutcome {
        timeline_drawn: band.is_some(),
        elevation_drawn: chart.is_some() && paths.is_some(),
        exports,
    })
}

/// Classify every interval of the timeline and pick its fill color.
fn interval_fills(
    ephemeris: &dyn Ephemeris,
    location: Location,
    timeline: &Timeline,
    colors: &ColorSet,
) -> Result<Vec<Color>> {
    timeline
        .events
        .windows(2)
        .map(|pair| {
            classify_interval(ephemeris, location, pair[0].instant, pair[1].instant)
                .map(|phase| phase.fill(colors))
        })
        .collect()
}

/// Hour tick positions: 25 divisions anchored on the last full hour at or
/// before the window start. Yields (x offset in pixels, hour number).
fn hour_ticks(window: TimeWindow, width: u32) -> Vec<(f64, u32)> {
    let first_hour = window
        .start
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(window.start);
    let offset_secs = (first_hour - window.start).num_milliseconds() as f64 / 1_000.0;
    let offset_px = offset_secs / 86_400.0 * f64::from(width);
    let hour_delta = f64::from(width) / f64::from(HOUR_DIVISIONS);

    let mut ticks = Vec::with_capacity(HOUR_DIVISIONS as usize + 1);
    let mut hour = first_hour.hour();
    for i in 0..=HOUR_DIVISIONS {
        ticks.push((offset_px + f64::from(i) * hour_delta, hour));
        hour = (hour + 1) % 24;
    }
    ticks
}

fn now_marker_x(anchor: NowAnchor, rect: LayoutRect) -> i32 {
    match anchor {
        NowAnchor::Center => rect.x + rect.width as i32 / 2,
        NowAnchor::Left => rect.x,
    }
}

fn draw_strip<C: Canvas>(
    surface: &mut C,
    config: &GraphConfig,
    colors: &ColorSet,
    window: TimeWindow,
    timeline: &Timeline,
    fills: &[Color],
    rect: LayoutRect,
) {
    // Phase-colored bands
    for (pair, fill) in timeline.events.windows(2).zip(fills) {
        let band_width = (pair[1].pixel_x - pair[0].pixel_x).max(0) as u32;
        surface.fill_rect(
            rect.x + pair[0].pixel_x,
            rect.y,
            band_width,
            rect.height,
            *fill,
        );
    }

    // Meridian passage lines: noon in the dark color, midnight in the light
    if let Some(noon) = &timeline.noon {
        let x = rect.x + noon.pixel_x;
        surface.line(x, rect.y, x, rect.bottom(), 1, colors.dark);
    }
    if let Some(midnight) = &timeline.midnight {
        let x = rect.x + midnight.pixel_x;
        surface.line(x, rect.y, x, rect.bottom(), 1, colors.light);
    }

    surface.stroke_rect(rect.x, rect.y, rect.width, rect.height, 2, colors.border);

    if config.hour_ticks {
        for (offset, hour) in hour_ticks(window, rect.width) {
            let x = rect.x + offset.round() as i32;
            if x > rect.x && x < rect.right() {
                surface.line(x, rect.y, x, rect.y - 3, 1, colors.border);
                if config.hour_nums {
                    let label = format!("{hour:02}");
                    let text_x = x - surface.text_width(&label) as i32 / 2;
                    surface.text(text_x, rect.y - 5, &label, colors.border);
                }
            }
        }
    }

    // Now markers: a triangle pointing in from each horizontal edge
    let x = now_marker_x(config.now_point, rect);
    surface.fill_triangle(
        [(x, rect.y + 8), (x - 5, rect.y), (x + 5, rect.y)],
        colors.border,
    );
    surface.fill_triangle(
        [
            (x, rect.bottom() - 8),
            (x - 5, rect.bottom()),
            (x + 5, rect.bottom()),
        ],
        colors.border,
    );
}

fn draw_chart<C: Canvas>(
    surface: &mut C,
    config: &GraphConfig,
    colors: &ColorSet,
    window: TimeWindow,
    paths: &CelestialPaths,
    rect: LayoutRect,
) {
    surface.stroke_rect(rect.x, rect.y, rect.width, rect.height, 1, colors.elevation);

    let center_y = rect.y + rect.height as i32 / 2;
    surface.line(rect.x, center_y, rect.right(), center_y, 2, colors.elevation);

    // Reference altitudes: polar circle and tropic, mirrored about the horizon
    for reference in [POLAR_CIRCLE_LATITUDE, TROPIC_LATITUDE] {
        let offset = (reference * f64::from(rect.height) / 180.0) as i32;
        for y in [center_y - offset, center_y + offset] {
            surface.line(rect.x, y, rect.right(), y, 1, colors.elevation);
        }
    }

    // Hour grid across the full chart height
    for (offset, _) in hour_ticks(window, rect.width) {
        let x = rect.x + offset.round() as i32;
        if x > rect.x && x < rect.right() {
            surface.line(x, rect.y, x, rect.bottom(), 1, colors.elevation);
        }
    }

    // Vertical now marker
    let x = now_marker_x(config.now_point, rect);
    surface.line(x, rect.y, x, rect.bottom(), 2, colors.elevation);

    for (path, color) in [(&paths.sun, colors.sun), (&paths.moon, colors.moon)] {
        for pair in path.windows(2) {
            surface.line(
                rect.x + pair[0].x_offset.round() as i32,
                center_y - pair[0].height,
                rect.x + pair[1].x_offset.round() as i32,
                center_y - pair[1].height,
                1,
                color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hour_ticks_align_to_full_hours() {
        // Window starting at 13:40 puts the first full hour 40 minutes back
        let start = Utc.with_ymd_and_hms(2025, 6, 21, 13, 40, 0).unwrap();
        let window = TimeWindow::from_now(start, NowAnchor::Left);
        let ticks = hour_ticks(window, 800);
        assert_eq!(ticks.len(), 25);
        assert_eq!(ticks[0].1, 13);
        assert!(ticks[0].0 < 0.0);
        // Second tick is the first :00 boundary inside the window: 14:00,
        // 20 minutes in = 1/72 of the width past zero
        assert_eq!(ticks[1].1, 14);
        let expected = (20.0 / (24.0 * 60.0)) * 800.0;
        assert!((ticks[1].0 - expected).abs() < 1e-9);
    }

    #[test]
    fn hour_ticks_on_a_round_hour_start_at_zero() {
        let start = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        let window = TimeWindow::from_now(start, NowAnchor::Left);
        let ticks = hour_ticks(window, 720);
        assert_eq!(ticks[0], (0.0, 12));
        assert_eq!(ticks[24].1, 12);
        assert!((ticks[24].0 - 720.0).abs() < 1e-9);
    }

    #[test]
    fn now_marker_position_follows_the_anchor() {
        let rect = LayoutRect {
            x: 100,
            y: 10,
            width: 800,
            height: 25,
        };
        assert_eq!(now_marker_x(NowAnchor::Center, rect), 500);
        assert_eq!(now_marker_x(NowAnchor::Left, rect), 100);
    }
}
