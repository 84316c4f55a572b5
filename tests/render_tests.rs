//! Full render passes onto an in-memory canvas, checked pixel by pixel.

use chrono::{TimeZone, Utc};
use lightgraph::color::Color;
use lightgraph::config::{DayPeriod, GraphConfig, NowAnchor};
use lightgraph::ephemeris::{AnalyticEphemeris, Location};
use lightgraph::logger::Log;
use lightgraph::{PixelCanvas, RenderContext, render_light_timeline};

const BASE: Color = Color([100, 100, 100]);
const NIGHT_BORDER: Color = Color([30, 190, 40]);

fn midsummer_context(latitude: f64, period: DayPeriod) -> RenderContext {
    RenderContext {
        location: Location::new(latitude, 0.0).unwrap(),
        now: Utc.with_ymd_and_hms(2025, 6, 21, 13, 0, 0).unwrap(),
        period,
    }
}

/// A strip at a known position with the chart disabled.
fn strip_only_config() -> GraphConfig {
    let mut config = GraphConfig::default();
    config.horiz_center = false;
    config.horiz_pos = 50;
    config.vert_pos = 500;
    config.width = 400;
    config.height = 25;
    config.draw_elev = false;
    config
}

#[test]
fn full_opacity_draws_the_border_and_leaves_the_rest() {
    Log::set_enabled(false);
    let config = strip_only_config();
    let context = midsummer_context(45.0, DayPeriod::Night);
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);

    let outcome =
        render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();

    assert!(outcome.timeline_drawn);
    assert!(!outcome.elevation_drawn);
    assert_eq!(outcome.exports.len(), 8);

    // Strip border corner takes the night border color exactly
    assert_eq!(canvas.pixel(50, 500), Some(NIGHT_BORDER));
    // Far away from the strip nothing changes
    assert_eq!(canvas.pixel(10, 10), Some(BASE));
    assert_eq!(canvas.pixel(1900, 1000), Some(BASE));
}

#[test]
fn half_opacity_blends_overlay_and_original() {
    Log::set_enabled(false);
    let mut config = strip_only_config();
    config.alpha = 0.5;
    let context = midsummer_context(45.0, DayPeriod::Night);
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);

    render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();

    // round(0.5 * border + 0.5 * base) per channel
    assert_eq!(canvas.pixel(50, 500), Some(Color([65, 145, 70])));
    // Blending identical pixels is the identity
    assert_eq!(canvas.pixel(10, 10), Some(BASE));
}

#[test]
fn elevation_chart_draws_inside_its_own_rectangle() {
    Log::set_enabled(false);
    let mut config = strip_only_config();
    config.draw_elev = true; // default geometry: 300x100 at (750, 10)
    let context = midsummer_context(45.0, DayPeriod::Night);
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);

    let outcome =
        render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();

    assert!(outcome.elevation_drawn);
    // Chart border corner takes the elevation color
    assert_eq!(canvas.pixel(750, 10), Some(NIGHT_BORDER));
    // Between the strip and the chart nothing changes
    assert_eq!(canvas.pixel(600, 600), Some(BASE));
}

#[test]
fn polar_day_fills_the_whole_strip_with_daylight() {
    Log::set_enabled(false);
    let config = strip_only_config();
    let context = midsummer_context(80.0, DayPeriod::Day);
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);

    let outcome =
        render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();
    assert!(outcome.timeline_drawn);

    // Interior pixel away from the border, markers, and meridian lines.
    // The single Start..Finish interval classifies as Day.
    assert_eq!(canvas.pixel(100, 512), Some(Color([240, 240, 240])));
    // Day period picks the day border variant
    assert_eq!(canvas.pixel(50, 500), Some(Color([15, 110, 20])));
}

#[test]
fn hour_ticks_follow_their_toggle() {
    Log::set_enabled(false);
    let context = midsummer_context(45.0, DayPeriod::Night);

    let tick_row = 498; // between the strip top (500) and the labels
    let count_border_pixels = |canvas: &PixelCanvas| {
        (51..450)
            .filter(|&x| canvas.pixel(x, tick_row) == Some(NIGHT_BORDER))
            .count()
    };

    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);
    let config = strip_only_config();
    render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();
    assert!(count_border_pixels(&canvas) > 0);

    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);
    let mut config = strip_only_config();
    config.hour_ticks = false;
    render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();
    assert_eq!(count_border_pixels(&canvas), 0);
}

#[test]
fn left_anchor_puts_the_now_marker_on_the_strip_edge() {
    Log::set_enabled(false);
    let context = midsummer_context(45.0, DayPeriod::Night);

    // (52, 503) sits inside the top now-triangle when it points down from
    // the strip's left edge at (50, 500).
    let sample = (52, 503);

    let mut config = strip_only_config();
    config.now_point = NowAnchor::Left;
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);
    render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();
    assert_eq!(canvas.pixel(sample.0, sample.1), Some(NIGHT_BORDER));

    // Centered, the marker moves to the middle and the same pixel shows the
    // first interval's fill instead: night, since the window starts at
    // 01:00 local solar time.
    let config = strip_only_config();
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);
    render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).unwrap();
    assert_eq!(canvas.pixel(sample.0, sample.1), Some(Color([10, 10, 10])));
}

#[test]
fn invalid_alpha_is_rejected_before_any_drawing() {
    Log::set_enabled(false);
    let mut config = strip_only_config();
    config.alpha = 1.5;
    let context = midsummer_context(45.0, DayPeriod::Night);
    let mut canvas = PixelCanvas::filled(1920, 1080, BASE);

    assert!(render_light_timeline(&config, &context, &mut canvas, &AnalyticEphemeris).is_err());
    assert_eq!(canvas.pixel(50, 500), Some(BASE));
}
