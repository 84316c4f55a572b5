//! Configuration for the light timeline overlay.
//!
//! The overlay is configured through a flat TOML record. Every key has a
//! default, so an empty file (or no file at all) yields the stock overlay:
//! an 800×25 centered strip with hour ticks and numbers, the elevation chart
//! enabled in the top-right corner, and full opacity.
//!
//! ```toml
//! # Timeline strip
//! width = 800              # Strip width in px
//! height = 25              # Strip height in px
//! horiz_pos = 10           # Left border position, ignored when centered
//! vert_pos = 940           # Top border position
//! horiz_center = true      # Center the strip horizontally
//! hour_ticks = true        # Draw hour tickmarks
//! hour_nums = true         # Draw zero-padded hour numbers
//! now_point = "Center"     # "Center" or "Left": where "now" sits in the window
//! alpha = 1.0              # Overlay opacity, 0.0 - 1.0
//!
//! # Colors, 3-channel tuples in the host canvas channel order
//! night_border_color = [30, 190, 40]
//! day_border_color = [15, 110, 20]
//! night_light_color = [240, 240, 240]
//! night_dark_color = [10, 10, 10]
//!
//! # Elevation chart
//! draw_elev = true
//! elev_width = 300
//! elev_height = 100
//! elev_horiz_pos = 750
//! elev_vert_pos = 10
//!
//! debug = false            # Diagnostic logging only, no geometry effect
//! ```
//!
//! Day and night variants exist for every color; the host's day/night flag
//! picks one set per invocation. Validation rejects out-of-range opacity and
//! degenerate geometry before any pixel is touched.

pub mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::*;

pub use validation::validate_config;

/// Where "now" is anchored inside the rendered 24-hour window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum NowAnchor {
    /// Window spans [now − 12 h, now + 12 h], marker at the strip center.
    #[serde(alias = "center")]
    Center,
    /// Window spans [now, now + 24 h], marker at the strip's left edge.
    #[serde(alias = "left")]
    Left,
}

/// The host's day/night classification for the current frame.
///
/// Selects which color variants apply; it has no effect on the timeline
/// computation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Day,
    Night,
}

impl std::str::FromStr for DayPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DAY" => Ok(DayPeriod::Day),
            "NIGHT" => Ok(DayPeriod::Night),
            other => anyhow::bail!("unknown day/night flag: {other:?} (expected DAY or NIGHT)"),
        }
    }
}

/// Parsed overlay configuration.
///
/// Arrives fully parsed at the render entry point; the library never reads
/// files or environment variables on its own.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    // Timeline strip colors
    #[serde(default = "default_night_border_color")]
    pub night_border_color: [u8; 3],
    #[serde(default = "default_day_border_color")]
    pub day_border_color: [u8; 3],
    #[serde(default = "default_light_color")]
    pub night_light_color: [u8; 3],
    #[serde(default = "default_light_color")]
    pub day_light_color: [u8; 3],
    #[serde(default = "default_dark_color")]
    pub night_dark_color: [u8; 3],
    #[serde(default = "default_dark_color")]
    pub day_dark_color: [u8; 3],

    // Timeline strip geometry
    #[serde(default = "default_graph_width")]
    pub width: u32,
    #[serde(default = "default_graph_height")]
    pub height: u32,
    #[serde(default = "default_graph_x")]
    pub horiz_pos: i32,
    #[serde(default = "default_graph_y")]
    pub vert_pos: i32,
    #[serde(default = "default_true")]
    pub horiz_center: bool,

    // Decorations
    #[serde(default = "default_true")]
    pub hour_ticks: bool,
    #[serde(default = "default_true")]
    pub hour_nums: bool,
    #[serde(default = "default_now_anchor")]
    pub now_point: NowAnchor,
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    // Elevation chart
    #[serde(default = "default_true")]
    pub draw_elev: bool,
    #[serde(default = "default_elev_night_color")]
    pub elev_night_color: [u8; 3],
    #[serde(default = "default_elev_day_color")]
    pub elev_day_color: [u8; 3],
    #[serde(default = "default_sun_night_color")]
    pub sun_night_color: [u8; 3],
    #[serde(default = "default_sun_day_color")]
    pub sun_day_color: [u8; 3],
    #[serde(default = "default_moon_night_color")]
    pub moon_night_color: [u8; 3],
    #[serde(default = "default_moon_day_color")]
    pub moon_day_color: [u8; 3],
    #[serde(default = "default_elev_width")]
    pub elev_width: u32,
    #[serde(default = "default_elev_height")]
    pub elev_height: u32,
    #[serde(default = "default_elev_x")]
    pub elev_horiz_pos: i32,
    #[serde(default = "default_elev_y")]
    pub elev_vert_pos: i32,

    #[serde(default)]
    pub debug: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            night_border_color: default_night_border_color(),
            day_border_color: default_day_border_color(),
            night_light_color: default_light_color(),
            day_light_color: default_light_color(),
            night_dark_color: default_dark_color(),
            day_dark_color: default_dark_color(),
            width: default_graph_width(),
            height: default_graph_height(),
            horiz_pos: default_graph_x(),
            vert_pos: default_graph_y(),
            horiz_center: default_true(),
            hour_ticks: default_true(),
            hour_nums: default_true(),
            now_point: default_now_anchor(),
            alpha: default_alpha(),
            draw_elev: default_true(),
            elev_night_color: default_elev_night_color(),
            elev_day_color: default_elev_day_color(),
            sun_night_color: default_sun_night_color(),
            sun_day_color: default_sun_day_color(),
            moon_night_color: default_moon_night_color(),
            moon_day_color: default_moon_day_color(),
            elev_width: default_elev_width(),
            elev_height: default_elev_height(),
            elev_horiz_pos: default_elev_x(),
            elev_vert_pos: default_elev_y(),
            debug: false,
        }
    }
}

impl GraphConfig {
    /// Load and validate a configuration file.
    pub fn load_from_path(path: &Path) -> Result<GraphConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: GraphConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load from an optional path, falling back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<GraphConfig> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Ok(GraphConfig::default()),
        }
    }
}

fn default_night_border_color() -> [u8; 3] {
    DEFAULT_NIGHT_BORDER_COLOR
}
fn default_day_border_color() -> [u8; 3] {
    DEFAULT_DAY_BORDER_COLOR
}
fn default_light_color() -> [u8; 3] {
    DEFAULT_LIGHT_COLOR
}
fn default_dark_color() -> [u8; 3] {
    DEFAULT_DARK_COLOR
}
fn default_elev_night_color() -> [u8; 3] {
    DEFAULT_ELEV_NIGHT_COLOR
}
fn default_elev_day_color() -> [u8; 3] {
    DEFAULT_ELEV_DAY_COLOR
}
fn default_sun_night_color() -> [u8; 3] {
    DEFAULT_SUN_NIGHT_COLOR
}
fn default_sun_day_color() -> [u8; 3] {
    DEFAULT_SUN_DAY_COLOR
}
fn default_moon_night_color() -> [u8; 3] {
    DEFAULT_MOON_NIGHT_COLOR
}
fn default_moon_day_color() -> [u8; 3] {
    DEFAULT_MOON_DAY_COLOR
}
fn default_graph_width() -> u32 {
    DEFAULT_GRAPH_WIDTH
}
fn default_graph_height() -> u32 {
    DEFAULT_GRAPH_HEIGHT
}
fn default_graph_x() -> i32 {
    DEFAULT_GRAPH_X
}
fn default_graph_y() -> i32 {
    DEFAULT_GRAPH_Y
}
fn default_elev_width() -> u32 {
    DEFAULT_ELEV_WIDTH
}
fn default_elev_height() -> u32 {
    DEFAULT_ELEV_HEIGHT
}
fn default_elev_x() -> i32 {
    DEFAULT_ELEV_X
}
fn default_elev_y() -> i32 {
    DEFAULT_ELEV_Y
}
fn default_true() -> bool {
    true
}
fn default_now_anchor() -> NowAnchor {
    NowAnchor::Center
}
fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}
