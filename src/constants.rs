//! Application constants and default values for lightgraph.
//!
//! This module contains the astronomical thresholds, configuration defaults,
//! and validation limits used throughout the overlay pipeline.

// ═══ Astronomical Thresholds ═══
// Sun altitude bands delimiting the twilight phases (degrees)

pub const HORIZON_ASTRONOMICAL: f64 = -18.0;
pub const HORIZON_NAUTICAL: f64 = -12.0;
pub const HORIZON_CIVIL: f64 = -6.0;
pub const HORIZON_VISIBLE: f64 = 0.0;

/// Reference latitudes drawn on the elevation chart (degrees).
pub const TROPIC_LATITUDE: f64 = 23.5;
pub const POLAR_CIRCLE_LATITUDE: f64 = 66.5;

// ═══ Color Blending ═══
// Fractions toward the light color for the three twilight transition fills

pub const BLEND_DAY_TO_CIVIL: f64 = 0.75;
pub const BLEND_CIVIL_TO_NAUTICAL: f64 = 0.50;
pub const BLEND_NAUTICAL_TO_ASTRO: f64 = 0.25;

// ═══ Configuration Defaults ═══
// Used when config options are not specified by the user; values match the
// defaults the overlay has always shipped with

pub const DEFAULT_GRAPH_WIDTH: u32 = 800;
pub const DEFAULT_GRAPH_HEIGHT: u32 = 25;
pub const DEFAULT_GRAPH_X: i32 = 10;
pub const DEFAULT_GRAPH_Y: i32 = 940;
pub const DEFAULT_ALPHA: f64 = 1.0;

pub const DEFAULT_ELEV_WIDTH: u32 = 300;
pub const DEFAULT_ELEV_HEIGHT: u32 = 100;
pub const DEFAULT_ELEV_X: i32 = 750;
pub const DEFAULT_ELEV_Y: i32 = 10;

pub const DEFAULT_NIGHT_BORDER_COLOR: [u8; 3] = [30, 190, 40];
pub const DEFAULT_DAY_BORDER_COLOR: [u8; 3] = [15, 110, 20];
pub const DEFAULT_LIGHT_COLOR: [u8; 3] = [240, 240, 240];
pub const DEFAULT_DARK_COLOR: [u8; 3] = [10, 10, 10];
pub const DEFAULT_ELEV_NIGHT_COLOR: [u8; 3] = [30, 190, 40];
pub const DEFAULT_ELEV_DAY_COLOR: [u8; 3] = [15, 110, 20];
pub const DEFAULT_SUN_NIGHT_COLOR: [u8; 3] = [85, 205, 235];
pub const DEFAULT_SUN_DAY_COLOR: [u8; 3] = [8, 11, 137];
pub const DEFAULT_MOON_NIGHT_COLOR: [u8; 3] = [230, 200, 95];
pub const DEFAULT_MOON_DAY_COLOR: [u8; 3] = [85, 70, 15];

// ═══ Layout Rules ═══

/// The strip never grows taller than this fraction of the host image height.
pub const STRIP_MAX_HEIGHT_DIVISOR: u32 = 5;

/// Minimum top offset for the strip, leaves room for hour labels.
pub const STRIP_MIN_Y: i32 = 10;

/// Oversized elevation chart dimensions fall back to this fraction of the image.
pub const CHART_FALLBACK_DIVISOR: u32 = 4;

/// Smallest host image the overlay will draw on, per axis (pixels).
pub const MIN_IMAGE_DIMENSION: u32 = 20;

// ═══ Sampling ═══

/// Approximate horizontal pixel spacing between elevation samples.
pub const ELEVATION_SAMPLE_SPACING_PX: u32 = 3;

/// Number of hour divisions across the rendered window.
pub const HOUR_DIVISIONS: u32 = 24;

// ═══ Validation Limits ═══

pub const MINIMUM_ALPHA: f64 = 0.0;
pub const MAXIMUM_ALPHA: f64 = 1.0;
