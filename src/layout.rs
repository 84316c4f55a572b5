//! Pixel geometry resolution against the host image bounds.
//!
//! The configured strip and chart rectangles are clamped independently so an
//! oversized or off-canvas configuration degrades to something visible
//! instead of corrupting memory or silently drawing nothing. Degenerate
//! results are rejected up front.

use anyhow::Result;

use crate::config::GraphConfig;
use crate::constants::{
    CHART_FALLBACK_DIVISOR, MIN_IMAGE_DIMENSION, STRIP_MAX_HEIGHT_DIVISOR, STRIP_MIN_Y,
};

/// A resolved, bounds-respecting rectangle on the host image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl LayoutRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Reject host images too small to overlay at all.
pub fn check_image_bounds(image_width: u32, image_height: u32) -> Result<()> {
    if image_width < MIN_IMAGE_DIMENSION || image_height < MIN_IMAGE_DIMENSION {
        anyhow::bail!(
            "host image {}x{} is too small to overlay (minimum {} per axis)",
            image_width,
            image_height,
            MIN_IMAGE_DIMENSION
        );
    }
    Ok(())
}

/// Resolve the timeline strip rectangle.
///
/// Rules, in order: clamp width to the image (resetting x), center or shift x
/// to fit, clamp height to a fifth of the image, shift y up to fit, then keep
/// y at least 10 px down so hour labels have room above the strip.
pub fn resolve_strip(
    config: &GraphConfig,
    image_width: u32,
    image_height: u32,
) -> Result<LayoutRect> {
    check_image_bounds(image_width, image_height)?;

    let mut width = config.width;
    let mut height = config.height;
    let mut x = config.horiz_pos;
    let mut y = config.vert_pos;

    if width > image_width {
        width = image_width;
        x = 0;
        if config.debug {
            log_debug!("strip width truncated to {width}");
        }
    }

    if config.horiz_center {
        x = ((image_width - width) / 2) as i32;
    } else if i64::from(x) + i64::from(width) > i64::from(image_width) {
        x = image_width as i32 - width as i32;
        if config.debug {
            log_debug!("strip x adjusted to {x}");
        }
    }

    if height > image_height / STRIP_MAX_HEIGHT_DIVISOR {
        height = image_height / STRIP_MAX_HEIGHT_DIVISOR;
    }
    if i64::from(y) + i64::from(height) > i64::from(image_height) {
        y = image_height as i32 - height as i32;
        if config.debug {
            log_debug!("strip y adjusted to {y}");
        }
    }
    if y < STRIP_MIN_Y {
        y = STRIP_MIN_Y;
        if config.debug {
            log_debug!("strip y floored at {STRIP_MIN_Y}");
        }
    }

    let rect = LayoutRect {
        x,
        y,
        width,
        height,
    };
    if rect.width == 0 || rect.height == 0 {
        anyhow::bail!(
            "timeline strip degenerates to {}x{} on a {}x{} image",
            rect.width,
            rect.height,
            image_width,
            image_height
        );
    }
    Ok(rect)
}

/// Resolve the elevation chart rectangle.
///
/// Simpler fallback clamps than the strip: an oversized dimension collapses
/// to a quarter of the image, then the position shifts to fit.
pub fn resolve_chart(
    config: &GraphConfig,
    image_width: u32,
    image_height: u32,
) -> Result<LayoutRect> {
    check_image_bounds(image_width, image_height)?;

    let mut width = config.elev_width;
    let mut height = config.elev_height;
    let mut x = config.elev_horiz_pos;
    let mut y = config.elev_vert_pos;

    if width > image_width {
        width = image_width / CHART_FALLBACK_DIVISOR;
        if config.debug {
            log_debug!("chart width truncated to {width}");
        }
    }
    if height > image_height {
        height = image_height / CHART_FALLBACK_DIVISOR;
        if config.debug {
            log_debug!("chart height truncated to {height}");
        }
    }
    if i64::from(x) + i64::from(width) > i64::from(image_width) {
        x = image_width as i32 - width as i32;
    }
    if i64::from(y) + i64::from(height) > i64::from(image_height) {
        y = image_height as i32 - height as i32;
    }

    let rect = LayoutRect {
        x,
        y,
        width,
        height,
    };
    if rect.width == 0 || rect.height == 0 {
        anyhow::bail!(
            "elevation chart degenerates to {}x{} on a {}x{} image",
            rect.width,
            rect.height,
            image_width,
            image_height
        );
    }
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GraphConfig {
        let mut c = GraphConfig::default();
        c.horiz_center = false;
        c
    }

    #[test]
    fn strip_fits_when_configuration_fits() {
        let mut c = config();
        c.width = 400;
        c.height = 20;
        c.horiz_pos = 50;
        c.vert_pos = 500;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(
            rect,
            LayoutRect {
                x: 50,
                y: 500,
                width: 400,
                height: 20
            }
        );
    }

    #[test]
    fn oversized_strip_width_clamps_and_resets_x() {
        let mut c = config();
        c.width = 3000;
        c.horiz_pos = 100;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.width, 1920);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn centering_recomputes_x_after_clamping() {
        let mut c = config();
        c.width = 800;
        c.horiz_center = true;
        c.horiz_pos = 999;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.x, 560);
    }

    #[test]
    fn off_canvas_strip_shifts_left_to_fit() {
        let mut c = config();
        c.width = 800;
        c.horiz_pos = 1500;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.x, 1120);
        assert_eq!(rect.right(), 1920);
    }

    #[test]
    fn strip_height_capped_at_a_fifth_of_the_image() {
        let mut c = config();
        c.height = 500;
        c.vert_pos = 100;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.height, 216);
    }

    #[test]
    fn strip_y_shifts_up_then_floors_at_minimum() {
        let mut c = config();
        c.height = 25;
        c.vert_pos = 2000;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.bottom(), 1080);

        c.vert_pos = 0;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.y, 10);
    }

    #[test]
    fn chart_falls_back_to_quarter_image_when_oversized() {
        let mut c = config();
        c.elev_width = 5000;
        c.elev_height = 5000;
        let rect = resolve_chart(&c, 1920, 1080).unwrap();
        assert_eq!(rect.width, 480);
        assert_eq!(rect.height, 270);
        assert!(rect.right() <= 1920);
        assert!(rect.bottom() <= 1080);
    }

    #[test]
    fn chart_shifts_to_fit_when_positioned_off_canvas() {
        let mut c = config();
        c.elev_horiz_pos = 1900;
        c.elev_vert_pos = 1070;
        let rect = resolve_chart(&c, 1920, 1080).unwrap();
        assert_eq!(rect.right(), 1920);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn extreme_positions_shift_back_without_overflowing() {
        let mut c = config();
        c.width = 400;
        c.height = 20;
        c.horiz_pos = i32::MAX - 100;
        c.vert_pos = i32::MAX - 100;
        let rect = resolve_strip(&c, 1920, 1080).unwrap();
        assert_eq!(rect.right(), 1920);
        assert_eq!(rect.bottom(), 1080);

        c.elev_horiz_pos = i32::MAX;
        c.elev_vert_pos = i32::MAX;
        let rect = resolve_chart(&c, 1920, 1080).unwrap();
        assert_eq!(rect.right(), 1920);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn tiny_host_image_is_rejected() {
        let c = config();
        assert!(resolve_strip(&c, 10, 10).is_err());
        assert!(resolve_chart(&c, 1920, 5).is_err());
    }
}
