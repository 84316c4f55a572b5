//! Configuration validation.
//!
//! Rejects configurations that would produce degenerate geometry or invalid
//! blending before any drawing happens, so a bad record can never leave a
//! half-painted canvas behind.

use anyhow::Result;

use super::GraphConfig;
use crate::constants::{MAXIMUM_ALPHA, MINIMUM_ALPHA};

/// Validate an overlay configuration.
pub fn validate_config(config: &GraphConfig) -> Result<()> {
    if !(MINIMUM_ALPHA..=MAXIMUM_ALPHA).contains(&config.alpha) {
        anyhow::bail!(
            "alpha ({}) must be between {} and {}",
            config.alpha,
            MINIMUM_ALPHA,
            MAXIMUM_ALPHA
        );
    }

    if config.width == 0 || config.height == 0 {
        anyhow::bail!(
            "timeline strip dimensions must be positive (got {}x{})",
            config.width,
            config.height
        );
    }

    if config.horiz_pos < 0 || config.vert_pos < 0 {
        anyhow::bail!(
            "timeline strip position must be non-negative (got {}, {})",
            config.horiz_pos,
            config.vert_pos
        );
    }

    if config.draw_elev {
        if config.elev_width == 0 || config.elev_height == 0 {
            anyhow::bail!(
                "elevation chart dimensions must be positive (got {}x{})",
                config.elev_width,
                config.elev_height
            );
        }
        if config.elev_horiz_pos < 0 || config.elev_vert_pos < 0 {
            anyhow::bail!(
                "elevation chart position must be non-negative (got {}, {})",
                config.elev_horiz_pos,
                config.elev_vert_pos
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GraphConfig::default()).is_ok());
    }

    #[test]
    fn alpha_out_of_range_rejected() {
        let mut config = GraphConfig::default();
        config.alpha = 1.5;
        assert!(validate_config(&config).is_err());
        config.alpha = -0.1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_strip_height_rejected() {
        let mut config = GraphConfig::default();
        config.height = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_chart_width_rejected_only_when_chart_enabled() {
        let mut config = GraphConfig::default();
        config.elev_width = 0;
        assert!(validate_config(&config).is_err());
        config.draw_elev = false;
        assert!(validate_config(&config).is_ok());
    }
}
