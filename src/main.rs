//! Binary entry point and high-level flow coordination.
//!
//! This module stays thin: it parses arguments, loads the configuration,
//! reads or creates the host image, and hands everything to the library's
//! [`render_light_timeline`] entry point. Image I/O is deliberately minimal,
//! binary PPM (P6) in and out, since the overlay itself is pixel-format
//! agnostic behind the [`Canvas`] trait.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use lightgraph::args::{self, CliAction, ParsedArgs, RunOptions};
use lightgraph::config::{DayPeriod, GraphConfig};
use lightgraph::ephemeris::{AnalyticEphemeris, Body, Ephemeris, Location};
use lightgraph::exports::apply_to_env;
use lightgraph::{
    Canvas, PixelCanvas, RenderContext, log_block_start, log_decorated, log_end, log_version,
    render_light_timeline,
};

/// Canvas size used when no input image is given.
const DEFAULT_CANVAS_WIDTH: u32 = 1920;
const DEFAULT_CANVAS_HEIGHT: u32 = 1080;

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp | CliAction::ShowHelpDueToError => {
            args::display_help();
            Ok(())
        }
        CliAction::Run(options) => run(*options),
    }
}

fn run(options: RunOptions) -> Result<()> {
    log_version!();

    let mut config =
        GraphConfig::load_or_default(options.config_path.as_deref().map(Path::new))?;
    if options.debug_enabled {
        config.debug = true;
    }

    let location = Location::new(options.latitude, options.longitude)?;
    let now = match &options.time {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid --time value: {text}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let ephemeris = AnalyticEphemeris;
    let period = resolve_period(&options, &ephemeris, location, now)?;

    let mut canvas = match &options.image_path {
        Some(path) => read_ppm(Path::new(path))?,
        None => PixelCanvas::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
    };

    log_block_start!(
        "Rendering onto {}x{} canvas",
        canvas.width(),
        canvas.height()
    );

    let context = RenderContext {
        location,
        now,
        period,
    };
    let outcome = render_light_timeline(&config, &context, &mut canvas, &ephemeris)?;

    write_ppm(Path::new(&options.output_path), &canvas)?;
    log_decorated!("Wrote {}", options.output_path);

    if let Some(path) = &options.exports_path {
        let object: serde_json::Map<String, serde_json::Value> = outcome
            .exports
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
            .collect();
        fs::write(path, serde_json::to_string_pretty(&object)?)
            .with_context(|| format!("failed to write exports to {path}"))?;
        log_decorated!("Wrote {path}");
    }
    if options.apply_env {
        apply_to_env(&outcome.exports);
    }

    log_end!();
    Ok(())
}

/// Decide which color set applies to this frame.
///
/// Precedence: the --period flag, then the host's DAY_OR_NIGHT environment
/// variable, then the sun's current altitude.
fn resolve_period(
    options: &RunOptions,
    ephemeris: &dyn Ephemeris,
    location: Location,
    now: DateTime<Utc>,
) -> Result<DayPeriod> {
    if let Some(text) = &options.period {
        return text.parse();
    }
    if let Ok(text) = std::env::var("DAY_OR_NIGHT") {
        return text.parse();
    }
    let sun = ephemeris.position(location, now, Body::Sun)?;
    Ok(if sun.altitude_deg >= 0.0 {
        DayPeriod::Day
    } else {
        DayPeriod::Night
    })
}

/// Read a binary PPM (P6) with 8-bit channels.
fn read_ppm(path: &Path) -> Result<PixelCanvas> {
    let raw =
        fs::read(path).with_context(|| format!("failed to read image {}", path.display()))?;

    // Header: magic, width, height, maxval, separated by whitespace with
    // optional '#' comment lines.
    let mut fields: Vec<String> = Vec::with_capacity(4);
    let mut pos = 0;
    while fields.len() < 4 {
        while pos < raw.len() && raw[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < raw.len() && raw[pos] == b'#' {
            while pos < raw.len() && raw[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }
        let start = pos;
        while pos < raw.len() && !raw[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if start == pos {
            anyhow::bail!("truncated PPM header in {}", path.display());
        }
        fields.push(std::str::from_utf8(&raw[start..pos])?.to_string());
    }

    if fields[0] != "P6" {
        anyhow::bail!("{} is not a binary PPM (P6)", path.display());
    }
    let width: u32 = fields[1].parse().context("bad PPM width")?;
    let height: u32 = fields[2].parse().context("bad PPM height")?;
    let maxval: u32 = fields[3].parse().context("bad PPM max value")?;
    if maxval != 255 {
        anyhow::bail!("unsupported PPM max value {maxval} (only 255)");
    }

    // Exactly one whitespace byte separates the header from the pixel data
    pos += 1;
    let expected = (width * height * 3) as usize;
    let data = raw
        .get(pos..pos + expected)
        .with_context(|| format!("{} has truncated pixel data", path.display()))?
        .to_vec();
    PixelCanvas::from_raw(width, height, data)
}

/// Write the canvas as a binary PPM (P6).
fn write_ppm(path: &Path, canvas: &PixelCanvas) -> Result<()> {
    let mut out = Vec::with_capacity(canvas.bytes().len() + 32);
    out.extend_from_slice(
        format!("P6\n{} {}\n255\n", canvas.width(), canvas.height()).as_bytes(),
    );
    out.extend_from_slice(canvas.bytes());
    fs::write(path, out).with_context(|| format!("failed to write image {}", path.display()))
}
