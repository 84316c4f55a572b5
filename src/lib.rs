//! # Lightgraph Library
//!
//! Internal library for the lightgraph overlay binary.
//!
//! This library exists to enable testing of the timeline internals and provide
//! clean separation between CLI dispatch (main.rs) and rendering logic.
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Entry Point**: [`render::render_light_timeline`] renders one overlay pass
//!   onto any [`canvas::Canvas`]
//! - **Timeline**: `timeline` module enumerates twilight events, clips them to
//!   the 24-hour window, and classifies the phases between them
//! - **Ephemeris**: `ephemeris` module defines the astronomical gateway trait
//!   and the built-in analytic implementation
//! - **Geometry**: `layout` clamps the configured rectangles to the host image
//! - **Elevation**: `elevation` samples sun/moon altitude curves for the chart
//! - **Configuration**: `config` module for TOML-based settings with validation
//! - **Infrastructure**: logging, colors, constants, and side-channel exports

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod canvas;
pub mod color;
pub mod config;
pub mod constants;
pub mod elevation;
pub mod ephemeris;
pub mod exports;
pub mod layout;
pub mod render;
pub mod timeline;

// Re-exports for the binary and integration tests
pub use canvas::{Canvas, PixelCanvas};
pub use config::GraphConfig;
pub use ephemeris::{AnalyticEphemeris, Ephemeris, Location};
pub use render::{RenderContext, RenderOutcome, render_light_timeline};
