// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Startup configuration.
//!
//! Every field has a default so a config file only needs to name what it
//! changes. Command-line flags are applied on top.

use crate::models::collage::{Canvas, DEFAULT_ASPECT_RATIO, DEFAULT_CANVAS_WIDTH};
use crate::models::frame::{FrameStyle, DEFAULT_FRAME_RADIUS};
use crate::models::layout::GridSpec;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollageConfig {
    /// Grid layout, e.g. `3x4` or `3-2b-3`.
    pub layout: String,
    pub canvas_width: f32,
    /// Canvas height / width.
    pub aspect_ratio: f32,
    /// Pixel width of exported images.
    pub export_width: u32,
    pub frame_radius: f32,
    pub background: [u8; 3],
    pub border_color: [u8; 3],
    /// Manhattan distance (canvas units) a swap drag must travel to start.
    pub drag_start_distance: f32,
    /// Export target used before any save dialog has been shown.
    pub output: Option<PathBuf>,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            layout: GridSpec::default().to_string(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            export_width: DEFAULT_CANVAS_WIDTH as u32,
            frame_radius: DEFAULT_FRAME_RADIUS,
            background: [232, 232, 232],
            border_color: [255, 255, 255],
            drag_start_distance: 10.0,
            output: None,
        }
    }
}

impl CollageConfig {
    /// Check ranges and parse the layout.
    pub fn grid_spec(&self) -> Result<GridSpec> {
        if !is_positive(self.canvas_width) || !is_positive(self.aspect_ratio) {
            bail!(
                "Canvas size must be positive (width {}, aspect ratio {})",
                self.canvas_width,
                self.aspect_ratio
            );
        }
        if self.export_width == 0 {
            bail!("Export width must be positive");
        }
        if !(self.frame_radius >= 0.0 && self.frame_radius.is_finite()) {
            bail!("Frame radius must be a non-negative number, got {}", self.frame_radius);
        }
        if !(self.drag_start_distance >= 0.0 && self.drag_start_distance.is_finite()) {
            bail!(
                "Drag start distance must be a non-negative number, got {}",
                self.drag_start_distance
            );
        }
        self.layout.parse()
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::with_aspect(self.canvas_width, self.aspect_ratio)
    }

    pub fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            radius: self.frame_radius,
            border_color: self.border_color,
            background: self.background,
        }
    }
}

/// False for zero, negatives, NaN and infinities.
fn is_positive(v: f32) -> bool {
    v > 0.0 && v.is_finite()
}
