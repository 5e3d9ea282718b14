// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frames (collage tiles) and their shared border style.

use super::photo::PhotoId;
use crate::util::geometry::Rect;

/// Border radius new collages start with.
pub const DEFAULT_FRAME_RADIUS: f32 = 15.0;

/// Stable identifier of a frame; also its index in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

/// A fixed tile of the canvas owning at most one photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: FrameId,
    /// Position and size on the canvas. Never changes after construction.
    pub rect: Rect,
    pub photo: Option<PhotoId>,
}

impl Frame {
    pub fn new(id: FrameId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            photo: None,
        }
    }
}

/// Border style shared by every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    /// Corner radius; also used as the border stroke width.
    pub radius: f32,
    pub border_color: [u8; 3],
    /// Canvas fill behind the photos.
    pub background: [u8; 3],
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            radius: DEFAULT_FRAME_RADIUS,
            border_color: [255, 255, 255],
            background: [232, 232, 232],
        }
    }
}

impl FrameStyle {
    pub fn grow(&mut self) {
        self.radius += 1.0;
    }

    /// Shrink the border, never below zero.
    pub fn shrink(&mut self) {
        self.radius = (self.radius - 1.0).max(0.0);
    }

    /// Stroke width of the border; a zero radius still draws a hairline.
    pub fn stroke_width(&self) -> f32 {
        self.radius.max(1.0)
    }
}
