// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo pixel source and interactive transform.
//!
//! A photo is drawn inside its frame at `offset` (relative to the frame's
//! top-left), scaled and rotated around the center of its pixel source.

use crate::util::geometry::{Point, Rect};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;

/// Rotation applied per wheel step, in degrees.
pub const ROTATION_STEP: f32 = 5.0;
/// Coarse scale step per wheel step.
pub const SCALE_STEP: f32 = 0.05;
/// Fine scale step used close to zero.
pub const FINE_SCALE_STEP: f32 = 0.01;
/// Upper bound for the scale factor.
pub const MAX_ZOOM: f32 = 2.0;
/// Smallest scale a zoom-out step can produce.
pub const MIN_SCALE: f32 = FINE_SCALE_STEP;

/// Stable identifier of a photo in the collage arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Which candidate values a zoom gesture commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomMode {
    Scale,
    Rotate,
    ScaleAndRotate,
}

impl ZoomMode {
    /// No modifier zooms, shift rotates, shift+ctrl does both. Anything
    /// else is not a zoom gesture.
    pub fn from_modifiers(shift: bool, ctrl: bool, alt: bool) -> Option<Self> {
        match (shift, ctrl, alt) {
            (false, false, false) => Some(ZoomMode::Scale),
            (true, false, false) => Some(ZoomMode::Rotate),
            (true, true, false) => Some(ZoomMode::ScaleAndRotate),
            _ => None,
        }
    }
}

/// A pixel source plus its transform inside the owning frame.
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: PhotoId,
    /// File the pixels were decoded from.
    pub source: PathBuf,
    pixels: Arc<RgbaImage>,
    /// Bumped whenever the pixel source is replaced.
    revision: u64,
    pub offset: Point,
    pub scale: f32,
    /// Degrees, clockwise. Not wrapped.
    pub rotation: f32,
}

/// Transform values of a photo, used to compare state across operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoTransform {
    pub offset: Point,
    pub scale: f32,
    pub rotation: f32,
}

impl Photo {
    pub fn new(id: PhotoId, source: PathBuf, pixels: Arc<RgbaImage>) -> Self {
        Self {
            id,
            source,
            pixels,
            revision: 0,
            offset: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn pixels(&self) -> &Arc<RgbaImage> {
        &self.pixels
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn width(&self) -> f32 {
        self.pixels.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.pixels.height() as f32
    }

    pub fn transform(&self) -> PhotoTransform {
        PhotoTransform {
            offset: self.offset,
            scale: self.scale,
            rotation: self.rotation,
        }
    }

    /// Rotation and scale origin: the center of the pixel source.
    pub fn origin(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// Swap in new pixels. The transform is left alone; callers reset.
    pub fn set_source(&mut self, source: PathBuf, pixels: Arc<RgbaImage>) {
        self.source = source;
        self.pixels = pixels;
        self.revision += 1;
    }

    /// Identity scale/rotation, centered in `frame`.
    pub fn reset(&mut self, frame: &Rect) {
        self.offset = Point::new(
            frame.width / 2.0 - self.width() / 2.0,
            frame.height / 2.0 - self.height() / 2.0,
        );
        self.scale = 1.0;
        self.rotation = 0.0;
    }

    /// Shrink so a photo wider than the frame fits its width.
    pub fn fit_width(&mut self, frame: &Rect) {
        if self.width() > frame.width {
            self.scale *= frame.width / self.width();
        }
    }

    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }

    /// Apply one wheel step. Scale and rotation candidates are always
    /// computed; `mode` picks which ones are committed. Offset is untouched.
    pub fn apply_zoom_gesture(&mut self, direction: ZoomDirection, mode: ZoomMode) {
        let (scale, rotation) = self.zoom_candidates(direction);
        match mode {
            ZoomMode::Scale => self.scale = scale,
            ZoomMode::Rotate => self.rotation = rotation,
            ZoomMode::ScaleAndRotate => {
                self.scale = scale;
                self.rotation = rotation;
            }
        }
        log::debug!(
            "Photo {} zoom {:?}/{:?}: scale={:.2} rotation={:.1}",
            self.id.0,
            direction,
            mode,
            self.scale,
            self.rotation
        );
    }

    fn zoom_candidates(&self, direction: ZoomDirection) -> (f32, f32) {
        let mut scale = self.scale;

        match direction {
            ZoomDirection::In => {
                if scale < MAX_ZOOM {
                    let step = if round2(scale) < round2(SCALE_STEP * 2.0) {
                        FINE_SCALE_STEP
                    } else {
                        SCALE_STEP
                    };
                    scale = (scale + step).min(MAX_ZOOM);
                }
                (scale, self.rotation + ROTATION_STEP)
            }
            ZoomDirection::Out => {
                // Unrounded scale; the tolerance only absorbs f32 drift
                if scale + STEP_TOLERANCE >= SCALE_STEP * 2.0 {
                    scale = (scale - SCALE_STEP).max(MIN_SCALE);
                } else if scale + STEP_TOLERANCE >= FINE_SCALE_STEP * 2.0 {
                    scale = (scale - FINE_SCALE_STEP).max(MIN_SCALE);
                }
                (scale, self.rotation - ROTATION_STEP)
            }
        }
    }

    /// Map a point in photo pixel space to frame-local coordinates.
    pub fn to_frame(&self, local: Point) -> Point {
        let origin = self.origin();
        self.offset + origin + ((local - origin) * self.scale).rotated(self.rotation)
    }

    /// Map a frame-local point back into photo pixel space.
    pub fn to_local(&self, frame_point: Point) -> Option<Point> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        let origin = self.origin();
        let v = (frame_point - self.offset - origin).rotated(-self.rotation);
        Some(origin + v * (1.0 / self.scale))
    }

    /// Corners of the transformed photo in frame-local coordinates,
    /// clockwise from the top-left of the pixel source.
    pub fn corners(&self) -> [Point; 4] {
        let (w, h) = (self.width(), self.height());
        [
            self.to_frame(Point::new(0.0, 0.0)),
            self.to_frame(Point::new(w, 0.0)),
            self.to_frame(Point::new(w, h)),
            self.to_frame(Point::new(0.0, h)),
        ]
    }

    /// Whether a frame-local point lies on the transformed photo.
    pub fn contains(&self, frame_point: Point) -> bool {
        match self.to_local(frame_point) {
            Some(p) => p.x >= 0.0 && p.y >= 0.0 && p.x < self.width() && p.y < self.height(),
            None => false,
        }
    }
}

/// Slack for comparing accumulated scales against step thresholds.
const STEP_TOLERANCE: f32 = 1e-5;

fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
