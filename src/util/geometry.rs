// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the point/rectangle types used by the collage model
//! and the transformation between canvas coordinates and the on-screen
//! viewport the canvas is fitted into.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D point (or displacement) in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Sum of the absolute components.
    pub fn manhattan_length(&self) -> f32 {
        self.x.abs() + self.y.abs()
    }

    /// Rotate around the coordinate origin by `degrees`, clockwise on a
    /// y-down screen.
    pub fn rotated(self, degrees: f32) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Half-open containment: the left/top edges belong to the rectangle,
    /// the right/bottom edges belong to its neighbour.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Area shared with `other` (zero when they only touch).
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }

    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Maps canvas coordinates onto a screen area, scaled to fit while
/// preserving the canvas aspect ratio and centered in the leftover space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub origin: Point,
    pub scale: f32,
}

impl ViewTransform {
    /// Fit a `content_width` x `content_height` canvas into `available`.
    pub fn fit(content_width: f32, content_height: f32, available: Rect) -> Self {
        let content_aspect = content_width / content_height;
        let available_aspect = available.width / available.height;

        let scale = if content_aspect > available_aspect {
            // Canvas is wider - fit to width
            available.width / content_width
        } else {
            // Canvas is taller - fit to height
            available.height / content_height
        };

        let display_width = content_width * scale;
        let display_height = content_height * scale;

        Self {
            origin: Point::new(
                available.x + (available.width - display_width) / 2.0,
                available.y + (available.height - display_height) / 2.0,
            ),
            scale,
        }
    }

    /// Convert a screen position to canvas coordinates.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.scale,
            (screen.y - self.origin.y) / self.scale,
        )
    }

    /// Convert canvas coordinates to a screen position.
    pub fn to_screen(&self, canvas: Point) -> Point {
        Point::new(
            self.origin.x + canvas.x * self.scale,
            self.origin.y + canvas.y * self.scale,
        )
    }

    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        let min = self.to_screen(rect.min());
        Rect::new(min.x, min.y, rect.width * self.scale, rect.height * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_transform_roundtrip() {
        let view = ViewTransform::fit(1024.0, 682.0, Rect::new(10.0, 20.0, 800.0, 800.0));
        let canvas = Point::new(512.0, 341.0);

        let screen = view.to_screen(canvas);
        let back = view.to_canvas(screen);

        assert!((back.x - canvas.x).abs() < 0.0001);
        assert!((back.y - canvas.y).abs() < 0.0001);
    }

    #[test]
    fn test_view_transform_fits_wide_canvas_to_width() {
        let view = ViewTransform::fit(1000.0, 500.0, Rect::new(0.0, 0.0, 500.0, 500.0));
        assert_eq!(view.scale, 0.5);

        // Letterboxed vertically
        assert_eq!(view.origin, Point::new(0.0, 125.0));

        // Bottom-right corner lands inside the available area
        let br = view.to_screen(Point::new(1000.0, 500.0));
        assert_eq!(br, Point::new(500.0, 375.0));
    }

    #[test]
    fn test_view_transform_fits_tall_canvas_to_height() {
        let view = ViewTransform::fit(300.0, 600.0, Rect::new(0.0, 0.0, 600.0, 300.0));
        assert_eq!(view.scale, 0.5);
        assert_eq!(view.origin, Point::new(225.0, 0.0));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
    }

    #[test]
    fn test_intersection_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection_area(&b), 25.0);
        assert_eq!(a.intersection_area(&c), 0.0);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotated(90.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }
}
