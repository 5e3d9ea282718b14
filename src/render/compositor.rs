// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Offscreen compositing of the whole collage.
//!
//! Paint order: background fill, then for every frame in generation order
//! its photo (clipped to the frame) followed by its rounded border. Each
//! output pixel is sampled at its center, so tiles never leave gaps even
//! when their edges fall between pixels.

use crate::models::collage::Collage;
use crate::models::frame::{Frame, FrameStyle};
use crate::models::photo::Photo;
use crate::util::geometry::{Point, Rect};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::borrow::Cow;

/// Output size for a canvas rendered `width` pixels wide.
pub fn output_size(collage: &Collage, width: u32) -> (u32, u32) {
    let height = (width as f32 * collage.canvas().aspect_ratio()).round() as u32;
    (width, height.max(1))
}

/// Render the full canvas `width` pixels wide.
pub fn render(collage: &Collage, style: &FrameStyle, width: u32) -> RgbaImage {
    let (width, height) = output_size(collage, width);
    let k = width as f32 / collage.canvas().width;

    let [r, g, b] = style.background;
    let mut out = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    for frame in collage.frames() {
        if let Some(photo) = collage.photo_in(frame.id) {
            draw_photo(&mut out, frame, photo, k);
        }
        draw_border(&mut out, &frame.rect.scaled(k), style, k);
    }

    out
}

/// Pixel index range covering `[start, end)` in output space.
fn pixel_span(start: f32, end: f32, limit: u32) -> std::ops::Range<u32> {
    let lo = start.floor().max(0.0) as u32;
    let hi = (end.ceil().max(0.0) as u32).min(limit);
    lo.min(hi)..hi
}

fn draw_photo(out: &mut RgbaImage, frame: &Frame, photo: &Photo, k: f32) {
    // Pre-filter when the photo ends up smaller than its pixel grid so
    // bilinear sampling does not alias.
    let effective = photo.scale * k;
    let (source, factor): (Cow<RgbaImage>, f32) = if effective < 1.0 {
        let w = ((photo.width() * effective).round() as u32).max(1);
        let h = ((photo.height() * effective).round() as u32).max(1);
        let resized = imageops::resize(&**photo.pixels(), w, h, FilterType::Triangle);
        (Cow::Owned(resized), w as f32 / photo.width())
    } else {
        (Cow::Borrowed(&**photo.pixels()), 1.0)
    };

    let clip = frame.rect.scaled(k);
    let xs = pixel_span(clip.x, clip.right(), out.width());
    let ys = pixel_span(clip.y, clip.bottom(), out.height());

    for py in ys {
        for px in xs.clone() {
            let canvas = Point::new((px as f32 + 0.5) / k, (py as f32 + 0.5) / k);
            if !frame.rect.contains(canvas) {
                continue;
            }
            let Some(local) = photo.to_local(canvas - frame.rect.min()) else {
                continue;
            };
            let sample = bilinear_sample(&source, local.x * factor, local.y * factor);
            if sample[3] > 0.0 {
                blend(out.get_pixel_mut(px, py), sample, 1.0);
            }
        }
    }
}

/// Stroke the rounded rectangle `rect` (output space) with anti-aliased
/// coverage. The stroke is centered on the rectangle edge.
fn draw_border(out: &mut RgbaImage, rect: &Rect, style: &FrameStyle, k: f32) {
    let stroke = style.stroke_width() * k;
    let half = stroke / 2.0;
    let radius = (style.radius * k).min(rect.width / 2.0).min(rect.height / 2.0);
    let [r, g, b] = style.border_color;
    let color = [r as f32, g as f32, b as f32, 255.0];

    let xs = pixel_span(rect.x - half - 1.0, rect.right() + half + 1.0, out.width());
    let ys = pixel_span(rect.y - half - 1.0, rect.bottom() + half + 1.0, out.height());

    for py in ys {
        for px in xs.clone() {
            let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
            let d = rounded_rect_distance(p, rect, radius);
            let coverage = (half - d.abs() + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend(out.get_pixel_mut(px, py), color, coverage);
            }
        }
    }
}

/// Signed distance from `p` to the outline of a rounded rectangle
/// (negative inside).
fn rounded_rect_distance(p: Point, rect: &Rect, radius: f32) -> f32 {
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;
    let qx = (p.x - cx).abs() - rect.width / 2.0 + radius;
    let qy = (p.y - cy).abs() - rect.height / 2.0 + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

/// Bilinear interpolation with pixel centers at `i + 0.5`; samples outside
/// the image are transparent, which softens the photo edges.
fn bilinear_sample(img: &RgbaImage, x: f32, y: f32) -> [f32; 4] {
    let x = x - 0.5;
    let y = y - 0.5;
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let sample = |sx: i64, sy: i64| -> [f32; 4] {
        if sx < 0 || sy < 0 || sx >= img.width() as i64 || sy >= img.height() as i64 {
            [0.0; 4]
        } else {
            let p = img.get_pixel(sx as u32, sy as u32);
            [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
        }
    };

    let tl = sample(x0, y0);
    let tr = sample(x0 + 1, y0);
    let bl = sample(x0, y0 + 1);
    let br = sample(x0 + 1, y0 + 1);

    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = lerp(tl[c], tr[c], fx);
        let bot = lerp(bl[c], br[c], fx);
        out[c] = lerp(top, bot, fy);
    }
    out
}

/// Source-over blend of `src` (0..255 channels) onto an opaque pixel.
fn blend(dst: &mut Rgba<u8>, src: [f32; 4], coverage: f32) {
    let alpha = (src[3] / 255.0) * coverage;
    for c in 0..3 {
        let value = src[c] * alpha + dst[c] as f32 * (1.0 - alpha);
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = 255;
}
