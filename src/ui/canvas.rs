// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! On-screen collage view.
//!
//! Draws the canvas fitted into the available area: background, then each
//! frame's photo (as a rotated textured quad clipped to the frame) and its
//! rounded border, in the same order the exporter uses.

use crate::models::collage::Collage;
use crate::models::frame::FrameStyle;
use crate::models::photo::{Photo, PhotoId};
use crate::util::geometry::{Point, Rect, ViewTransform};
use std::collections::HashMap;

/// Largest texture side uploaded for display; bigger photos are downscaled.
const MAX_TEXTURE_SIDE: u32 = 4096;

/// GPU textures for the photos, re-uploaded when a photo's pixels change.
#[derive(Default)]
pub struct PhotoTextures {
    textures: HashMap<PhotoId, (u64, egui::TextureHandle)>,
}

impl PhotoTextures {
    fn texture_for(&mut self, ctx: &egui::Context, photo: &Photo) -> egui::TextureId {
        if let Some((revision, handle)) = self.textures.get(&photo.id) {
            if *revision == photo.revision() {
                return handle.id();
            }
        }

        let pixels = photo.pixels();
        let (w, h) = pixels.dimensions();
        let color_image = if w.max(h) > MAX_TEXTURE_SIDE {
            let factor = MAX_TEXTURE_SIDE as f32 / w.max(h) as f32;
            let small = image::imageops::thumbnail(
                &**pixels,
                ((w as f32 * factor) as u32).max(1),
                ((h as f32 * factor) as u32).max(1),
            );
            let size = [small.width() as usize, small.height() as usize];
            egui::ColorImage::from_rgba_unmultiplied(size, small.as_raw())
        } else {
            egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], pixels.as_raw())
        };

        let handle = ctx.load_texture(
            format!("photo_{}", photo.id.0),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        let id = handle.id();
        self.textures.insert(photo.id, (photo.revision(), handle));
        id
    }
}

pub fn to_pos(p: Point) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

pub fn to_point(p: egui::Pos2) -> Point {
    Point::new(p.x, p.y)
}

pub fn to_egui_rect(r: &Rect) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.width, r.height))
}

pub fn from_egui_rect(r: egui::Rect) -> Rect {
    Rect::new(r.min.x, r.min.y, r.width(), r.height())
}

fn color(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Paint the collage into `painter` through `view`.
pub fn paint(
    painter: &egui::Painter,
    view: &ViewTransform,
    collage: &Collage,
    style: &FrameStyle,
    textures: &mut PhotoTextures,
) {
    let canvas = to_egui_rect(&view.rect_to_screen(&collage.canvas().rect()));
    painter.rect_filled(canvas, 0.0, color(style.background));

    let radius = style.radius * view.scale;
    let stroke = egui::Stroke::new(style.stroke_width() * view.scale, color(style.border_color));

    for frame in collage.frames() {
        let frame_rect = to_egui_rect(&view.rect_to_screen(&frame.rect));

        if let Some(photo) = collage.photo_in(frame.id) {
            let texture = textures.texture_for(painter.ctx(), photo);
            let corners = photo
                .corners()
                .map(|c| to_pos(view.to_screen(frame.rect.min() + c)));
            painter
                .with_clip_rect(frame_rect.intersect(painter.clip_rect()))
                .add(egui::Shape::mesh(photo_mesh(texture, corners)));
        }

        painter.rect_stroke(frame_rect, radius, stroke);
    }
}

/// Textured quad with `corners` clockwise from the photo's top-left.
fn photo_mesh(texture: egui::TextureId, corners: [egui::Pos2; 4]) -> egui::Mesh {
    let uvs = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(1.0, 1.0),
        egui::pos2(0.0, 1.0),
    ];
    let mut mesh = egui::Mesh::with_texture(texture);
    for (pos, uv) in corners.into_iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos,
            uv,
            color: egui::Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}
