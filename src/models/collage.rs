// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collage state: the canvas, its frames and the photos they own.
//!
//! Frames and photos live in separate arenas indexed by [`FrameId`] and
//! [`PhotoId`]. A frame refers to its photo by id, so moving a photo between
//! frames is a field exchange and never touches the photo itself.

use super::frame::{Frame, FrameId};
use super::layout::GridSpec;
use super::photo::{Photo, PhotoId, ZoomDirection, ZoomMode};
use crate::io::media::ImageCodec;
use crate::util::geometry::{Point, Rect};
use anyhow::{bail, Context, Result};
use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default canvas aspect ratio (height / width).
pub const DEFAULT_ASPECT_RATIO: f32 = 2.0 / 3.0;
/// Default canvas width in canvas units (and export pixels).
pub const DEFAULT_CANVAS_WIDTH: f32 = 1024.0;

/// Fixed-size area the collage is composed onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::with_aspect(DEFAULT_CANVAS_WIDTH, DEFAULT_ASPECT_RATIO)
    }
}

impl Canvas {
    /// A canvas `width` wide whose height is `width * aspect_ratio`.
    pub fn with_aspect(width: f32, aspect_ratio: f32) -> Self {
        Self {
            width,
            height: width * aspect_ratio,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.height / self.width
    }
}

/// The canvas plus the frame and photo arenas.
#[derive(Debug, Clone)]
pub struct Collage {
    canvas: Canvas,
    /// Generation order, which is also back-to-front paint order.
    frames: Vec<Frame>,
    photos: Vec<Photo>,
}

impl Collage {
    /// Lay out the grid `spec` on `canvas` and fill the tiles from `files`, reusing
    /// files cyclically when there are more tiles than files.
    ///
    /// A file that fails to decode leaves its tile empty.
    pub fn build(
        canvas: Canvas,
        spec: &GridSpec,
        files: &[PathBuf],
        codec: &dyn ImageCodec,
    ) -> Result<Self> {
        if files.is_empty() {
            bail!("At least one image file is required");
        }

        let mut collage = Self::empty(canvas, spec);
        let mut decoded: HashMap<&Path, Option<Arc<RgbaImage>>> = HashMap::new();

        for index in 0..collage.frames.len() {
            let path = files[index % files.len()].as_path();
            let pixels = decoded
                .entry(path)
                .or_insert_with(|| match codec.load(path) {
                    Ok(img) => Some(Arc::new(img)),
                    Err(e) => {
                        log::warn!("Skipping {}: {:#}", path.display(), e);
                        None
                    }
                })
                .clone();

            if let Some(pixels) = pixels {
                log::info!("Add image: {}", path.display());
                let frame = FrameId(index);
                let photo = collage.attach_new_photo(frame, path.to_path_buf(), pixels);
                let rect = collage.frames[index].rect;
                collage.photos[photo.0].fit_width(&rect);
            }
        }

        Ok(collage)
    }

    /// Frames for the grid `spec` with no photos attached.
    pub fn empty(canvas: Canvas, spec: &GridSpec) -> Self {
        let frames = spec
            .generate(canvas.rect())
            .into_iter()
            .enumerate()
            .map(|(i, rect)| Frame::new(FrameId(i), rect))
            .collect();

        Self {
            canvas,
            frames,
            photos: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.0)
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(id.0)
    }

    /// The photo currently owned by `frame`.
    pub fn photo_in(&self, frame: FrameId) -> Option<&Photo> {
        let id = self.frame(frame)?.photo?;
        self.photos.get(id.0)
    }

    fn photo_in_mut(&mut self, frame: FrameId) -> Option<(&mut Photo, Rect)> {
        let frame = self.frames.get(frame.0)?;
        let rect = frame.rect;
        let id = frame.photo?;
        self.photos.get_mut(id.0).map(|p| (p, rect))
    }

    fn attach_new_photo(&mut self, frame: FrameId, source: PathBuf, pixels: Arc<RgbaImage>) -> PhotoId {
        let id = PhotoId(self.photos.len());
        let mut photo = Photo::new(id, source, pixels);
        photo.reset(&self.frames[frame.0].rect);
        self.photos.push(photo);
        self.frames[frame.0].photo = Some(id);
        id
    }

    /// Topmost frame containing `pos` (later frames are in front).
    pub fn frame_at(&self, pos: Point) -> Option<FrameId> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.rect.contains(pos))
            .map(|f| f.id)
    }

    /// Frame whose visible photo is under `pos`. Photos are clipped to
    /// their frame, so only the frame under `pos` is considered.
    pub fn photo_hit(&self, pos: Point) -> Option<FrameId> {
        let id = self.frame_at(pos)?;
        let frame = self.frame(id)?;
        let photo = self.photo_in(id)?;
        photo.contains(pos - frame.rect.min()).then_some(id)
    }

    /// Exchange the photos owned by `a` and `b`. Photo transforms travel
    /// with the photos unchanged.
    pub fn swap_photos(&mut self, a: FrameId, b: FrameId) -> bool {
        if a.0 >= self.frames.len() || b.0 >= self.frames.len() {
            return false;
        }
        if a != b {
            let pa = self.frames[a.0].photo;
            self.frames[a.0].photo = self.frames[b.0].photo;
            self.frames[b.0].photo = pa;
            log::info!("Swapped photos of frames {} and {}", a.0, b.0);
        }
        true
    }

    /// Give `frame` new pixel content and reset its transform. An empty
    /// frame gets a fresh photo.
    pub fn replace_photo(&mut self, frame: FrameId, source: PathBuf, pixels: Arc<RgbaImage>) -> bool {
        if frame.0 >= self.frames.len() {
            return false;
        }
        log::info!("Replace image of frame {}: {}", frame.0, source.display());
        match self.photo_in_mut(frame) {
            Some((photo, rect)) => {
                photo.set_source(source, pixels);
                photo.reset(&rect);
            }
            None => {
                self.attach_new_photo(frame, source, pixels);
            }
        }
        true
    }

    /// Decode `path` and put it into `frame`. On decode failure nothing
    /// changes and the error is returned.
    pub fn load_photo(&mut self, frame: FrameId, path: &Path, codec: &dyn ImageCodec) -> Result<()> {
        if self.frame(frame).is_none() {
            bail!("No frame {}", frame.0);
        }
        let pixels = codec
            .load(path)
            .with_context(|| format!("Cannot load new photo for frame {}", frame.0))?;
        self.replace_photo(frame, path.to_path_buf(), Arc::new(pixels));
        Ok(())
    }

    /// Restore identity scale/rotation and recenter the photo of `frame`.
    pub fn reset_photo(&mut self, frame: FrameId) -> bool {
        match self.photo_in_mut(frame) {
            Some((photo, rect)) => {
                photo.reset(&rect);
                log::debug!("Reset photo {}", photo.id.0);
                true
            }
            None => false,
        }
    }

    pub fn pan_photo(&mut self, frame: FrameId, delta: Point) -> bool {
        match self.photo_in_mut(frame) {
            Some((photo, _)) => {
                photo.pan(delta);
                true
            }
            None => false,
        }
    }

    pub fn zoom_photo(&mut self, frame: FrameId, direction: ZoomDirection, mode: ZoomMode) -> bool {
        match self.photo_in_mut(frame) {
            Some((photo, _)) => {
                photo.apply_zoom_gesture(direction, mode);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::memory::MemoryCodec;

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn twelve_file_codec() -> (MemoryCodec, Vec<PathBuf>) {
        let mut codec = MemoryCodec::default();
        let mut names = Vec::new();
        for i in 0..12 {
            let name = format!("photo{}.png", i);
            codec = codec.with_image(&name, 40 + i, 30, [i as u8 * 20, 0, 0]);
            names.push(PathBuf::from(name));
        }
        (codec, names)
    }

    #[test]
    fn test_files_assigned_cyclically() {
        let codec = MemoryCodec::default()
            .with_image("a.png", 10, 10, [255, 0, 0])
            .with_image("b.png", 10, 10, [0, 255, 0])
            .with_image("c.png", 10, 10, [0, 0, 255]);
        let list = files(&["a.png", "b.png", "c.png"]);
        let spec = GridSpec::Uniform { columns: 3, rows: 3 };

        let collage = Collage::build(Canvas::default(), &spec, &list, &codec).unwrap();

        assert_eq!(collage.frames().len(), 9);
        for (i, frame) in collage.frames().iter().enumerate() {
            let photo = collage.photo_in(frame.id).unwrap();
            assert_eq!(photo.source, list[i % list.len()]);
        }
    }

    #[test]
    fn test_twelve_files_on_three_by_four() {
        let (codec, list) = twelve_file_codec();
        let spec = GridSpec::Uniform { columns: 3, rows: 4 };
        let collage = Collage::build(Canvas::default(), &spec, &list, &codec).unwrap();

        assert_eq!(collage.frames().len(), 12);
        let mut seen = std::collections::HashSet::new();
        for (i, frame) in collage.frames().iter().enumerate() {
            let photo = collage.photo_in(frame.id).unwrap();
            assert_eq!(photo.source, list[i]);
            assert!(seen.insert(photo.id));
        }

        // Column-major: the second frame sits below the first
        assert_eq!(collage.frames()[1].rect.x, 0.0);
        assert!(collage.frames()[1].rect.y > 0.0);
    }

    #[test]
    fn test_unreadable_file_leaves_frame_empty() {
        let codec = MemoryCodec::default().with_image("good.png", 10, 10, [1, 2, 3]);
        let list = files(&["good.png", "missing.png"]);
        let spec = GridSpec::Uniform { columns: 2, rows: 1 };

        let collage = Collage::build(Canvas::default(), &spec, &list, &codec).unwrap();
        assert!(collage.photo_in(FrameId(0)).is_some());
        assert!(collage.photo_in(FrameId(1)).is_none());
    }

    #[test]
    fn test_build_requires_files() {
        let codec = MemoryCodec::default();
        assert!(Collage::build(Canvas::default(), &GridSpec::default(), &[], &codec).is_err());
    }

    #[test]
    fn test_wide_photo_fitted_on_build() {
        let codec = MemoryCodec::default().with_image("wide.png", 2048, 100, [0, 0, 0]);
        let spec = GridSpec::Uniform { columns: 2, rows: 2 };
        let collage = Collage::build(Canvas::default(), &spec, &files(&["wide.png"]), &codec).unwrap();

        let photo = collage.photo_in(FrameId(0)).unwrap();
        assert!((photo.scale - 512.0 / 2048.0).abs() < 1e-6);
    }

    #[test]
    fn test_swap_twice_restores_everything() {
        let (codec, list) = twelve_file_codec();
        let spec = GridSpec::Uniform { columns: 3, rows: 4 };
        let mut collage = Collage::build(Canvas::default(), &spec, &list, &codec).unwrap();

        let (a, b) = (FrameId(2), FrameId(7));
        collage.pan_photo(a, Point::new(13.0, -4.0));
        collage.zoom_photo(b, ZoomDirection::In, ZoomMode::ScaleAndRotate);

        let before_a = collage.frame(a).unwrap().photo;
        let before_b = collage.frame(b).unwrap().photo;
        let transform_a = collage.photo_in(a).unwrap().transform();
        let transform_b = collage.photo_in(b).unwrap().transform();

        assert!(collage.swap_photos(a, b));
        assert_eq!(collage.frame(a).unwrap().photo, before_b);
        assert_eq!(collage.frame(b).unwrap().photo, before_a);
        // Transforms travel with the photo, no reset
        assert_eq!(collage.photo_in(a).unwrap().transform(), transform_b);

        assert!(collage.swap_photos(a, b));
        assert_eq!(collage.frame(a).unwrap().photo, before_a);
        assert_eq!(collage.frame(b).unwrap().photo, before_b);
        assert_eq!(collage.photo_in(a).unwrap().transform(), transform_a);
        assert_eq!(collage.photo_in(b).unwrap().transform(), transform_b);
    }

    #[test]
    fn test_load_photo_replaces_and_resets() {
        let codec = MemoryCodec::default()
            .with_image("a.png", 10, 10, [0, 0, 0])
            .with_image("new.png", 60, 20, [0, 0, 0]);
        let spec = GridSpec::Uniform { columns: 2, rows: 1 };
        let mut collage = Collage::build(Canvas::default(), &spec, &files(&["a.png"]), &codec).unwrap();

        let x = FrameId(0);
        let id_before = collage.frame(x).unwrap().photo;
        collage.zoom_photo(x, ZoomDirection::In, ZoomMode::ScaleAndRotate);
        let other_before = collage.photo_in(FrameId(1)).unwrap().transform();

        collage.load_photo(x, Path::new("new.png"), &codec).unwrap();

        let photo = collage.photo_in(x).unwrap();
        let rect = collage.frame(x).unwrap().rect;
        // Identity is kept, content and transform are replaced
        assert_eq!(collage.frame(x).unwrap().photo, id_before);
        assert_eq!(photo.source, PathBuf::from("new.png"));
        assert_eq!(photo.revision(), 1);
        assert_eq!(photo.scale, 1.0);
        assert_eq!(photo.rotation, 0.0);
        assert_eq!(photo.offset, Point::new(rect.width / 2.0 - 30.0, rect.height / 2.0 - 10.0));

        assert_eq!(collage.photo_in(FrameId(1)).unwrap().transform(), other_before);
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let codec = MemoryCodec::default().with_image("a.png", 10, 10, [0, 0, 0]);
        let spec = GridSpec::Uniform { columns: 1, rows: 1 };
        let mut collage = Collage::build(Canvas::default(), &spec, &files(&["a.png"]), &codec).unwrap();
        collage.pan_photo(FrameId(0), Point::new(5.0, 5.0));
        let before = collage.photo_in(FrameId(0)).unwrap().transform();

        assert!(collage.load_photo(FrameId(0), Path::new("bad.png"), &codec).is_err());

        let photo = collage.photo_in(FrameId(0)).unwrap();
        assert_eq!(photo.source, PathBuf::from("a.png"));
        assert_eq!(photo.transform(), before);
    }

    #[test]
    fn test_photo_hit_respects_frame_clip() {
        let codec = MemoryCodec::default().with_image("a.png", 10, 10, [0, 0, 0]);
        let canvas = Canvas::with_aspect(200.0, 0.5);
        let spec = GridSpec::Uniform { columns: 2, rows: 1 };
        let collage = Collage::build(canvas, &spec, &files(&["a.png"]), &codec).unwrap();

        // 10x10 photo centered in each 100x100 frame
        assert_eq!(collage.photo_hit(Point::new(50.0, 50.0)), Some(FrameId(0)));
        assert_eq!(collage.photo_hit(Point::new(150.0, 50.0)), Some(FrameId(1)));
        assert_eq!(collage.photo_hit(Point::new(5.0, 5.0)), None);
        assert_eq!(collage.frame_at(Point::new(5.0, 5.0)), Some(FrameId(0)));
        assert_eq!(collage.frame_at(Point::new(250.0, 5.0)), None);
    }
}
