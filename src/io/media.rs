// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading and saving.
//!
//! Decoding and encoding go through [`ImageCodec`] so the collage core can
//! be driven without touching the filesystem.

use anyhow::{bail, Context, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;

/// File extensions offered in open/save dialogs.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "gif", "jpg", "jpeg"];

/// Decode/encode collaborator.
pub trait ImageCodec {
    /// Decode `path` into RGBA pixels. Empty images are an error.
    fn load(&self, path: &Path) -> Result<RgbaImage>;

    /// Encode `image` to `path`.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<()>;
}

/// Codec backed by the `image` crate and the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCodec;

impl ImageCodec for FileCodec {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let img = image::open(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?
            .to_rgba8();

        if img.width() == 0 || img.height() == 0 {
            bail!("Image {} has no pixels", path.display());
        }

        log::debug!("Loaded image: {} ({}x{})", path.display(), img.width(), img.height());
        Ok(img)
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);

        let result = match format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
                .to_rgb8()
                .save_with_format(path, format),
            _ => image.save_with_format(path, format),
        };

        result.with_context(|| format!("Failed to write image {}", path.display()))
    }
}
