// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export target selection and collage export.

use super::compositor;
use crate::io::media::ImageCodec;
use crate::models::collage::Collage;
use crate::models::frame::FrameStyle;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the collage was last saved, for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportState {
    output_path: Option<PathBuf>,
}

impl ExportState {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Pick the export target. `prompt` is asked when no path is known yet
    /// or `save_as` is set; a cancelled prompt returns `None` and keeps the
    /// previous path.
    pub fn resolve_target(
        &mut self,
        save_as: bool,
        prompt: impl FnOnce() -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        if save_as || self.output_path.is_none() {
            let chosen = prompt()?;
            self.output_path = Some(chosen);
        }
        self.output_path.clone()
    }
}

/// Render `collage` `width` pixels wide and write it to `path`.
/// Returns the written image size.
pub fn export_collage(
    collage: &Collage,
    style: &FrameStyle,
    width: u32,
    path: &Path,
    codec: &dyn ImageCodec,
) -> Result<(u32, u32)> {
    let image = compositor::render(collage, style, width);
    codec
        .save(&image, path)
        .with_context(|| format!("Failed to export collage to {}", path.display()))?;
    log::info!(
        "Collage saved to file: {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::memory::MemoryCodec;
    use crate::models::collage::Canvas;
    use crate::models::layout::GridSpec;
    use std::cell::Cell;

    #[test]
    fn test_first_save_prompts_then_reuses() {
        let mut state = ExportState::default();
        let prompts = Cell::new(0);
        let prompt = || {
            prompts.set(prompts.get() + 1);
            Some(PathBuf::from("first.png"))
        };

        assert_eq!(state.resolve_target(false, prompt), Some("first.png".into()));
        assert_eq!(
            state.resolve_target(false, || panic!("should not prompt")),
            Some("first.png".into())
        );
        assert_eq!(prompts.get(), 1);

        // Save-as always prompts and remembers the answer
        assert_eq!(
            state.resolve_target(true, || Some(PathBuf::from("second.jpg"))),
            Some("second.jpg".into())
        );
        assert_eq!(state.output_path(), Some(Path::new("second.jpg")));
    }

    #[test]
    fn test_cancelled_prompt_keeps_path() {
        let mut state = ExportState::new(Some("kept.png".into()));
        assert_eq!(state.resolve_target(true, || None), None);
        assert_eq!(state.output_path(), Some(Path::new("kept.png")));

        let mut fresh = ExportState::default();
        assert_eq!(fresh.resolve_target(false, || None), None);
        assert_eq!(fresh.output_path(), None);
    }

    #[test]
    fn test_export_has_fixed_resolution() {
        let mut codec = MemoryCodec::default();
        let mut files = Vec::new();
        for i in 0..12 {
            let name = format!("p{}.png", i);
            codec = codec.with_image(&name, 64, 48, [i * 20, 100, 50]);
            files.push(PathBuf::from(name));
        }
        let spec = GridSpec::Uniform { columns: 3, rows: 4 };
        let collage = Collage::build(Canvas::default(), &spec, &files, &codec).unwrap();

        // Size depends only on the export width and canvas aspect ratio,
        // never on the window the collage is shown in
        let style = FrameStyle::default();
        let size = export_collage(&collage, &style, 1024, Path::new("out.png"), &codec).unwrap();
        assert_eq!(size, (1024, 683));

        let saved = codec.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, PathBuf::from("out.png"));
        assert_eq!(saved[0].1.dimensions(), (1024, (1024.0_f32 * 2.0 / 3.0).round() as u32));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let codec = MemoryCodec::default()
            .with_image("a.png", 8, 8, [0, 0, 0])
            .failing_saves();
        let collage = Collage::build(
            Canvas::default(),
            &GridSpec::Uniform { columns: 1, rows: 1 },
            &[PathBuf::from("a.png")],
            &codec,
        )
        .unwrap();

        let result = export_collage(&collage, &FrameStyle::default(), 64, Path::new("x.png"), &codec);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to export collage"));
        assert!(message.contains("Disk full"));
    }
}
