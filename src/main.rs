// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Collage - interactive photo collage editor
//!
//! Lays the images given on the command line out in a grid of rounded
//! frames, lets the user pan, zoom, rotate and swap them, and exports the
//! result at a fixed resolution.

mod app;
mod cli;
mod config;
mod interaction;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::{anyhow, Result};
use app::CollageApp;
use cli::CliArgs;
use config::CollageConfig;
use io::media::FileCodec;
use models::collage::Collage;
use std::process::ExitCode;

/// Width of the initial window; the height follows the canvas aspect ratio.
const WINDOW_WIDTH: f32 = 800.0;

fn main() -> ExitCode {
    let args = match CliArgs::parse_from_args(std::env::args_os()) {
        Ok(args) => args,
        Err(exit) => {
            if exit.code == 0 {
                print!("{}", exit.message);
            } else {
                eprint!("{}", exit.message);
            }
            return ExitCode::from(exit.code);
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => io::serialization::load_config(path)?,
        None => CollageConfig::default(),
    };
    if let Some(layout) = &args.layout {
        config.layout = layout.clone();
    }
    if args.output.is_some() {
        config.output = args.output.clone();
    }

    let spec = config.grid_spec()?;
    let files = args.absolute_images();
    log::debug!("Image files: {:?}", files);

    let collage = Collage::build(config.canvas(), &spec, &files, &FileCodec)?;
    log::info!(
        "Created {} collage with {} frames from {} files",
        spec,
        collage.frames().len(),
        files.len()
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_WIDTH * config.aspect_ratio])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Collage")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let app = CollageApp::new(collage, &config);
    eframe::run_native(
        "Collage",
        options,
        Box::new(move |cc| {
            // Plus and minus zoom photos, not the whole UI
            cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Application error: {}", e))?;

    Ok(())
}
