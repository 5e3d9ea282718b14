// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the collage, translates egui input into controller
//! events and fulfils the requests that need a native dialog (opening a
//! replacement photo, choosing an export path).

use crate::config::CollageConfig;
use crate::interaction::controller::{Button, InputController, InputEvent, Key, Modifiers, Request};
use crate::io::media::{FileCodec, IMAGE_EXTENSIONS};
use crate::models::collage::Collage;
use crate::models::frame::{FrameId, FrameStyle};
use crate::models::photo::ZoomDirection;
use crate::render::export::{export_collage, ExportState};
use crate::ui::canvas::{self, from_egui_rect, to_point, PhotoTextures};
use crate::ui::overlay;
use crate::util::geometry::ViewTransform;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_DURATION: Duration = Duration::from_secs(4);

/// Main application state.
pub struct CollageApp {
    collage: Collage,

    /// Border radius and colors shared by all frames
    style: FrameStyle,

    controller: InputController,

    /// Last used export path
    export: ExportState,

    /// Pixel width of exported images
    export_width: u32,

    codec: FileCodec,

    textures: PhotoTextures,

    /// Last status message and when it was set
    status: Option<(String, Instant)>,

    /// Whether OS files were hovering during the previous frame
    files_hovering: bool,
}

impl CollageApp {
    pub fn new(collage: Collage, config: &CollageConfig) -> Self {
        Self {
            collage,
            style: config.frame_style(),
            controller: InputController::new(config.drag_start_distance),
            export: ExportState::new(config.output.clone()),
            export_width: config.export_width,
            codec: FileCodec,
            textures: PhotoTextures::default(),
            status: None,
            files_hovering: false,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = Some((message, Instant::now()));
    }

    /// Convert this frame's raw egui input into controller events.
    fn collect_events(&mut self, ctx: &egui::Context, view: &ViewTransform, area: egui::Rect) -> Vec<InputEvent> {
        let to_canvas = |p: egui::Pos2| view.to_canvas(to_point(p));

        let (mut events, hovering) = ctx.input(|i| {
            let mut events = Vec::new();
            let pointer = i
                .pointer
                .hover_pos()
                .filter(|p| area.contains(*p))
                .map(to_canvas);

            for event in &i.events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        ..
                    } => {
                        let button = match button {
                            egui::PointerButton::Primary => Button::Primary,
                            egui::PointerButton::Secondary => Button::Secondary,
                            _ => continue,
                        };
                        if !*pressed {
                            events.push(InputEvent::Released {
                                button,
                                pos: to_canvas(*pos),
                            });
                        } else if area.contains(*pos) {
                            events.push(InputEvent::Pressed {
                                button,
                                pos: to_canvas(*pos),
                            });
                        }
                    }
                    egui::Event::PointerMoved(pos) => {
                        events.push(InputEvent::Moved { pos: to_canvas(*pos) });
                    }
                    egui::Event::MouseWheel {
                        delta, modifiers, ..
                    } => {
                        // Shift+wheel arrives as horizontal scroll on some platforms
                        let amount = if delta.y != 0.0 { delta.y } else { delta.x };
                        if let (Some(pos), true) = (pointer, amount != 0.0) {
                            events.push(InputEvent::Wheel {
                                pos,
                                direction: if amount > 0.0 {
                                    ZoomDirection::In
                                } else {
                                    ZoomDirection::Out
                                },
                                modifiers: convert_modifiers(modifiers),
                            });
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => {
                        if let Some(key) = convert_key(*key) {
                            events.push(InputEvent::Key {
                                key,
                                modifiers: convert_modifiers(modifiers),
                                pointer,
                            });
                        }
                    }
                    _ => {}
                }
            }

            if i.pointer.button_double_clicked(egui::PointerButton::Primary) {
                if let Some(pos) = i.pointer.interact_pos().filter(|p| area.contains(*p)) {
                    events.push(InputEvent::DoubleClicked { pos: to_canvas(pos) });
                }
            }

            let dropped: Vec<_> = i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect();
            if !dropped.is_empty() {
                let pos = i
                    .pointer
                    .latest_pos()
                    .filter(|p| area.contains(*p))
                    .map(to_canvas);
                events.push(InputEvent::FilesDropped { pos, paths: dropped });
            }

            (events, !i.raw.hovered_files.is_empty())
        });

        if hovering != self.files_hovering {
            let event = if hovering {
                InputEvent::FilesHovered
            } else {
                InputEvent::FilesHoverEnded
            };
            // Hover state changes before any drop in the same frame
            events.insert(0, event);
            self.files_hovering = hovering;
        }

        events
    }

    fn fulfil(&mut self, request: Request) {
        match request {
            Request::PickImage(frame) => self.pick_image(frame),
            Request::Export { save_as } => self.save(save_as),
        }
    }

    /// Ask for an image and load it into `frame`.
    fn pick_image(&mut self, frame: FrameId) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All Files", &["*"]);
        if let Ok(dir) = std::env::current_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };

        log::info!("Open image file: {}", path.display());
        if let Err(e) = self.collage.load_photo(frame, &path, &self.codec) {
            log::warn!("{:#}", e);
            self.set_status(format!("Could not open {}", path.display()));
        }
    }

    /// Export to the stored path, prompting when there is none or for save-as.
    fn save(&mut self, save_as: bool) {
        let target = self.export.resolve_target(save_as, || {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .add_filter("All Files", &["*"])
                .set_file_name("collage.png");
            if let Ok(dir) = std::env::current_dir() {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file()
        });
        let Some(path) = target else {
            log::debug!("Save cancelled");
            return;
        };

        match export_collage(&self.collage, &self.style, self.export_width, &path, &self.codec) {
            Ok((width, height)) => {
                self.set_status(format!("Saved {}x{} collage to {}", width, height, path.display()));
            }
            Err(e) => {
                log::error!("{:#}", e);
                self.set_status(format!("Export failed: {:#}", e));
            }
        }
    }
}

fn convert_modifiers(m: &egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: m.shift,
        ctrl: m.ctrl || m.mac_cmd,
        alt: m.alt,
    }
}

fn convert_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Plus | egui::Key::Equals => Some(Key::Plus),
        egui::Key::Minus => Some(Key::Minus),
        egui::Key::H => Some(Key::H),
        egui::Key::S => Some(Key::S),
        egui::Key::Slash => Some(Key::Slash),
        _ => None,
    }
}

impl eframe::App for CollageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, since)) = &self.status {
            let elapsed = since.elapsed();
            if elapsed >= STATUS_DURATION {
                self.status = None;
            } else {
                ctx.request_repaint_after(STATUS_DURATION - elapsed);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                let area = ui.available_rect_before_wrap();
                let canvas_size = *self.collage.canvas();
                let view = ViewTransform::fit(canvas_size.width, canvas_size.height, from_egui_rect(area));
                ui.allocate_rect(area, egui::Sense::click_and_drag());

                for event in self.collect_events(ctx, &view, area) {
                    let request = self
                        .controller
                        .handle(event, &mut self.collage, &mut self.style, &self.codec);
                    if let Some(request) = request {
                        self.fulfil(request);
                    }
                }

                let painter = ui.painter_at(area);
                canvas::paint(&painter, &view, &self.collage, &self.style, &mut self.textures);

                if self.controller.help_visible() {
                    overlay::show_help(&painter, area);
                }
                if let Some((message, _)) = &self.status {
                    overlay::show_status(&painter, area, message);
                }
            });
    }
}
