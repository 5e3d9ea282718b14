// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Input to collage command mapping.
//!
//! The controller receives toolkit-independent input events in canvas
//! coordinates and turns them into photo transform changes, swap protocol
//! transitions or requests the application fulfils with a dialog.

use super::swap::{DropOutcome, SwapCoordinator};
use crate::io::media::ImageCodec;
use crate::models::collage::Collage;
use crate::models::frame::{FrameId, FrameStyle};
use crate::models::photo::{ZoomDirection, ZoomMode};
use crate::util::geometry::Point;
use std::path::PathBuf;

/// Command table shown in the help overlay and the CLI help.
pub const HELP_COMMANDS: &[(&str, &str)] = &[
    ("Left Button", "Drag image"),
    ("Right Button", "Drag to swap two images"),
    ("Wheel", "Zoom image"),
    ("Shift + Wheel", "Rotate image"),
    ("Shift + Ctrl + Wheel", "Zoom and rotate image"),
    ("Double Click", "Load new image"),
    ("+/-", "Increase/Decrease photo frame"),
    ("H", "Toggle this help"),
    ("Shift + S", "Save as collage"),
    ("S", "Save collage"),
    ("Numpad /", "Reset photo position, scale and rotation"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Plus,
    Minus,
    H,
    S,
    Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// Input event in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        modifiers: Modifiers,
        /// Pointer position, if the pointer is over the canvas.
        pointer: Option<Point>,
    },
    Pressed { button: Button, pos: Point },
    Moved { pos: Point },
    Released { button: Button, pos: Point },
    DoubleClicked { pos: Point },
    Wheel {
        pos: Point,
        direction: ZoomDirection,
        modifiers: Modifiers,
    },
    FilesHovered,
    FilesHoverEnded,
    FilesDropped { pos: Option<Point>, paths: Vec<PathBuf> },
}

/// Keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GrowBorder,
    ShrinkBorder,
    ToggleHelp,
    Save,
    SaveAs,
    ResetPhoto,
}

impl Command {
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        match key {
            Key::Plus => Some(Command::GrowBorder),
            Key::Minus => Some(Command::ShrinkBorder),
            Key::H => Some(Command::ToggleHelp),
            Key::S if modifiers.is_none() => Some(Command::Save),
            Key::S if modifiers == Modifiers::SHIFT => Some(Command::SaveAs),
            Key::S => None,
            Key::Slash => Some(Command::ResetPhoto),
        }
    }
}

/// Work the application has to do outside the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Ask the user for an image to load into the frame.
    PickImage(FrameId),
    /// Export the collage; `save_as` forces a path prompt.
    Export { save_as: bool },
}

#[derive(Debug, Clone)]
pub struct InputController {
    swap: SwapCoordinator,
    /// Frame being panned and the last pointer position.
    pan: Option<(FrameId, Point)>,
    help_visible: bool,
}

impl InputController {
    pub fn new(drag_start_distance: f32) -> Self {
        Self {
            swap: SwapCoordinator::new(drag_start_distance),
            pan: None,
            help_visible: false,
        }
    }

    pub fn swap(&self) -> &SwapCoordinator {
        &self.swap
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Apply one event.
    pub fn handle(
        &mut self,
        event: InputEvent,
        collage: &mut Collage,
        style: &mut FrameStyle,
        codec: &dyn ImageCodec,
    ) -> Option<Request> {
        match event {
            InputEvent::Key {
                key,
                modifiers,
                pointer,
            } => {
                let command = Command::from_key(key, modifiers)?;
                return self.run_command(command, pointer, collage, style);
            }

            InputEvent::Pressed { button, pos } => match button {
                Button::Primary => {
                    self.pan = collage.photo_hit(pos).map(|frame| (frame, pos));
                }
                Button::Secondary => {
                    if let Some(frame) = collage.photo_hit(pos) {
                        self.swap.press(frame, pos);
                    }
                }
            },

            InputEvent::Moved { pos } => {
                if let Some((frame, last)) = self.pan {
                    collage.pan_photo(frame, pos - last);
                    self.pan = Some((frame, pos));
                }
                self.swap.pointer_moved(pos);
            }

            InputEvent::Released { button, pos } => match button {
                Button::Primary => self.pan = None,
                Button::Secondary => {
                    let target = collage.frame_at(pos);
                    let outcome = self.swap.release(target, collage);
                    self.apply_outcome(outcome, collage, codec);
                }
            },

            InputEvent::DoubleClicked { pos } => {
                self.pan = None;
                return collage.frame_at(pos).map(Request::PickImage);
            }

            InputEvent::Wheel {
                pos,
                direction,
                modifiers,
            } => {
                let frame = collage.photo_hit(pos)?;
                let mode = ZoomMode::from_modifiers(modifiers.shift, modifiers.ctrl, modifiers.alt)?;
                collage.zoom_photo(frame, direction, mode);
            }

            InputEvent::FilesHovered => self.swap.files_hovered(),
            InputEvent::FilesHoverEnded => self.swap.hover_ended(),

            InputEvent::FilesDropped { pos, paths } => {
                let target = pos.and_then(|p| collage.frame_at(p));
                let outcome = self.swap.files_dropped(target, paths, collage);
                self.apply_outcome(outcome, collage, codec);
            }
        }
        None
    }

    fn run_command(
        &mut self,
        command: Command,
        pointer: Option<Point>,
        collage: &mut Collage,
        style: &mut FrameStyle,
    ) -> Option<Request> {
        match command {
            Command::GrowBorder => style.grow(),
            Command::ShrinkBorder => style.shrink(),
            Command::ToggleHelp => self.help_visible = !self.help_visible,
            Command::Save => return Some(Request::Export { save_as: false }),
            Command::SaveAs => return Some(Request::Export { save_as: true }),
            Command::ResetPhoto => {
                if let Some(frame) = pointer.and_then(|p| collage.frame_at(p)) {
                    collage.reset_photo(frame);
                }
            }
        }
        None
    }

    fn apply_outcome(&self, outcome: DropOutcome, collage: &mut Collage, codec: &dyn ImageCodec) {
        if let DropOutcome::Replace { target, path } = outcome {
            if let Err(e) = collage.load_photo(target, &path, codec) {
                log::warn!("{:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::memory::MemoryCodec;
    use crate::models::collage::Canvas;
    use crate::models::layout::GridSpec;

    struct Fixture {
        collage: Collage,
        style: FrameStyle,
        codec: MemoryCodec,
        controller: InputController,
    }

    impl Fixture {
        /// Two 100x100 frames side by side, each with a centered 50x50 photo.
        fn new() -> Self {
            let codec = MemoryCodec::default()
                .with_image("a.png", 50, 50, [255, 0, 0])
                .with_image("b.png", 50, 50, [0, 0, 255])
                .with_image("new.png", 20, 40, [0, 255, 0]);
            let files = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
            let spec = GridSpec::Uniform { columns: 2, rows: 1 };
            let collage = Collage::build(Canvas::with_aspect(200.0, 0.5), &spec, &files, &codec).unwrap();
            Self {
                collage,
                style: FrameStyle::default(),
                codec,
                controller: InputController::new(10.0),
            }
        }

        fn send(&mut self, event: InputEvent) -> Option<Request> {
            self.controller
                .handle(event, &mut self.collage, &mut self.style, &self.codec)
        }

        fn photo(&self, frame: usize) -> &crate::models::photo::Photo {
            self.collage.photo_in(FrameId(frame)).unwrap()
        }
    }

    fn key(key: Key, modifiers: Modifiers) -> InputEvent {
        InputEvent::Key {
            key,
            modifiers,
            pointer: Some(Point::new(50.0, 50.0)),
        }
    }

    #[test]
    fn test_primary_drag_pans() {
        let mut f = Fixture::new();
        let start = f.photo(0).offset;

        f.send(InputEvent::Pressed {
            button: Button::Primary,
            pos: Point::new(50.0, 50.0),
        });
        f.send(InputEvent::Moved {
            pos: Point::new(60.0, 45.0),
        });
        f.send(InputEvent::Moved {
            pos: Point::new(300.0, 45.0),
        });
        f.send(InputEvent::Released {
            button: Button::Primary,
            pos: Point::new(300.0, 45.0),
        });
        // Not clamped to the frame
        assert_eq!(f.photo(0).offset, start + Point::new(250.0, -5.0));

        // Moves after release do nothing
        f.send(InputEvent::Moved {
            pos: Point::new(0.0, 0.0),
        });
        assert_eq!(f.photo(0).offset, start + Point::new(250.0, -5.0));
    }

    #[test]
    fn test_press_outside_photo_does_not_pan() {
        let mut f = Fixture::new();
        let start = f.photo(0).offset;
        f.send(InputEvent::Pressed {
            button: Button::Primary,
            pos: Point::new(5.0, 5.0),
        });
        f.send(InputEvent::Moved {
            pos: Point::new(40.0, 40.0),
        });
        assert_eq!(f.photo(0).offset, start);
    }

    #[test]
    fn test_secondary_drag_swaps() {
        let mut f = Fixture::new();
        let a = f.collage.frame(FrameId(0)).unwrap().photo;
        let b = f.collage.frame(FrameId(1)).unwrap().photo;

        f.send(InputEvent::Pressed {
            button: Button::Secondary,
            pos: Point::new(50.0, 50.0),
        });
        f.send(InputEvent::Moved {
            pos: Point::new(120.0, 50.0),
        });
        f.send(InputEvent::Released {
            button: Button::Secondary,
            pos: Point::new(150.0, 50.0),
        });

        assert_eq!(f.collage.frame(FrameId(0)).unwrap().photo, b);
        assert_eq!(f.collage.frame(FrameId(1)).unwrap().photo, a);
        assert!(f.controller.swap().is_idle());
    }

    #[test]
    fn test_wheel_only_over_photo() {
        let mut f = Fixture::new();
        f.send(InputEvent::Wheel {
            pos: Point::new(5.0, 5.0),
            direction: ZoomDirection::In,
            modifiers: Modifiers::NONE,
        });
        assert_eq!(f.photo(0).scale, 1.0);

        f.send(InputEvent::Wheel {
            pos: Point::new(50.0, 50.0),
            direction: ZoomDirection::In,
            modifiers: Modifiers::NONE,
        });
        assert!((f.photo(0).scale - 1.05).abs() < 1e-6);

        f.send(InputEvent::Wheel {
            pos: Point::new(50.0, 50.0),
            direction: ZoomDirection::Out,
            modifiers: Modifiers::SHIFT,
        });
        assert_eq!(f.photo(0).rotation, -5.0);

        // Alt is not a zoom modifier
        f.send(InputEvent::Wheel {
            pos: Point::new(50.0, 50.0),
            direction: ZoomDirection::In,
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
        });
        assert!((f.photo(0).scale - 1.05).abs() < 1e-6);
        assert_eq!(f.photo(0).rotation, -5.0);
    }

    #[test]
    fn test_border_keys() {
        let mut f = Fixture::new();
        f.send(key(Key::Plus, Modifiers::NONE));
        assert_eq!(f.style.radius, 16.0);
        for _ in 0..40 {
            f.send(key(Key::Minus, Modifiers::NONE));
        }
        assert_eq!(f.style.radius, 0.0);
    }

    #[test]
    fn test_save_keys() {
        let mut f = Fixture::new();
        assert_eq!(
            f.send(key(Key::S, Modifiers::NONE)),
            Some(Request::Export { save_as: false })
        );
        assert_eq!(
            f.send(key(Key::S, Modifiers::SHIFT)),
            Some(Request::Export { save_as: true })
        );
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(f.send(key(Key::S, ctrl)), None);
    }

    #[test]
    fn test_help_toggle_and_reset_key() {
        let mut f = Fixture::new();
        f.send(key(Key::H, Modifiers::NONE));
        assert!(f.controller.help_visible());
        f.send(key(Key::H, Modifiers::NONE));
        assert!(!f.controller.help_visible());

        let original = f.photo(0).transform();
        f.collage.pan_photo(FrameId(0), Point::new(7.0, 7.0));
        f.collage
            .zoom_photo(FrameId(0), ZoomDirection::In, ZoomMode::ScaleAndRotate);
        f.send(key(Key::Slash, Modifiers::NONE));
        assert_eq!(f.photo(0).transform(), original);
    }

    #[test]
    fn test_double_click_requests_image() {
        let mut f = Fixture::new();
        assert_eq!(
            f.send(InputEvent::DoubleClicked {
                pos: Point::new(150.0, 10.0)
            }),
            Some(Request::PickImage(FrameId(1)))
        );
        assert_eq!(
            f.send(InputEvent::DoubleClicked {
                pos: Point::new(-1.0, 10.0)
            }),
            None
        );
    }

    #[test]
    fn test_file_drop_replaces_only_target() {
        let mut f = Fixture::new();
        f.collage
            .zoom_photo(FrameId(0), ZoomDirection::In, ZoomMode::ScaleAndRotate);
        f.collage.pan_photo(FrameId(1), Point::new(3.0, 3.0));
        let other = f.photo(1).transform();
        let other_source = f.photo(1).source.clone();

        f.send(InputEvent::FilesHovered);
        f.send(InputEvent::FilesDropped {
            pos: Some(Point::new(20.0, 20.0)),
            paths: vec![PathBuf::from("new.png")],
        });

        let photo = f.photo(0);
        assert_eq!(photo.source, PathBuf::from("new.png"));
        assert_eq!(photo.scale, 1.0);
        assert_eq!(photo.rotation, 0.0);
        assert_eq!(photo.offset, Point::new(40.0, 30.0));

        assert_eq!(f.photo(1).transform(), other);
        assert_eq!(f.photo(1).source, other_source);
        assert!(f.controller.swap().is_idle());
    }

    #[test]
    fn test_unreadable_drop_is_noop() {
        let mut f = Fixture::new();
        let before = f.photo(0).clone();
        f.send(InputEvent::FilesDropped {
            pos: Some(Point::new(20.0, 20.0)),
            paths: vec![PathBuf::from("corrupt.png")],
        });
        assert_eq!(f.photo(0).source, before.source);
        assert_eq!(f.photo(0).transform(), before.transform());
    }
}
