// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-and-drop protocol for swapping photos between frames.
//!
//! A secondary-button press on a photo arms a swap. Once the pointer has
//! moved far enough a swap payload is emitted; dropping it on a frame
//! resolves the source frame from the payload position and exchanges the
//! two photos. Files dropped from outside replace the target's photo
//! instead.

use crate::io::serialization::{decode_swap_payload, encode_swap_payload};
use crate::models::collage::Collage;
use crate::models::frame::FrameId;
use crate::util::geometry::Point;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    NewPhoto,
    SwapRequest,
}

/// Content carried by a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DropData {
    Files(Vec<PathBuf>),
    Text(String),
}

/// An in-progress drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    pub source: Option<FrameId>,
    pub origin: Point,
    pub payload: DropData,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Secondary button held on a photo, threshold not reached yet.
    ArmedSwap { source: FrameId, origin: Point },
    /// Payload emitted, waiting for the drop.
    Dragging(DragSession),
    /// Files from outside the application are hovering the window.
    ArmedNewPhoto,
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Swapped { target: FrameId, source: FrameId },
    /// The target's photo should be replaced with this file.
    Replace { target: FrameId, path: PathBuf },
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SwapCoordinator {
    state: DragState,
    drag_start_distance: f32,
}

impl SwapCoordinator {
    pub fn new(drag_start_distance: f32) -> Self {
        Self {
            state: DragState::Idle,
            drag_start_distance,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Secondary button pressed on the photo of `source` at `origin`.
    pub fn press(&mut self, source: FrameId, origin: Point) {
        if self.is_idle() {
            self.state = DragState::ArmedSwap { source, origin };
        }
    }

    /// Pointer moved with the secondary button held. Returns the payload
    /// when this move starts the drag.
    pub fn pointer_moved(&mut self, pos: Point) -> Option<&DragSession> {
        let DragState::ArmedSwap { source, origin } = self.state else {
            return None;
        };
        if (pos - origin).manhattan_length() < self.drag_start_distance {
            return None;
        }

        let payload = encode_swap_payload(origin);
        log::debug!("Start swap drag from frame {}: {}", source.0, payload);
        self.state = DragState::Dragging(DragSession {
            kind: DragKind::SwapRequest,
            source: Some(source),
            origin,
            payload: DropData::Text(payload),
        });
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Secondary button released over `target` (`None` when outside every
    /// frame). Releasing before the drag started cancels it.
    pub fn release(&mut self, target: Option<FrameId>, collage: &mut Collage) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => match target {
                Some(target) => Self::drop_on(target, session.payload, collage),
                None => {
                    log::debug!("Swap dropped outside any frame");
                    DropOutcome::Ignored
                }
            },
            other => {
                if let DragState::ArmedSwap { .. } = other {
                    log::debug!("Swap released before drag threshold");
                }
                DropOutcome::Ignored
            }
        }
    }

    /// Files from the OS are hovering the window.
    pub fn files_hovered(&mut self) {
        if self.is_idle() {
            self.state = DragState::ArmedNewPhoto;
        }
    }

    /// The hovering files left without being dropped.
    pub fn hover_ended(&mut self) {
        if self.state == DragState::ArmedNewPhoto {
            self.state = DragState::Idle;
        }
    }

    /// Files from the OS dropped over `target`.
    pub fn files_dropped(
        &mut self,
        target: Option<FrameId>,
        files: Vec<PathBuf>,
        collage: &mut Collage,
    ) -> DropOutcome {
        if self.state == DragState::ArmedNewPhoto {
            self.state = DragState::Idle;
        }
        match target {
            Some(target) => Self::drop_on(target, DropData::Files(files), collage),
            None => DropOutcome::Ignored,
        }
    }

    /// Resolve `data` dropped on `target`.
    pub fn drop_on(target: FrameId, data: DropData, collage: &mut Collage) -> DropOutcome {
        match data {
            DropData::Files(mut files) => {
                if files.len() != 1 {
                    log::debug!("Drop rejected: {} files", files.len());
                    return DropOutcome::Ignored;
                }
                let path = files.remove(0);
                log::debug!("File dropped on frame {}: {}", target.0, path.display());
                DropOutcome::Replace { target, path }
            }
            DropData::Text(text) => {
                let pos = match decode_swap_payload(&text) {
                    Ok(pos) => pos,
                    Err(e) => {
                        log::debug!("Drop is not a photo swap ({:#}): {}", e, text);
                        return DropOutcome::Ignored;
                    }
                };
                match collage.frame_at(pos) {
                    Some(source) if collage.swap_photos(target, source) => {
                        DropOutcome::Swapped { target, source }
                    }
                    _ => {
                        log::debug!("No frame at swap source ({}, {})", pos.x, pos.y);
                        DropOutcome::Ignored
                    }
                }
            }
        }
    }
}
