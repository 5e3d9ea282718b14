// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for the collage: layout, frames and photos.

pub mod collage;
pub mod frame;
pub mod layout;
pub mod photo;
