// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Offscreen rendering and export.

pub mod compositor;
pub mod export;
