// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer/keyboard interaction with the collage.

pub mod controller;
pub mod swap;
