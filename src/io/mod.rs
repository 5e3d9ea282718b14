// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, configuration and drag payloads.

pub mod media;
pub mod serialization;
