// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Serialization of configuration files and drag payloads.
//!
//! Configuration is read from YAML or JSON. The swap drag payload is a small
//! JSON document carrying the canvas position the drag started from.

use crate::config::CollageConfig;
use crate::util::geometry::Point;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Import configuration from YAML format.
pub fn import_yaml(path: &Path) -> Result<CollageConfig> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import configuration from JSON format.
pub fn import_json(path: &Path) -> Result<CollageConfig> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Load a configuration file, picking the format from its extension.
pub fn load_config(path: &Path) -> Result<CollageConfig> {
    let extension = path.extension().and_then(|s| s.to_str());
    let config = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported config file extension: {:?}", extension),
    };
    config.with_context(|| format!("Failed to read config {}", path.display()))
}

#[derive(Debug, Serialize, Deserialize)]
struct SwapPayload {
    pos: Point,
}

/// Encode a swap request for the drag started at `origin`.
pub fn encode_swap_payload(origin: Point) -> String {
    // Serializing two floats cannot fail
    serde_json::to_string(&SwapPayload { pos: origin }).unwrap_or_default()
}

/// Decode a swap request, rejecting anything that is not one.
pub fn decode_swap_payload(text: &str) -> Result<Point> {
    let payload: SwapPayload =
        serde_json::from_str(text).context("Not a photo swap payload")?;
    if !payload.pos.x.is_finite() || !payload.pos.y.is_finite() {
        bail!("Swap payload position is not finite");
    }
    Ok(payload.pos)
}
