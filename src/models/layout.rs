// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Grid layout generation.
//!
//! A [`GridSpec`] partitions the canvas into tile rectangles. Tiles are
//! produced column by column (top to bottom inside each column), which is
//! also the order photos are assigned in.

use crate::util::geometry::Rect;
use anyhow::{bail, Context, Result};
use std::fmt;
use std::str::FromStr;

/// Most tiles a parsed layout may have.
pub const MAX_TILES: u64 = 1024;

/// A vertical band of the canvas with its own row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Relative width; bands share the canvas width in proportion.
    pub weight: u32,
    pub rows: u32,
}

/// How the canvas is divided into tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridSpec {
    /// `columns` x `rows` equally sized tiles.
    Uniform { columns: u32, rows: u32 },
    /// Column bands of varying width, each split into its own rows.
    Bands(Vec<Band>),
}

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec::Uniform { columns: 3, rows: 4 }
    }
}

impl GridSpec {
    /// Narrow column of 3, wide column of 2, narrow column of 3.
    pub fn three_two_three() -> Self {
        GridSpec::Bands(vec![
            Band { weight: 1, rows: 3 },
            Band { weight: 2, rows: 2 },
            Band { weight: 1, rows: 3 },
        ])
    }

    /// Narrow column of 2, wide column of 2, narrow column of 2.
    pub fn two_two_two() -> Self {
        GridSpec::Bands(vec![
            Band { weight: 1, rows: 2 },
            Band { weight: 2, rows: 2 },
            Band { weight: 1, rows: 2 },
        ])
    }

    /// Number of tiles this layout generates.
    pub fn tile_count(&self) -> usize {
        match self {
            GridSpec::Uniform { columns, rows } => (*columns as usize) * (*rows as usize),
            GridSpec::Bands(bands) => bands.iter().map(|b| b.rows as usize).sum(),
        }
    }

    /// Partition `canvas` into tile rectangles in column-major order.
    ///
    /// No remainder redistribution is done; edges may carry float rounding.
    pub fn generate(&self, canvas: Rect) -> Vec<Rect> {
        let mut tiles = Vec::with_capacity(self.tile_count());

        match self {
            GridSpec::Uniform { columns, rows } => {
                let tile_width = canvas.width / *columns as f32;
                let tile_height = canvas.height / *rows as f32;
                for col in 0..*columns {
                    for row in 0..*rows {
                        tiles.push(Rect::new(
                            canvas.x + col as f32 * tile_width,
                            canvas.y + row as f32 * tile_height,
                            tile_width,
                            tile_height,
                        ));
                    }
                }
            }
            GridSpec::Bands(bands) => {
                let total_weight: u32 = bands.iter().map(|b| b.weight).sum();
                let mut x = canvas.x;
                for band in bands {
                    let band_width = canvas.width * band.weight as f32 / total_weight as f32;
                    let tile_height = canvas.height / band.rows as f32;
                    for row in 0..band.rows {
                        tiles.push(Rect::new(
                            x,
                            canvas.y + row as f32 * tile_height,
                            band_width,
                            tile_height,
                        ));
                    }
                    x += band_width;
                }
            }
        }

        tiles
    }
}

impl FromStr for GridSpec {
    type Err = anyhow::Error;

    /// Accepts `NxM` (uniform) or dash-separated band row counts where a
    /// `b` suffix marks a double-width band, e.g. `3-2b-3`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();

        if let Some((cols, rows)) = s.split_once('x') {
            let columns: u32 = cols
                .parse()
                .with_context(|| format!("Invalid column count in layout '{}'", s))?;
            let rows: u32 = rows
                .parse()
                .with_context(|| format!("Invalid row count in layout '{}'", s))?;
            if columns == 0 || rows == 0 {
                bail!("Layout '{}' must have at least one column and one row", s);
            }
            check_tile_count(&s, columns as u64 * rows as u64)?;
            return Ok(GridSpec::Uniform { columns, rows });
        }

        let mut bands = Vec::new();
        for token in s.split('-') {
            let (digits, weight) = match token.strip_suffix('b') {
                Some(digits) => (digits, 2),
                None => (token, 1),
            };
            let rows: u32 = digits
                .parse()
                .with_context(|| format!("Invalid band '{}' in layout '{}'", token, s))?;
            if rows == 0 {
                bail!("Band '{}' in layout '{}' has no rows", token, s);
            }
            bands.push(Band { weight, rows });
        }
        check_tile_count(&s, bands.iter().map(|b| b.rows as u64).sum())?;

        Ok(GridSpec::Bands(bands))
    }
}

fn check_tile_count(layout: &str, tiles: u64) -> Result<()> {
    if tiles > MAX_TILES {
        bail!(
            "Layout '{}' has {} tiles; at most {} are supported",
            layout,
            tiles,
            MAX_TILES
        );
    }
    Ok(())
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridSpec::Uniform { columns, rows } => write!(f, "{}x{}", columns, rows),
            GridSpec::Bands(bands) => {
                let parts: Vec<String> = bands
                    .iter()
                    .map(|b| {
                        if b.weight > 1 {
                            format!("{}b", b.rows)
                        } else {
                            b.rows.to_string()
                        }
                    })
                    .collect();
                write!(f, "{}", parts.join("-"))
            }
        }
    }
}
