//! Flat, count-prefixed exchange format for glyph grids.
//!
//! ```text
//! {width:i32, height:i32, count:i32, cells:[count]Cell}
//! Cell = {x, y, glyphCodepoint, fgR, fgG, fgB, bgR, bgG, bgB, style:i32, alpha:f32}
//! ```
//!
//! Only non-background cells travel, so a mostly empty frame stays small.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::grid::GlyphGrid;
use crate::types::{Cell, Rgb, Style};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCell {
    pub x: i32,
    pub y: i32,
    pub glyph_codepoint: i32,
    pub fg_r: i32,
    pub fg_g: i32,
    pub fg_b: i32,
    pub bg_r: i32,
    pub bg_g: i32,
    pub bg_b: i32,
    pub style: i32,
    pub alpha: f32,
}

impl From<&Cell> for WireCell {
    fn from(c: &Cell) -> Self {
        Self {
            x: c.x,
            y: c.y,
            glyph_codepoint: c.glyph as i32,
            fg_r: i32::from(c.fg.r),
            fg_g: i32::from(c.fg.g),
            fg_b: i32::from(c.fg.b),
            bg_r: i32::from(c.bg.r),
            bg_g: i32::from(c.bg.g),
            bg_b: i32::from(c.bg.b),
            style: c.style.bits() as i32,
            alpha: c.alpha,
        }
    }
}

impl WireCell {
    /// Decode into a [`Cell`], repairing what a lenient host would repair:
    /// invalid codepoints become a space, channels clamp to `0..=255`,
    /// unknown style bits are dropped and alpha clamps to `[0, 1]`.
    pub fn to_cell(&self) -> Cell {
        let channel = |v: i32| v.clamp(0, 255) as u8;
        let glyph = u32::try_from(self.glyph_codepoint)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(' ');
        let alpha = if self.alpha.is_nan() {
            1.0
        } else {
            self.alpha.clamp(0.0, 1.0)
        };
        Cell {
            x: self.x,
            y: self.y,
            glyph,
            fg: Rgb::new(channel(self.fg_r), channel(self.fg_g), channel(self.fg_b)),
            bg: Rgb::new(channel(self.bg_r), channel(self.bg_g), channel(self.bg_b)),
            style: Style::from_bits_truncate(self.style as u32),
            alpha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGrid {
    pub width: i32,
    pub height: i32,
    pub count: i32,
    pub cells: Vec<WireCell>,
}

impl From<&GlyphGrid> for WireGrid {
    fn from(grid: &GlyphGrid) -> Self {
        let cells: Vec<WireCell> = grid.cells().iter().map(WireCell::from).collect();
        Self {
            width: i32::from(grid.width()),
            height: i32::from(grid.height()),
            count: cells.len() as i32,
            cells,
        }
    }
}

impl WireGrid {
    /// Rebuild a [`GlyphGrid`].
    ///
    /// Cells outside the declared dimensions are dropped. `count` must match
    /// the number of cells actually present.
    pub fn to_grid(&self) -> EngineResult<GlyphGrid> {
        let (width, height) = match (u16::try_from(self.width), u16::try_from(self.height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(EngineError::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                })
            }
        };
        if usize::try_from(self.count).ok() != Some(self.cells.len()) {
            return Err(EngineError::OutOfRangeInput(format!(
                "count {} does not match {} cells",
                self.count,
                self.cells.len()
            )));
        }

        let mut grid = GlyphGrid::new(width, height);
        grid.compose(width, height, |canvas| {
            for cell in &self.cells {
                canvas.put(cell.to_cell());
            }
        });
        Ok(grid)
    }
}
