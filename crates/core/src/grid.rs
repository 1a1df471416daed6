//! Glyph grid: the render output of one tick.
//!
//! The grid stores only cells that differ from the default background, sorted
//! row-major. Hosts that want a dense `height x width` array can ask for one
//! with [`GlyphGrid::to_dense`], but the hot path never builds it.

use crate::types::Cell;

/// Fixed-size grid of character cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl GlyphGrid {
    /// An empty grid; every cell reads as background.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: Vec::new(),
        }
    }

    /// Columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of non-background cells.
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Non-background cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Cell at a position; background when nothing was drawn there.
    ///
    /// Returns `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        match self.cells.binary_search_by_key(&(y, x), |c| (c.y, c.x)) {
            Ok(i) => Some(self.cells[i]),
            Err(_) => Some(Cell::blank(x, y)),
        }
    }

    /// Dense row-major copy including background cells.
    pub fn to_dense(&self) -> Vec<Cell> {
        let w = usize::from(self.width);
        let h = usize::from(self.height);
        let mut dense = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                dense.push(Cell::blank(x as i32, y as i32));
            }
        }
        for cell in &self.cells {
            dense[cell.y as usize * w + cell.x as usize] = *cell;
        }
        dense
    }

    /// Clear the grid and redraw it through a [`Canvas`].
    ///
    /// Reuses the existing allocation; the grid is sorted when `draw` returns.
    pub fn compose(&mut self, width: u16, height: u16, draw: impl FnOnce(&mut Canvas<'_>)) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        {
            let mut canvas = Canvas { grid: self };
            draw(&mut canvas);
        }
        self.cells.sort_unstable_by_key(|c| (c.y, c.x));
    }
}

/// Write access to a grid while it is being composed.
pub struct Canvas<'a> {
    grid: &'a mut GlyphGrid,
}

impl Canvas<'_> {
    pub fn width(&self) -> u16 {
        self.grid.width
    }

    pub fn height(&self) -> u16 {
        self.grid.height
    }

    /// Draw a cell; later draws at the same position win.
    ///
    /// Cells outside the grid are dropped and `false` is returned.
    pub fn put(&mut self, cell: Cell) -> bool {
        if !self.grid.in_bounds(cell.x, cell.y) {
            return false;
        }
        let existing = self
            .grid
            .cells
            .iter()
            .position(|c| c.x == cell.x && c.y == cell.y);
        match (existing, cell.is_background()) {
            (Some(i), true) => {
                self.grid.cells.swap_remove(i);
            }
            (Some(i), false) => self.grid.cells[i] = cell,
            (None, true) => {}
            (None, false) => self.grid.cells.push(cell),
        }
        true
    }
}
