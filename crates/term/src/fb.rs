//! Framebuffer and style types for terminal rendering.

pub use crate::types::{Rgb, Style};

/// Per-cell colors and attributes as the terminal will show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub attrs: Style,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            attrs: Style::empty(),
        }
    }
}

impl CellStyle {
    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Row-major screen contents, one [`Cell`] per terminal column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        fb.resize(width, height);
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the size, keeping the allocation when it is large enough.
    /// Contents are unspecified afterwards; callers repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    fn offset(&self, y: u16) -> usize {
        usize::from(y) * usize::from(self.width)
    }

    /// One full row, or `None` below the last row.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset(y);
        Some(&self.cells[start..start + usize::from(self.width)])
    }

    fn row_mut(&mut self, y: u16) -> Option<&mut [Cell]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset(y);
        let end = start + usize::from(self.width);
        Some(&mut self.cells[start..end])
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y)?.get(usize::from(x)).copied()
    }

    /// Write one cell; out-of-range positions are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.row_mut(y).and_then(|r| r.get_mut(usize::from(x))) {
            *slot = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn fill_row(&mut self, y: u16, cell: Cell) {
        if let Some(row) = self.row_mut(y) {
            row.fill(cell);
        }
    }

    /// Write `s` from column `x`, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let Some(row) = self.row_mut(y) else {
            return;
        };
        let tail = row.iter_mut().skip(usize::from(x));
        for (slot, ch) in tail.zip(s.chars()) {
            *slot = style.into_cell(ch);
        }
    }

    /// Text content of one row (for tests and debugging).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .map(|r| r.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.put_str(2, 1, "fuel", CellStyle::default());
        assert_eq!(fb.row_text(1), "  fue");
        assert_eq!(fb.row_text(0), "     ");
        assert_eq!(fb.row_text(2), "");
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 3);
        let star = CellStyle::default().into_cell('*');
        fb.set(3, 0, star);
        fb.set(0, 3, star);
        fb.fill_row(7, star);
        assert!(fb.row(0).unwrap().iter().all(|c| *c == Cell::default()));
        assert_eq!(fb.get(3, 0), None);
    }

    #[test]
    fn resize_changes_row_length() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.resize(6, 2);
        assert_eq!(fb.row(1).map(<[Cell]>::len), Some(6));
        assert!(fb.row(2).is_none());
    }
}
