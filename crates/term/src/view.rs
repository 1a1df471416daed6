//! GridView: paints an engine glyph grid into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write as _;

use crate::core::{FlightSnapshot, GlyphGrid};
use crate::fb::{CellStyle, FrameBuffer, Rgb, Style};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const STATUS_STYLE: CellStyle = CellStyle {
    fg: Rgb::new(200, 200, 200),
    bg: Rgb::new(30, 30, 40),
    attrs: Style::empty(),
};

/// Maps engine output onto the terminal, with an optional status line.
pub struct GridView {
    status_line: bool,
    status: String,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GridView {
    pub fn new(status_line: bool) -> Self {
        Self {
            status_line,
            status: String::with_capacity(128),
        }
    }

    /// Grid size the engine should be initialized with for a viewport.
    pub fn playfield(&self, viewport: Viewport) -> (u16, u16) {
        let reserved = u16::from(self.status_line && viewport.height > 1);
        (viewport.width, viewport.height - reserved)
    }

    /// Paint `grid` (and the status line, if enabled) into `fb`.
    ///
    /// Translucent cells are blended over their own background; the
    /// framebuffer is reused across frames.
    pub fn render_into(
        &mut self,
        grid: &GlyphGrid,
        status: Option<&FlightSnapshot>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(CellStyle::default().into_cell(' '));

        let (pw, ph) = self.playfield(viewport);
        for cell in grid.cells() {
            let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
                continue;
            };
            if x >= pw || y >= ph {
                continue;
            }
            let style = CellStyle {
                fg: cell.fg.over(cell.bg, cell.alpha),
                bg: cell.bg.over(Rgb::BLACK, cell.alpha),
                attrs: cell.style,
            };
            fb.set(x, y, style.into_cell(cell.glyph));
        }

        if ph < viewport.height {
            let y = viewport.height - 1;
            fb.fill_row(y, STATUS_STYLE.into_cell(' '));
            self.status.clear();
            match status {
                Some(s) => {
                    let _ = write!(
                        self.status,
                        " SPD {:4.1} FUEL {:5.1} POS {:.0},{:.0} HDG {:3.0}° T {:.1}s",
                        s.speed,
                        s.fuel,
                        s.x,
                        s.y,
                        s.heading.to_degrees(),
                        s.elapsed_secs
                    );
                }
                None => self.status.push_str(" waiting for engine"),
            }
            self.status.push_str("  [WASD] fly [r] restart [q] quit");
            fb.put_str(0, y, &self.status, STATUS_STYLE);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &mut self,
        grid: &GlyphGrid,
        status: Option<&FlightSnapshot>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(grid, status, viewport, &mut fb);
        fb
    }
}
