//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Full redraw on the first frame and on size changes, changed runs otherwise.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    enhanced_keys: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            enhanced_keys: false,
        }
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// Where the terminal supports it, key release events are requested so
    /// held keys can be tracked exactly.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.enhanced_keys {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.enhanced_keys {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and swaps buffers so the
    /// caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                self.buf.clear();
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                self.buf.clear();
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..fb.height() {
        if let Some(row) = fb.row(y) {
            print_run(out, &mut pen, 0, y, row)?;
        }
    }
    finish(out)
}

/// Encode only the runs of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    for_each_changed_run(prev, next, |x, y, len| match next.row(y) {
        Some(row) => {
            let from = usize::from(x);
            print_run(out, &mut pen, x, y, &row[from..from + usize::from(len)])
        }
        None => Ok(()),
    })?;
    finish(out)
}

/// Move to `(x, y)` and print `cells`, switching style only when it changes.
fn print_run(
    out: &mut Vec<u8>,
    pen: &mut Option<CellStyle>,
    x: u16,
    y: u16,
    cells: &[Cell],
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for cell in cells {
        if *pen != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            *pen = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

const ATTRIBUTES: [(Style, Attribute); 5] = [
    (Style::BOLD, Attribute::Bold),
    (Style::ITALIC, Attribute::Italic),
    (Style::UNDERLINE, Attribute::Underlined),
    (Style::DIM, Attribute::Dim),
    (Style::REVERSE, Attribute::Reverse),
];

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    for (flag, attr) in ATTRIBUTES {
        if style.attrs.contains(flag) {
            out.queue(SetAttribute(attr))?;
        }
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for every maximal run of cells that differ.
///
/// Every row counts as changed when the sizes differ.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    for y in 0..next.height() {
        let (old, new) = match (prev.row(y), next.row(y)) {
            (Some(old), Some(new)) if same_size => (old, new),
            _ => {
                f(0, y, next.width())?;
                continue;
            }
        };
        if old == new {
            continue;
        }

        let mut x = 0;
        while x < new.len() {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < new.len() && old[x] != new[x] {
                x += 1;
            }
            // Row length is a u16 width, so both bounds fit.
            f(start as u16, y, (x - start) as u16)?;
        }
    }
    Ok(())
}
