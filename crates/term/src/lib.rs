//! Terminal host rendering.
//!
//! Paints engine glyph grids into a simple framebuffer and flushes it to a
//! terminal backend. No widgets or layout engine: one engine cell is one
//! terminal cell.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Only write changed runs to the terminal
//! - Blend translucent glyphs on the host side, where the palette is known

pub mod fb;
pub mod renderer;
pub mod view;

pub use harvester_core as core;
pub use harvester_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{GridView, Viewport};
