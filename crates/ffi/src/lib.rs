//! C ABI for desktop hosts.
//!
//! The engine lives behind an opaque handle. Every call returns a status code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | `0` | ok |
//! | `1` | engine used before initialize |
//! | `2` | invalid dimensions |
//! | `3` | input out of range (bad `dt`, control flag other than 0/1) |
//! | `-1` | null handle or output pointer |
//!
//! Rendered matrices are owned by the caller and must be released with
//! [`harvester_glyph_matrix_free`]. A failed render leaves an empty matrix
//! (null glyphs, zero sizes) in the output.

use std::ptr;

use harvester_core::{control_from_raw, Engine, EngineResult};
use harvester_types::Cell;

pub const HARVESTER_OK: i32 = 0;
pub const HARVESTER_NULL_POINTER: i32 = -1;

/// One glyph of a rendered matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvesterGlyph {
    pub x: i32,
    pub y: i32,
    pub glyph: i32,
    pub foreground_r: i32,
    pub foreground_g: i32,
    pub foreground_b: i32,
    pub background_r: i32,
    pub background_g: i32,
    pub background_b: i32,
    pub style: i32,
    pub alpha: f32,
}

impl From<&Cell> for HarvesterGlyph {
    fn from(c: &Cell) -> Self {
        Self {
            x: c.x,
            y: c.y,
            glyph: c.glyph as i32,
            foreground_r: i32::from(c.fg.r),
            foreground_g: i32::from(c.fg.g),
            foreground_b: i32::from(c.fg.b),
            background_r: i32::from(c.bg.r),
            background_g: i32::from(c.bg.g),
            background_b: i32::from(c.bg.b),
            style: c.style.bits() as i32,
            alpha: c.alpha,
        }
    }
}

/// Count-prefixed glyph array.
#[repr(C)]
#[derive(Debug)]
pub struct HarvesterGlyphMatrix {
    pub glyphs: *mut HarvesterGlyph,
    pub width: i32,
    pub height: i32,
    pub count: i32,
}

impl HarvesterGlyphMatrix {
    pub const EMPTY: HarvesterGlyphMatrix = HarvesterGlyphMatrix {
        glyphs: ptr::null_mut(),
        width: 0,
        height: 0,
        count: 0,
    };
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HarvesterEngineHandle(*mut Engine);

impl HarvesterEngineHandle {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

fn status(op: &str, result: EngineResult<()>) -> i32 {
    match result {
        Ok(()) => HARVESTER_OK,
        Err(e) => {
            tracing::warn!("{op} failed: {e}");
            e.code()
        }
    }
}

/// # Safety
///
/// `handle` must be null or come from [`harvester_engine_new`] and not yet be freed.
unsafe fn engine_mut<'a>(handle: HarvesterEngineHandle) -> Option<&'a mut Engine> {
    handle.0.as_mut()
}

#[no_mangle]
pub extern "C" fn harvester_engine_new() -> HarvesterEngineHandle {
    let engine = Box::new(Engine::new());
    HarvesterEngineHandle(Box::into_raw(engine))
}

/// # Safety
///
/// `handle` must be null or a live handle; it must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn harvester_engine_free(handle: HarvesterEngineHandle) {
    if !handle.0.is_null() {
        drop(Box::from_raw(handle.0));
    }
}

/// # Safety
///
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn harvester_initialize(
    handle: HarvesterEngineHandle,
    width: i32,
    height: i32,
) -> i32 {
    let Some(engine) = engine_mut(handle) else {
        return HARVESTER_NULL_POINTER;
    };
    status("initialize", engine.initialize(width, height))
}

/// # Safety
///
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn harvester_reset(handle: HarvesterEngineHandle) -> i32 {
    let Some(engine) = engine_mut(handle) else {
        return HARVESTER_NULL_POINTER;
    };
    engine.reset();
    HARVESTER_OK
}

/// Advance by `dt` seconds. Control flags must be `0` or `1`.
///
/// # Safety
///
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn harvester_step(
    handle: HarvesterEngineHandle,
    dt: f32,
    thrust: i32,
    brake: i32,
    left: i32,
    right: i32,
) -> i32 {
    let Some(engine) = engine_mut(handle) else {
        return HARVESTER_NULL_POINTER;
    };
    let result = control_from_raw(thrust, brake, left, right).and_then(|input| engine.step(dt, input));
    status("step", result)
}

/// Render into `out`.
///
/// # Safety
///
/// `handle` must be null or a live handle; `out` must be null or valid for writes.
/// Any matrix previously stored in `out` is overwritten, not freed.
#[no_mangle]
pub unsafe extern "C" fn harvester_render(
    handle: HarvesterEngineHandle,
    out: *mut HarvesterGlyphMatrix,
) -> i32 {
    let Some(out) = out.as_mut() else {
        return HARVESTER_NULL_POINTER;
    };
    *out = HarvesterGlyphMatrix::EMPTY;
    let Some(engine) = engine_mut(handle) else {
        return HARVESTER_NULL_POINTER;
    };
    let grid = match engine.render() {
        Ok(grid) => grid,
        Err(e) => return status("render", Err(e)),
    };

    let glyphs: Box<[HarvesterGlyph]> = grid.cells().iter().map(HarvesterGlyph::from).collect();
    out.width = i32::from(grid.width());
    out.height = i32::from(grid.height());
    out.count = glyphs.len() as i32;
    out.glyphs = if glyphs.is_empty() {
        ptr::null_mut()
    } else {
        Box::into_raw(glyphs) as *mut HarvesterGlyph
    };
    HARVESTER_OK
}

/// Release a matrix produced by [`harvester_render`].
///
/// # Safety
///
/// `matrix` must come from `harvester_render` and not have been freed.
#[no_mangle]
pub unsafe extern "C" fn harvester_glyph_matrix_free(matrix: HarvesterGlyphMatrix) {
    if matrix.glyphs.is_null() || matrix.count <= 0 {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(matrix.glyphs, matrix.count as usize);
    drop(Box::from_raw(slice));
}
