use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use harvester::core::{Engine, EngineConfig, GlyphGrid};
use harvester::term::{FrameBuffer, GridView, Viewport};
use harvester::types::ControlInput;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// Single test per binary: the counter is global.
#[test]
fn hot_paths_do_not_allocate() {
    let steer = ControlInput {
        left: true,
        ..ControlInput::IDLE
    };
    let fly = ControlInput {
        thrust: true,
        right: true,
        ..ControlInput::IDLE
    };

    // Full world, ship turning in place: the visible cell set is fixed.
    let mut engine = Engine::new();
    engine.initialize(80, 23).unwrap();
    let mut grid = GlyphGrid::new(80, 23);
    let mut view = GridView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(80, 24);

    // Ship-only world: free flight never changes the cell count.
    let mut solo = Engine::with_config(EngineConfig::empty());
    solo.initialize(40, 20).unwrap();
    let mut solo_grid = GlyphGrid::new(40, 20);

    // Warm-up.
    engine.step(1.0 / 60.0, steer).unwrap();
    engine.render_into(&mut grid).unwrap();
    let snap = engine.snapshot().unwrap();
    view.render_into(&grid, Some(&snap), viewport, &mut fb);
    solo.step(1.0 / 60.0, fly).unwrap();
    solo.render_into(&mut solo_grid).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            engine.step(1.0 / 60.0, steer).unwrap();
            engine.render_into(&mut grid).unwrap();
            let snap = engine.snapshot().unwrap();
            view.render_into(&grid, Some(&snap), viewport, &mut fb);
        }
        for i in 0..500 {
            let dt = if i % 50 == 0 { 2.0 } else { 1.0 / 60.0 };
            solo.step(dt, fly).unwrap();
            solo.render_into(&mut solo_grid).unwrap();
        }
    });

    assert_eq!(allocs, 0);
}
