use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use tui_spin::core::{builtin_surface, Engine, GlyphGrid, Pacer};
use tui_spin::term::{encode_diff_into, DEFAULT_COLOR};
use tui_spin::types::{Anchor, AngleStep, EngineConfig, RenderMode, SurfaceKind, Variant};

struct CountingAlloc;

// Per-thread so tests running in parallel do not count each other.
thread_local! {
    static COUNT_ENABLED: Cell<bool> = const { Cell::new(false) };
    static ALLOC_COUNT: Cell<usize> = const { Cell::new(0) };
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn record_alloc() {
    if COUNT_ENABLED.try_with(Cell::get).unwrap_or(false) {
        let _ = ALLOC_COUNT.try_with(|c| c.set(c.get() + 1));
    }
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record_alloc();
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record_alloc();
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.with(|c| c.set(0));
    COUNT_ENABLED.with(|c| c.set(true));
    f();
    COUNT_ENABLED.with(|c| c.set(false));
    ALLOC_COUNT.with(Cell::get)
}

#[test]
fn sprite_render_is_allocation_free() {
    for variant in Variant::ALL {
        let config = EngineConfig::from_variant(RenderMode::Sprite, variant).with_anchor(Anchor::Center);
        let mut engine = Engine::sprite(config, GlyphGrid::banana().unwrap()).unwrap();
        let mut pacer = Pacer::from_millis(30, AngleStep::new(0.04, 0.0));

        let allocs = with_alloc_counting(|| {
            for _ in 0..300 {
                engine.render(pacer.tick());
            }
        });
        assert_eq!(allocs, 0, "{variant:?}");
    }
}

#[test]
fn surface_render_is_allocation_free() {
    for kind in [SurfaceKind::Knot, SurfaceKind::Torus] {
        let config = EngineConfig::from_variant(RenderMode::Surface, Variant::default());
        let mut engine = Engine::surface(config, builtin_surface(kind)).unwrap();
        let mut pacer = Pacer::from_millis(30, AngleStep::default());

        let allocs = with_alloc_counting(|| {
            for _ in 0..50 {
                engine.render(pacer.tick());
            }
        });
        assert_eq!(allocs, 0, "{kind:?}");
    }
}

#[test]
fn diff_encoding_is_allocation_free_after_warmup() {
    let config = EngineConfig::default().with_anchor(Anchor::Center);
    let mut engine = Engine::sprite(config, GlyphGrid::banana().unwrap()).unwrap();
    let mut pacer = Pacer::default();
    let mut prev = engine.render(pacer.tick()).clone();
    let mut out: Vec<u8> = Vec::with_capacity(1 << 16);

    // Warm-up sizes the output buffer.
    for _ in 0..20 {
        out.clear();
        let next = engine.render(pacer.tick());
        encode_diff_into(&prev, next, DEFAULT_COLOR, &mut out).unwrap();
        prev.copy_from(next);
    }

    let allocs = with_alloc_counting(|| {
        for _ in 0..100 {
            out.clear();
            let next = engine.render(pacer.tick());
            encode_diff_into(&prev, next, DEFAULT_COLOR, &mut out).unwrap();
            prev.copy_from(next);
        }
    });
    assert_eq!(allocs, 0);
}
