//! Surface-mode depth test against a brute-force recomputation.

use tui_spin::core::compose::{luminance, ramp_glyph};
use tui_spin::core::{
    builtin_surface, Engine, EngineError, Projection, Surface, SurfaceTransform, Torus,
};
use tui_spin::types::{EngineConfig, RenderMode, Rotation, SurfaceKind, Variant, BACKGROUND};

fn surface_config() -> EngineConfig {
    EngineConfig::from_variant(RenderMode::Surface, Variant::default())
}

/// Nearest sample per cell, first one winning ties, computed from scratch.
fn brute_force(surface: &dyn Surface, rotation: Rotation) -> (Vec<f64>, Vec<char>) {
    let config = surface_config();
    let (w, h) = (config.width as i32, config.height as i32);
    let mut depth = vec![0.0f64; (w * h) as usize];
    let mut glyphs = vec![BACKGROUND; (w * h) as usize];

    let transform = SurfaceTransform::new(rotation, config.view_offset);
    let projection = Projection::for_frame(config.width, config.height);
    let domain = surface.domain();
    for i in 0..domain.u_steps {
        for j in 0..domain.v_steps {
            let p = transform.apply(surface.point(i as f64 * domain.u_step, j as f64 * domain.v_step));
            assert!(p.z > 0.0);
            let s = projection.project(p);
            if s.x < 0 || s.x >= w || s.y < 0 || s.y >= h {
                continue;
            }
            let idx = (s.y * w + s.x) as usize;
            if s.ooz > depth[idx] {
                depth[idx] = s.ooz;
                glyphs[idx] = ramp_glyph(luminance(p)).unwrap_or(BACKGROUND);
            }
        }
    }
    (depth, glyphs)
}

#[test]
fn every_cell_shows_its_nearest_sample() {
    for kind in [SurfaceKind::Knot, SurfaceKind::Torus] {
        let mut engine = Engine::surface(surface_config(), builtin_surface(kind)).unwrap();
        for k in 0..12 {
            let rotation = Rotation::new(k as f64 * 0.53, k as f64 * 0.29);
            engine.render(rotation);
            let (depth, glyphs) = brute_force(builtin_surface(kind).as_ref(), rotation);
            assert_eq!(engine.depth().values(), depth.as_slice(), "{kind:?} step {k}");
            assert_eq!(engine.frame().cells(), glyphs.as_slice(), "{kind:?} step {k}");
        }
    }
}

#[test]
fn knot_is_visible_and_uses_ramp_glyphs() {
    let mut engine = Engine::surface(surface_config(), builtin_surface(SurfaceKind::Knot)).unwrap();
    let frame = engine.render(Rotation::default());
    assert!(frame.drawn_cells() > 20);
    assert!(frame
        .cells()
        .iter()
        .all(|&c| c == BACKGROUND || ".,-~:;=!*#$@".contains(c)));
}

#[test]
fn same_angles_give_same_frame() {
    let rotation = Rotation::new(1.3, 0.4);
    let mut a = Engine::surface(surface_config(), builtin_surface(SurfaceKind::Torus)).unwrap();
    let mut b = Engine::surface(surface_config(), builtin_surface(SurfaceKind::Torus)).unwrap();
    let first = a.render(rotation).clone();
    a.render(Rotation::new(2.0, 2.0));
    assert_eq!(&first, a.render(rotation));
    assert_eq!(&first, b.render(rotation));
}

#[test]
fn empty_cells_keep_zero_depth() {
    let mut engine = Engine::surface(surface_config(), builtin_surface(SurfaceKind::Torus)).unwrap();
    engine.render(Rotation::new(0.4, 0.9));
    let frame = engine.frame().clone();
    for (i, &ooz) in engine.depth().values().iter().enumerate() {
        if ooz == 0.0 {
            assert_eq!(frame.cells()[i], BACKGROUND);
        } else {
            assert!(ooz > 0.0);
        }
    }
}

#[test]
fn offset_must_clear_surface_extent() {
    let config = EngineConfig {
        view_offset: 3.0,
        ..surface_config()
    };
    let err = Engine::surface(config, Box::new(Torus::default())).unwrap_err();
    assert!(matches!(err, EngineError::OffsetTooSmall { .. }));

    let config = EngineConfig {
        view_offset: 3.01,
        ..surface_config()
    };
    assert!(Engine::surface(config, Box::new(Torus::default())).is_ok());
}
