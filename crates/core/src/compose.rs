//! Compositor: turns visible samples into glyphs in the frame buffer.
//!
//! Sprite mode copies the sampled sprite glyph verbatim. Surface mode shades
//! each depth-test winner with a fixed linear light:
//! `L = -0.01 x + 0.01 y + 0.5`, mapped onto the 12-glyph luminance ramp.
//! Writes are plain assignment; there is no blending.

use crate::bbox::BoundingBox;
use crate::depth::DepthBuffer;
use crate::fixed::Fixed;
use crate::frame::Frame;
use crate::glyph::GlyphGrid;
use crate::surface::{Point3, Surface};
use crate::transform::{InverseMap, Projection, SpritePivot, SurfaceTransform};
use crate::types::{
    EngineConfig, Rotation, BACKGROUND, LIGHT_BIAS, LIGHT_X, LIGHT_Y, LUMINANCE_RAMP,
};

/// Illumination proxy for a rotated surface point.
#[inline(always)]
pub fn luminance(p: Point3) -> f64 {
    LIGHT_X * p.x + LIGHT_Y * p.y + LIGHT_BIAS
}

/// Ramp glyph for a luminance value; `None` when unlit (`L <= 0`).
#[inline(always)]
pub fn ramp_glyph(l: f64) -> Option<char> {
    if l <= 0.0 {
        return None;
    }
    let last = LUMINANCE_RAMP.len() - 1;
    let idx = ((l * LUMINANCE_RAMP.len() as f64) as usize).min(last);
    Some(LUMINANCE_RAMP[idx])
}

/// Rasterize a rotated sprite into a cleared frame.
///
/// A non-finite angle has no defined rotation and leaves the frame blank.
pub fn composite_sprite(
    grid: &GlyphGrid,
    pivot: &SpritePivot,
    config: &EngineConfig,
    angle: f64,
    frame: &mut Frame,
) {
    if !angle.is_finite() {
        return;
    }
    let bounds = if config.bounding_box {
        BoundingBox::covering(
            grid.width(),
            grid.height(),
            pivot,
            angle,
            frame.width(),
            frame.height(),
        )
    } else {
        BoundingBox::full(frame.width(), frame.height())
    };
    let Some(bounds) = bounds else {
        return;
    };

    let map = InverseMap::new(angle, pivot);
    let (x0, x1) = (bounds.x0 as usize, bounds.x1 as usize);

    if config.fixed_point {
        let fixed = map.to_fixed();
        let step = fixed.step_x();
        let mut start = fixed.start(bounds.x0, bounds.y0);
        for y in bounds.y0..=bounds.y1 {
            let row = &mut frame.row_mut(y)[x0..=x1];
            if config.unroll {
                sample_row_unrolled(grid, row, start, step);
            } else {
                sample_row_fixed(grid, row, start, step);
            }
            start = fixed.next_row(start);
        }
    } else {
        for y in bounds.y0..=bounds.y1 {
            let terms = map.row_terms(y);
            let row = &mut frame.row_mut(y)[x0..=x1];
            for (cell, x) in row.iter_mut().zip(bounds.x0..=bounds.x1) {
                let (sx, sy) = map.in_row(x, terms);
                if let Some(ch) = grid.get(sx.floor() as i32, sy.floor() as i32) {
                    *cell = ch;
                }
            }
        }
    }
}

#[inline(always)]
fn sample_fixed(grid: &GlyphGrid, x: Fixed, y: Fixed) -> Option<char> {
    grid.get(x.floor(), y.floor())
}

fn sample_row_fixed(grid: &GlyphGrid, row: &mut [char], start: (Fixed, Fixed), step: (Fixed, Fixed)) {
    let (mut sx, mut sy) = start;
    for cell in row.iter_mut() {
        if let Some(ch) = sample_fixed(grid, sx, sy) {
            *cell = ch;
        }
        sx += step.0;
        sy += step.1;
    }
}

/// Same result as [`sample_row_fixed`], four cells per iteration.
fn sample_row_unrolled(
    grid: &GlyphGrid,
    row: &mut [char],
    start: (Fixed, Fixed),
    step: (Fixed, Fixed),
) {
    let (mut sx, mut sy) = start;
    let (dx, dy) = step;
    let mut quads = row.chunks_exact_mut(4);
    for quad in &mut quads {
        if let Some(ch) = sample_fixed(grid, sx, sy) {
            quad[0] = ch;
        }
        if let Some(ch) = sample_fixed(grid, sx.step_by(dx, 1), sy.step_by(dy, 1)) {
            quad[1] = ch;
        }
        if let Some(ch) = sample_fixed(grid, sx.step_by(dx, 2), sy.step_by(dy, 2)) {
            quad[2] = ch;
        }
        if let Some(ch) = sample_fixed(grid, sx.step_by(dx, 3), sy.step_by(dy, 3)) {
            quad[3] = ch;
        }
        sx = sx.step_by(dx, 4);
        sy = sy.step_by(dy, 4);
    }
    sample_row_fixed(grid, quads.into_remainder(), (sx, sy), step);
}

/// Rasterize every sample of a surface into a cleared frame and depth buffer.
///
/// A sample that wins the depth test but is unlit clears its cell back to the
/// background, so the cell always shows the nearest sample.
pub fn composite_surface(
    surface: &dyn Surface,
    config: &EngineConfig,
    rotation: Rotation,
    frame: &mut Frame,
    depth: &mut DepthBuffer,
) {
    let transform = SurfaceTransform::new(rotation, config.view_offset);
    let projection = Projection::for_frame(frame.width(), frame.height());
    let domain = surface.domain();

    for i in 0..domain.u_steps {
        let u = i as f64 * domain.u_step;
        for j in 0..domain.v_steps {
            let v = j as f64 * domain.v_step;
            let p = transform.apply(surface.point(u, v));
            let s = projection.project(p);
            let Some(idx) = frame.index_of(s.x, s.y) else {
                continue;
            };
            if depth.test_and_set(idx, s.ooz) {
                frame.put(idx, ramp_glyph(luminance(p)).unwrap_or(BACKGROUND));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_ends() {
        assert_eq!(ramp_glyph(0.0), None);
        assert_eq!(ramp_glyph(-0.3), None);
        assert_eq!(ramp_glyph(0.01), Some('.'));
        assert_eq!(ramp_glyph(0.5), Some('='));
        assert_eq!(ramp_glyph(0.99), Some('@'));
        assert_eq!(ramp_glyph(3.0), Some('@'));
    }

    #[test]
    fn luminance_uses_fixed_coefficients() {
        assert_eq!(luminance(Point3::new(0.0, 0.0, 9.0)), 0.5);
        let l = luminance(Point3::new(10.0, -10.0, 0.0));
        assert!((l - 0.3).abs() < 1e-12);
    }

    #[test]
    fn unrolled_row_matches_plain_row() {
        let grid = GlyphGrid::from_lines(&["abcdefghij", "klmnopqrst"]).unwrap();
        let start = (Fixed::from_f64(-1.3), Fixed::from_f64(0.2));
        let step = (Fixed::from_f64(0.93), Fixed::from_f64(0.11));
        for len in 0..12 {
            let mut plain = vec![' '; len];
            let mut unrolled = vec![' '; len];
            sample_row_fixed(&grid, &mut plain, start, step);
            sample_row_unrolled(&grid, &mut unrolled, start, step);
            assert_eq!(plain, unrolled);
        }
    }
}
