//! Bounding box culling for sprite mode.
//!
//! The sprite rectangle is pushed through the forward rotation, the projected
//! corners are rounded outward and widened by one cell, then clamped to the
//! frame. Cells outside the box are never sampled. The extra cell absorbs the
//! half-cell sampling offset and the fixed-point rounding error, so the box is
//! always a superset of the cells a full-frame pass would draw.

use crate::transform::SpritePivot;

/// Inclusive cell rectangle `x0..=x1, y0..=y1` inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl BoundingBox {
    /// The whole frame. `None` for a frame without cells.
    pub fn full(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x0: 0,
            y0: 0,
            x1: width - 1,
            y1: height - 1,
        })
    }

    /// Box covering a `sprite_w x sprite_h` sprite rotated by `angle` about
    /// `pivot`, clipped to the frame.
    ///
    /// Returns `None` when the rotated sprite lies entirely off-frame.
    pub fn covering(
        sprite_w: u32,
        sprite_h: u32,
        pivot: &SpritePivot,
        angle: f64,
        width: u16,
        height: u16,
    ) -> Option<Self> {
        let (sin, cos) = angle.sin_cos();
        let (w, h) = (sprite_w as f64, sprite_h as f64);

        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (sx, sy) in [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)] {
            let dx = sx - pivot.sprite.0;
            let dy = sy - pivot.sprite.1;
            let px = dx * cos - dy * sin + pivot.screen.0;
            let py = dx * sin + dy * cos + pivot.screen.1;
            min = (min.0.min(px), min.1.min(py));
            max = (max.0.max(px), max.1.max(py));
        }

        let x0 = min.0.floor() as i64 - 1;
        let y0 = min.1.floor() as i64 - 1;
        let x1 = max.0.ceil() as i64 + 1;
        let y1 = max.1.ceil() as i64 + 1;

        let (wl, hl) = (width as i64, height as i64);
        if wl == 0 || hl == 0 || x1 < 0 || y1 < 0 || x0 >= wl || y0 >= hl {
            return None;
        }

        Some(Self {
            x0: x0.max(0) as u16,
            y0: y0.max(0) as u16,
            x1: x1.min(wl - 1) as u16,
            y1: y1.min(hl - 1) as u16,
        })
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}
