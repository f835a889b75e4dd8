//! Transform stage.
//!
//! Sprite mode pulls: every output cell asks which sprite cell lands on it by
//! rotating the vector from the pivot to the cell center by `-A`. Surface mode
//! pushes: every surface sample is rotated by `A` and `B`, pushed away from the
//! viewer and perspective-projected onto the frame.
//!
//! Cells are sampled at their centers (`x + 0.5`), so angle zero maps every
//! cell onto a sprite coordinate half a unit away from any integer boundary.

use crate::fixed::Fixed;
use crate::surface::Point3;
use crate::types::{Anchor, Rotation, PROJECTION_SCALE_X, PROJECTION_SCALE_Y};

/// Where the sprite rotates about, in sprite space and in frame space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePivot {
    /// Pivot in sprite coordinates (the sprite's center)
    pub sprite: (f64, f64),
    /// The same point in frame coordinates
    pub screen: (f64, f64),
}

impl SpritePivot {
    /// Place a `sprite_w x sprite_h` sprite inside a `frame_w x frame_h` frame.
    pub fn place(anchor: Anchor, sprite_w: u32, sprite_h: u32, frame_w: u16, frame_h: u16) -> Self {
        let (ox, oy) = match anchor {
            Anchor::TopLeft => (0, 0),
            Anchor::Center => (
                (frame_w as i64 - sprite_w as i64).div_euclid(2),
                (frame_h as i64 - sprite_h as i64).div_euclid(2),
            ),
        };
        let sprite = (sprite_w as f64 / 2.0, sprite_h as f64 / 2.0);
        Self {
            sprite,
            screen: (ox as f64 + sprite.0, oy as f64 + sprite.1),
        }
    }

    /// Frame cell holding sprite cell (0, 0) at angle zero.
    pub fn origin(&self) -> (f64, f64) {
        (self.screen.0 - self.sprite.0, self.screen.1 - self.sprite.1)
    }
}

/// Per-frame inverse mapping from frame cells to sprite coordinates.
///
/// `src = R(-A) * (p + 0.5 - screen_pivot) + sprite_pivot`, expanded into
/// `src_x = x * cos - y * sin + const_x` and `src_y = x * sin + y * cos + const_y`.
///
/// Each frame cell is sampled at its centre `p + 0.5`, not at its top-left
/// corner as in the C++ banana. At any non-zero angle the picture therefore
/// sits half a cell away from that program's output; in exchange angle zero is
/// an exact copy and a half turn an exact point reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseMap {
    cos: f64,
    sin: f64,
    const_x: f64,
    const_y: f64,
}

impl InverseMap {
    pub fn new(angle: f64, pivot: &SpritePivot) -> Self {
        let (sin, cos) = (-angle).sin_cos();
        let dx = 0.5 - pivot.screen.0;
        let dy = 0.5 - pivot.screen.1;
        Self {
            cos,
            sin,
            const_x: dx * cos - dy * sin + pivot.sprite.0,
            const_y: dx * sin + dy * cos + pivot.sprite.1,
        }
    }

    /// Row-dependent terms, computed once per row.
    #[inline(always)]
    pub fn row_terms(&self, y: u16) -> (f64, f64) {
        let y = y as f64;
        (self.const_x - y * self.sin, self.const_y + y * self.cos)
    }

    /// Source coordinate of cell `x` in a row prepared by [`Self::row_terms`].
    #[inline(always)]
    pub fn in_row(&self, x: u16, row: (f64, f64)) -> (f64, f64) {
        let x = x as f64;
        (x * self.cos + row.0, x * self.sin + row.1)
    }

    /// Source coordinate of cell `(x, y)`.
    pub fn source_of(&self, x: u16, y: u16) -> (f64, f64) {
        self.in_row(x, self.row_terms(y))
    }

    /// Source cell of `(x, y)`, floored to integers.
    pub fn source_cell(&self, x: u16, y: u16) -> (i32, i32) {
        let (sx, sy) = self.source_of(x, y);
        (sx.floor() as i32, sy.floor() as i32)
    }

    /// Convert to the 16.16 incremental form.
    pub fn to_fixed(&self) -> FixedInverseMap {
        FixedInverseMap {
            cos: Fixed::from_f64(self.cos),
            sin: Fixed::from_f64(self.sin),
            base_x: Fixed::from_f64(self.const_x),
            base_y: Fixed::from_f64(self.const_y),
        }
    }
}

/// 16.16 version of [`InverseMap`].
///
/// Moving one cell right adds `(cos, sin)`; moving one row down adds
/// `(-sin, cos)`. All arithmetic is integer, so every traversal order yields
/// the same accumulator for a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInverseMap {
    cos: Fixed,
    sin: Fixed,
    base_x: Fixed,
    base_y: Fixed,
}

impl FixedInverseMap {
    /// Accumulators for cell `(x, y)`.
    #[inline]
    pub fn start(&self, x: u16, y: u16) -> (Fixed, Fixed) {
        let (x, y) = (x as i32, y as i32);
        (
            self.base_x.step_by(self.cos, x).step_by(self.sin, -y),
            self.base_y.step_by(self.sin, x).step_by(self.cos, y),
        )
    }

    /// Step from a cell to its right neighbour.
    #[inline(always)]
    pub fn step_x(&self) -> (Fixed, Fixed) {
        (self.cos, self.sin)
    }

    /// Move row-start accumulators one row down.
    #[inline(always)]
    pub fn next_row(&self, start: (Fixed, Fixed)) -> (Fixed, Fixed) {
        (start.0 - self.sin, start.1 + self.cos)
    }

    /// Source cell of `(x, y)` recovered by arithmetic shift.
    pub fn source_cell(&self, x: u16, y: u16) -> (i32, i32) {
        let (sx, sy) = self.start(x, y);
        (sx.floor(), sy.floor())
    }
}

/// Per-frame rotation of surface points by angles A and B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    cos_a: f64,
    sin_a: f64,
    cos_b: f64,
    sin_b: f64,
    offset: f64,
}

impl SurfaceTransform {
    pub fn new(rotation: Rotation, offset: f64) -> Self {
        let (sin_a, cos_a) = rotation.a.sin_cos();
        let (sin_b, cos_b) = rotation.b.sin_cos();
        Self {
            cos_a,
            sin_a,
            cos_b,
            sin_b,
            offset,
        }
    }

    /// Rotate by B about z, then by A about x, then translate by `offset` along z.
    ///
    /// Rotation preserves length, so `z >= offset - |p|` and stays positive
    /// whenever the offset exceeds the surface extent.
    #[inline]
    pub fn apply(&self, p: Point3) -> Point3 {
        let xy = p.x * self.sin_b + p.y * self.cos_b;
        Point3::new(
            p.x * self.cos_b - p.y * self.sin_b,
            self.sin_a * p.z + self.cos_a * xy,
            self.cos_a * p.z - self.sin_a * xy + self.offset,
        )
    }
}

/// A projected sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: i32,
    pub y: i32,
    /// Inverse depth, larger is closer
    pub ooz: f64,
}

/// Perspective projection onto the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center_x: f64,
    pub center_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Projection {
    /// Centered projection with the reference scales.
    pub fn for_frame(width: u16, height: u16) -> Self {
        Self {
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            scale_x: PROJECTION_SCALE_X,
            scale_y: PROJECTION_SCALE_Y,
        }
    }

    /// `z` must be positive; [`SurfaceTransform`] guarantees it for validated offsets.
    #[inline]
    pub fn project(&self, p: Point3) -> Projected {
        let ooz = 1.0 / p.z;
        Projected {
            x: (self.center_x + self.scale_x * ooz * p.x).floor() as i32,
            y: (self.center_y + self.scale_y * ooz * p.y).floor() as i32,
            ooz,
        }
    }
}
