//! Frame buffer: the fixed character grid one frame is composited into.
//!
//! Allocated once, cleared at the start of every frame and read once by the
//! presenter. Storage is a single flat row-major vector.

use std::collections::TryReserveError;

use crate::fixed::in_range;
use crate::types::BACKGROUND;

/// Allocate a vector of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Copy>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, value);
    Ok(v)
}

/// 2D grid of glyphs, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Frame {
    /// Create a frame filled with the background glyph.
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![BACKGROUND; len],
        }
    }

    /// Fallible constructor used at engine startup.
    pub fn try_new(width: u16, height: u16) -> Result<Self, TryReserveError> {
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: try_filled(len, BACKGROUND)?,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Flat index of a signed cell coordinate, `None` outside the frame.
    #[inline(always)]
    pub(crate) fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if in_range(x, self.width as u32) && in_range(y, self.height as u32) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, idx: usize, ch: char) {
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = ch;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Write a glyph; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Reset every cell to the background glyph.
    pub fn clear(&mut self) {
        self.cells.fill(BACKGROUND);
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[char] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.cells[start..start + w]
    }

    pub(crate) fn row_mut(&mut self, y: u16) -> &mut [char] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &mut self.cells[start..start + w]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Overwrite this frame with `other` without reallocating.
    ///
    /// Both frames must share dimensions; mismatched frames are left untouched
    /// and `false` is returned.
    pub fn copy_from(&mut self, other: &Frame) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.cells.copy_from_slice(&other.cells);
        true
    }

    /// Count cells holding something other than the background glyph.
    pub fn drawn_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != BACKGROUND).count()
    }
}
