//! Depth buffer for surface mode.
//!
//! Holds, per cell, the largest inverse depth written this frame. Zero means
//! empty: every visible sample has `ooz > 0`, so the first sample on a cell
//! always wins.

use std::collections::TryReserveError;

use crate::frame::try_filled;

#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    width: u16,
    height: u16,
    values: Vec<f64>,
}

impl DepthBuffer {
    /// Buffer with no cells; used in sprite mode, never allocates.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            values: Vec::new(),
        }
    }

    pub fn try_new(width: u16, height: u16) -> Result<Self, TryReserveError> {
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            values: try_filled(len, 0.0)?,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.values.fill(0.0);
    }

    pub fn get(&self, x: u16, y: u16) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.values[y as usize * self.width as usize + x as usize])
    }

    /// Record `ooz` at flat index `idx` if it is strictly closer than what is
    /// stored. Returns whether the sample won.
    #[inline(always)]
    pub fn test_and_set(&mut self, idx: usize, ooz: f64) -> bool {
        match self.values.get_mut(idx) {
            Some(stored) if ooz > *stored => {
                *stored = ooz;
                true
            }
            _ => false,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_sample_wins() {
        let mut db = DepthBuffer::try_new(2, 1).unwrap();
        assert!(db.test_and_set(0, 0.2));
        assert!(!db.test_and_set(0, 0.1));
        assert!(db.test_and_set(0, 0.3));
        assert_eq!(db.get(0, 0), Some(0.3));
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let mut db = DepthBuffer::try_new(1, 1).unwrap();
        assert!(db.test_and_set(0, 0.25));
        assert!(!db.test_and_set(0, 0.25));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut db = DepthBuffer::try_new(1, 1).unwrap();
        assert!(!db.test_and_set(1, 1.0));
        assert!(!DepthBuffer::empty().test_and_set(0, 1.0));
    }

    #[test]
    fn clear_empties_buffer() {
        let mut db = DepthBuffer::try_new(3, 2).unwrap();
        db.test_and_set(4, 0.5);
        db.clear();
        assert!(db.values().iter().all(|&v| v == 0.0));
    }
}
