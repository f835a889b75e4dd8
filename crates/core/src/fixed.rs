//! 16.16 fixed-point helpers for the incremental sprite transform.
//!
//! Cosine and sine are converted once per frame; every per-pixel step after that
//! is an integer add. Because integer addition is exact, advancing an
//! accumulator `n` times by `d` gives exactly `start + n * d`, so a row can be
//! entered at any column and still land on the same values as a walk from
//! column zero.

use crate::types::{FIXED_ONE, FIXED_SHIFT};

/// A real number scaled by 2^16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ONE: Fixed = Fixed(FIXED_ONE);

    /// Nearest fixed-point value to `v`.
    #[inline]
    pub fn from_f64(v: f64) -> Self {
        Fixed((v * FIXED_ONE as f64).round() as i32)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_ONE as f64
    }

    /// Integer part, rounding toward negative infinity (arithmetic shift).
    #[inline(always)]
    pub fn floor(self) -> i32 {
        self.0 >> FIXED_SHIFT
    }

    /// `self + n * step`, exact in integer arithmetic.
    #[inline(always)]
    pub fn step_by(self, step: Fixed, n: i32) -> Fixed {
        Fixed(self.0 + n * step.0)
    }
}

impl std::ops::Add for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Fixed {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Fixed {
    type Output = Fixed;

    #[inline(always)]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl std::ops::SubAssign for Fixed {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

/// `0 <= v < len` in one comparison.
///
/// Casting to unsigned wraps negatives to huge values, so "too small" and
/// "too large" fall into the same branch.
#[inline(always)]
pub fn in_range(v: i32, len: u32) -> bool {
    (v as u32) < len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_arithmetic_shift() {
        assert_eq!(Fixed::from_f64(2.75).floor(), 2);
        assert_eq!(Fixed::from_f64(-0.25).floor(), -1);
        assert_eq!(Fixed::from_f64(-2.0).floor(), -2);
        assert_eq!(Fixed::ONE.floor(), 1);
    }

    #[test]
    fn conversion_is_within_half_ulp() {
        for v in [0.0, 0.5, -0.707_106_78, 0.999_999, 13.25] {
            let back = Fixed::from_f64(v).to_f64();
            assert!((back - v).abs() <= 0.5 / FIXED_ONE as f64);
        }
    }

    #[test]
    fn incremental_walk_matches_direct_multiply() {
        let start = Fixed::from_f64(3.3);
        let step = Fixed::from_f64(-0.8414);
        let mut acc = start;
        for n in 0..200 {
            assert_eq!(acc, start.step_by(step, n));
            acc += step;
        }
    }

    #[test]
    fn unsigned_range_check_matches_signed() {
        for v in -5..15 {
            assert_eq!(in_range(v, 10), (0..10).contains(&v));
        }
        assert!(!in_range(i32::MIN, 10));
        assert!(!in_range(0, 0));
    }
}
