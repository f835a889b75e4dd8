//! Pacer state: rotation angles, per-tick step, tick period.
//!
//! The pacer does not sleep itself; the frame loop asks it for the angles of
//! the current tick and for how long to wait before the next one. Each tick
//! renders with the angles from before that tick's advance.

use std::time::Duration;

use crate::types::{AngleStep, Rotation, TICK_MS};

#[derive(Debug, Clone)]
pub struct Pacer {
    period: Duration,
    step: AngleStep,
    rotation: Rotation,
    frames: u64,
}

impl Pacer {
    pub fn new(period: Duration, step: AngleStep) -> Self {
        Self {
            period,
            step,
            rotation: Rotation::default(),
            frames: 0,
        }
    }

    pub fn from_millis(tick_ms: u64, step: AngleStep) -> Self {
        Self::new(Duration::from_millis(tick_ms), step)
    }

    /// Start from a given rotation instead of zero.
    pub fn starting_at(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Angles to render this tick; advances the state for the next one.
    pub fn tick(&mut self) -> Rotation {
        let current = self.rotation;
        self.rotation.advance(self.step);
        self.frames += 1;
        current
    }

    /// Time left in the current tick after `elapsed` was spent rendering.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.period.saturating_sub(elapsed)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn step(&self) -> AngleStep {
        self.step
    }

    /// Number of ticks handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::from_millis(TICK_MS as u64, AngleStep::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_then_advances() {
        let mut pacer = Pacer::from_millis(30, AngleStep::new(0.04, 0.02));
        assert_eq!(pacer.tick(), Rotation::new(0.0, 0.0));
        assert_eq!(pacer.tick(), Rotation::new(0.04, 0.02));
        assert_eq!(pacer.frames(), 2);
        assert_eq!(pacer.rotation(), Rotation::new(0.08, 0.04));
    }

    #[test]
    fn remaining_saturates() {
        let pacer = Pacer::default();
        assert_eq!(pacer.period(), Duration::from_millis(30));
        assert_eq!(pacer.remaining(Duration::from_millis(10)), Duration::from_millis(20));
        assert_eq!(pacer.remaining(Duration::from_millis(45)), Duration::ZERO);
    }

    #[test]
    fn starting_rotation_is_respected() {
        let mut pacer = Pacer::default().starting_at(Rotation::new(1.0, 2.0));
        assert_eq!(pacer.tick(), Rotation::new(1.0, 2.0));
    }
}
