//! Parametric surfaces for surface mode.
//!
//! A surface maps a two-parameter domain to 3D points and is sampled on a fixed
//! grid every frame; nothing is stored. Each surface also reports its extent,
//! the largest distance from the origin any sample can reach, which is what the
//! engine checks the view offset against.

use std::f64::consts::TAU;

use crate::types::SurfaceKind;

/// A point in object space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Sampling grid over `[0, TAU) x [0, TAU)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub u_step: f64,
    pub u_steps: u32,
    pub v_step: f64,
    pub v_steps: u32,
}

impl Domain {
    /// Cover a full turn in each parameter with the given step sizes.
    pub fn full_turn(u_step: f64, v_step: f64) -> Self {
        Self {
            u_step,
            u_steps: (TAU / u_step).ceil() as u32,
            v_step,
            v_steps: (TAU / v_step).ceil() as u32,
        }
    }

    /// Single-parameter curve: only `u` varies.
    pub fn curve(u_step: f64) -> Self {
        Self {
            u_step,
            u_steps: (TAU / u_step).ceil() as u32,
            v_step: 0.0,
            v_steps: 1,
        }
    }
}

/// A continuous surface sampled at fixed steps.
pub trait Surface {
    fn point(&self, u: f64, v: f64) -> Point3;

    fn domain(&self) -> Domain;

    /// Upper bound on `point(u, v).norm()` over the whole domain.
    fn extent(&self) -> f64;

    fn name(&self) -> &'static str;
}

/// Three-lobed knot: `((2 + cos 2t) cos 3t, (2 + cos 2t) sin 3t, sin 2t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    pub step: f64,
}

impl Default for Knot {
    fn default() -> Self {
        Self { step: 0.03 }
    }
}

impl Surface for Knot {
    fn point(&self, t: f64, _v: f64) -> Point3 {
        let r = 2.0 + (2.0 * t).cos();
        Point3::new(r * (3.0 * t).cos(), r * (3.0 * t).sin(), (2.0 * t).sin())
    }

    fn domain(&self) -> Domain {
        Domain::curve(self.step)
    }

    fn extent(&self) -> f64 {
        // |p|^2 = (2 + cos 2t)^2 + sin^2 2t = 5 + 4 cos 2t <= 9
        3.0
    }

    fn name(&self) -> &'static str {
        "knot"
    }
}

/// Torus lying in the xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    /// Tube radius
    pub r1: f64,
    /// Distance from the center to the middle of the tube
    pub r2: f64,
    /// Step around the tube
    pub theta_step: f64,
    /// Step around the ring
    pub phi_step: f64,
}

impl Default for Torus {
    fn default() -> Self {
        Self {
            r1: 1.0,
            r2: 2.0,
            theta_step: 0.07,
            phi_step: 0.02,
        }
    }
}

impl Surface for Torus {
    fn point(&self, theta: f64, phi: f64) -> Point3 {
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        let ring = self.r2 + self.r1 * cos_t;
        Point3::new(ring * cos_p, ring * sin_p, self.r1 * sin_t)
    }

    fn domain(&self) -> Domain {
        Domain::full_turn(self.theta_step, self.phi_step)
    }

    fn extent(&self) -> f64 {
        self.r1.abs() + self.r2.abs()
    }

    fn name(&self) -> &'static str {
        "torus"
    }
}

/// Box one of the built-in surfaces.
pub fn builtin(kind: SurfaceKind) -> Box<dyn Surface + Send> {
    match kind {
        SurfaceKind::Knot => Box::new(Knot::default()),
        SurfaceKind::Torus => Box::new(Torus::default()),
    }
}
