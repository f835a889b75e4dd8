//! Shared types module - constants and plain data used by every crate
//!
//! Everything here is dependency-free data: frame geometry, timing, the luminance
//! ramp, the fixed-point format, rotation state and the configuration enums that
//! select one of the renderer variants.
//!
//! # Frame Geometry
//!
//! The frame is a fixed character grid:
//!
//! - **Width**: 80 columns (indexed 0-79)
//! - **Height**: 22 rows (indexed 0-21)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 30 | Fixed interval between frames |
//! | `ANGLE_STEP_A` | 0.04 | Radians added to angle A per frame |
//! | `ANGLE_STEP_B` | 0.02 | Radians added to angle B per frame (surface mode) |
//!
//! # Examples
//!
//! ```
//! use tui_spin_types::{AngleStep, EngineConfig, RenderMode, Rotation, Variant};
//!
//! let mode = RenderMode::from_str("sprite").unwrap();
//! let config = EngineConfig::from_variant(mode, Variant::FixedPoint);
//! assert!(config.fixed_point);
//! assert!(config.bounding_box);
//!
//! let mut rotation = Rotation::default();
//! rotation.advance(AngleStep::new(0.04, 0.0));
//! assert_eq!(rotation.a, 0.04);
//! ```

/// Frame width in character cells (80 columns)
pub const SCREEN_WIDTH: u16 = 80;

/// Frame height in character cells (22 rows)
pub const SCREEN_HEIGHT: u16 = 22;

/// Interval between frames in milliseconds
pub const TICK_MS: u32 = 30;

/// Per-frame increment of angle A in radians
pub const ANGLE_STEP_A: f64 = 0.04;

/// Per-frame increment of angle B in radians (surface mode only)
pub const ANGLE_STEP_B: f64 = 0.02;

/// Glyph every cell holds after a clear
pub const BACKGROUND: char = ' ';

/// Luminance ramp ordered from sparse to dense
pub const LUMINANCE_RAMP: [char; 12] = ['.', ',', '-', '~', ':', ';', '=', '!', '*', '#', '$', '@'];

/// Fractional bits of the 16.16 fixed-point format
pub const FIXED_SHIFT: u32 = 16;

/// 1.0 in 16.16 fixed point
pub const FIXED_ONE: i32 = 1 << FIXED_SHIFT;

/// Distance the surface is pushed away from the viewer before projecting
pub const VIEW_OFFSET: f64 = 5.0;

/// Horizontal projection scale (about twice the vertical one for cell aspect)
pub const PROJECTION_SCALE_X: f64 = 50.0;

/// Vertical projection scale
pub const PROJECTION_SCALE_Y: f64 = 15.0;

/// Illumination coefficients: `L = LIGHT_X * x + LIGHT_Y * y + LIGHT_BIAS`
pub const LIGHT_X: f64 = -0.01;
pub const LIGHT_Y: f64 = 0.01;
pub const LIGHT_BIAS: f64 = 0.5;


/// Rotation state: two angles in radians
///
/// Angles only ever grow; periodicity of the trigonometric functions makes an
/// explicit wrap unnecessary. Sprite mode reads `a` only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub a: f64,
    pub b: f64,
}

impl Rotation {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Advance both angles by one step.
    pub fn advance(&mut self, step: AngleStep) {
        self.a += step.a;
        self.b += step.b;
    }
}

/// Per-tick angle increments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleStep {
    pub a: f64,
    pub b: f64,
}

impl AngleStep {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

impl Default for AngleStep {
    fn default() -> Self {
        Self::new(ANGLE_STEP_A, ANGLE_STEP_B)
    }
}

/// Which glyph source the engine renders
///
/// - **Sprite**: a static 2D glyph grid spun about its center (pull mapping)
/// - **Surface**: a parametric 3D surface projected with a depth buffer (push mapping)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    #[default]
    Sprite,
    Surface,
}

impl RenderMode {
    /// Parse mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_types::RenderMode;
    ///
    /// assert_eq!(RenderMode::from_str("Sprite"), Some(RenderMode::Sprite));
    /// assert_eq!(RenderMode::from_str("2d"), Some(RenderMode::Sprite));
    /// assert_eq!(RenderMode::from_str("3d"), Some(RenderMode::Surface));
    /// assert_eq!(RenderMode::from_str("mesh"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sprite" | "2d" => Some(RenderMode::Sprite),
            "surface" | "3d" => Some(RenderMode::Surface),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Sprite => "sprite",
            RenderMode::Surface => "surface",
        }
    }
}

/// Named presets for the sprite rasterizer optimizations
///
/// Each preset adds one optimization on top of the previous one; all of them
/// produce the same frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Floating-point transform on every pixel of the frame
    Reference,
    /// Floating-point transform restricted to the bounding box
    Clipped,
    /// 16.16 incremental transform restricted to the bounding box
    #[default]
    FixedPoint,
    /// Fixed point with the row loop processing four pixels per iteration
    Unrolled,
}

impl Variant {
    /// Parse variant from string (case-insensitive, `-` and `_` interchangeable)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_spin_types::Variant;
    ///
    /// assert_eq!(Variant::from_str("fixed-point"), Some(Variant::FixedPoint));
    /// assert_eq!(Variant::from_str("FIXED_POINT"), Some(Variant::FixedPoint));
    /// assert_eq!(Variant::from_str("unrolled"), Some(Variant::Unrolled));
    /// assert_eq!(Variant::from_str("turbo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "reference" | "naive" => Some(Variant::Reference),
            "clipped" | "bbox" => Some(Variant::Clipped),
            "fixed-point" | "fixed" => Some(Variant::FixedPoint),
            "unrolled" => Some(Variant::Unrolled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Reference => "reference",
            Variant::Clipped => "clipped",
            Variant::FixedPoint => "fixed-point",
            Variant::Unrolled => "unrolled",
        }
    }

    /// All presets, in order of increasing optimization.
    pub const ALL: [Variant; 4] = [
        Variant::Reference,
        Variant::Clipped,
        Variant::FixedPoint,
        Variant::Unrolled,
    ];
}

/// Where the sprite sits inside the frame
///
/// - **TopLeft**: sprite cell (0, 0) lands on frame cell (0, 0)
/// - **Center**: sprite is centered, origin `((W - w) / 2, (H - h) / 2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    Center,
}

impl Anchor {
    /// Parse anchor from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "top-left" | "topleft" => Some(Anchor::TopLeft),
            "center" | "centre" => Some(Anchor::Center),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::Center => "center",
        }
    }
}

/// Built-in parametric surfaces for surface mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceKind {
    /// Three-lobed knot swept by a single parameter
    #[default]
    Knot,
    /// Classic torus swept by ring and tube angles
    Torus,
}

impl SurfaceKind {
    /// Parse surface kind from string (case-insensitive)
    ///
    /// ```
    /// use tui_spin_types::SurfaceKind;
    ///
    /// assert_eq!(SurfaceKind::from_str("donut"), Some(SurfaceKind::Torus));
    /// assert_eq!(SurfaceKind::from_str("knot"), Some(SurfaceKind::Knot));
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "knot" | "trefoil" => Some(SurfaceKind::Knot),
            "torus" | "donut" => Some(SurfaceKind::Torus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Knot => "knot",
            SurfaceKind::Torus => "torus",
        }
    }
}

/// Engine configuration: one engine, every variant
///
/// `fixed_point`, `bounding_box` and `unroll` only affect sprite mode; surface
/// mode always pushes every sample through the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub mode: RenderMode,
    pub fixed_point: bool,
    pub bounding_box: bool,
    pub unroll: bool,
    pub anchor: Anchor,
    pub width: u16,
    pub height: u16,
    /// Translation away from the viewer applied to surface points
    pub view_offset: f64,
}

impl EngineConfig {
    /// Build a configuration from a named preset.
    pub fn from_variant(mode: RenderMode, variant: Variant) -> Self {
        let (fixed_point, bounding_box, unroll) = match variant {
            Variant::Reference => (false, false, false),
            Variant::Clipped => (false, true, false),
            Variant::FixedPoint => (true, true, false),
            Variant::Unrolled => (true, true, true),
        };
        Self {
            mode,
            fixed_point,
            bounding_box,
            unroll,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Sprite,
            fixed_point: true,
            bounding_box: true,
            unroll: false,
            anchor: Anchor::TopLeft,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            view_offset: VIEW_OFFSET,
        }
    }
}
