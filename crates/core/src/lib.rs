//! Core rendering module - pure, deterministic, and testable
//!
//! This crate turns a rotation angle (or pair of angles) into a finished
//! character frame. It never touches a terminal or does I/O, making it:
//!
//! - **Deterministic**: The same angles always produce the same frame
//! - **Testable**: Every optimization variant runs against one property suite
//! - **Fast**: No heap allocation after [`Engine::new`]
//!
//! # Module Structure
//!
//! - [`glyph`]: Immutable sprite grid with bounds-checked access
//! - [`surface`]: Parametric surfaces (knot, torus) for 3D mode
//! - [`transform`]: Inverse sprite mapping, surface rotation, perspective projection
//! - [`fixed`]: 16.16 fixed-point helpers for the incremental sprite walk
//! - [`bbox`]: Bounding box culling for sprite mode
//! - [`depth`]: Depth buffer for surface mode
//! - [`compose`]: Glyph selection and writes into the frame
//! - [`frame`]: The frame buffer
//! - [`engine`]: The engine tying the stages together
//! - [`pacer`]: Rotation state advanced once per tick
//!
//! # Example
//!
//! ```
//! use tui_spin_core::{Engine, GlyphGrid};
//! use tui_spin_types::{Anchor, EngineConfig, RenderMode, Rotation, Variant};
//!
//! let config = EngineConfig::from_variant(RenderMode::Sprite, Variant::FixedPoint)
//!     .with_anchor(Anchor::Center);
//! let sprite = GlyphGrid::from_lines(&["X"]).unwrap();
//! let mut engine = Engine::sprite(config, sprite).unwrap();
//!
//! let frame = engine.render(Rotation::default());
//! assert_eq!(frame.get(39, 10), Some('X'));
//! assert_eq!(frame.drawn_cells(), 1);
//! ```

pub mod bbox;
pub mod compose;
pub mod depth;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod frame;
pub mod glyph;
pub mod pacer;
pub mod surface;
pub mod transform;

pub use tui_spin_types as types;

// Re-export commonly used types for convenience
pub use bbox::BoundingBox;
pub use depth::DepthBuffer;
pub use engine::{Engine, GlyphSource, MAX_DIMENSION};
pub use error::EngineError;
pub use fixed::Fixed;
pub use frame::Frame;
pub use glyph::{GlyphGrid, BANANA};
pub use pacer::Pacer;
pub use surface::{builtin as builtin_surface, Domain, Knot, Point3, Surface, Torus};
pub use transform::{FixedInverseMap, InverseMap, Projected, Projection, SpritePivot, SurfaceTransform};
