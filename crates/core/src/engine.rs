//! Engine: one renderer for every variant.
//!
//! The engine owns the frame buffer, the depth buffer and the glyph source. It
//! is built once at startup, where every buffer is allocated, and afterwards
//! `render` only clears and rewrites those buffers in place.

use log::debug;

use crate::compose::{composite_sprite, composite_surface};
use crate::depth::DepthBuffer;
use crate::error::{EngineError, Result};
use crate::frame::Frame;
use crate::glyph::GlyphGrid;
use crate::surface::Surface;
use crate::transform::SpritePivot;
use crate::types::{EngineConfig, RenderMode, Rotation};

/// Largest frame or sprite dimension the 16.16 accumulators can address.
pub const MAX_DIMENSION: u32 = 2048;

/// What the engine draws.
pub enum GlyphSource {
    Sprite(GlyphGrid),
    Surface(Box<dyn Surface + Send>),
}

impl GlyphSource {
    pub fn mode(&self) -> RenderMode {
        match self {
            GlyphSource::Sprite(_) => RenderMode::Sprite,
            GlyphSource::Surface(_) => RenderMode::Surface,
        }
    }
}

impl std::fmt::Debug for GlyphSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphSource::Sprite(grid) => f
                .debug_tuple("Sprite")
                .field(&(grid.width(), grid.height()))
                .finish(),
            GlyphSource::Surface(s) => f.debug_tuple("Surface").field(&s.name()).finish(),
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    source: Option<GlyphSource>,
    pivot: Option<SpritePivot>,
    frame: Frame,
    depth: DepthBuffer,
}

impl Engine {
    /// Validate the configuration against the source and allocate all buffers.
    pub fn new(config: EngineConfig, source: GlyphSource) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(EngineError::EmptyFrame {
                width: config.width,
                height: config.height,
            });
        }
        check_dimension("frame width", config.width as u32)?;
        check_dimension("frame height", config.height as u32)?;

        if config.mode != source.mode() {
            return Err(EngineError::SourceMismatch {
                mode: config.mode.as_str(),
                source_kind: source.mode().as_str(),
            });
        }

        let (pivot, depth) = match &source {
            GlyphSource::Sprite(grid) => {
                check_dimension("sprite width", grid.width())?;
                check_dimension("sprite height", grid.height())?;
                let pivot = SpritePivot::place(
                    config.anchor,
                    grid.width(),
                    grid.height(),
                    config.width,
                    config.height,
                );
                (Some(pivot), DepthBuffer::empty())
            }
            GlyphSource::Surface(surface) => {
                // z > 0 for every sample: rotation keeps |p| <= extent.
                let extent = surface.extent();
                if !(config.view_offset > extent) {
                    return Err(EngineError::OffsetTooSmall {
                        offset: config.view_offset,
                        extent,
                    });
                }
                (None, DepthBuffer::try_new(config.width, config.height)?)
            }
        };

        let frame = Frame::try_new(config.width, config.height)?;
        debug!(
            "engine ready: {:?} {}x{} fixed_point={} bounding_box={} unroll={}",
            source, config.width, config.height, config.fixed_point, config.bounding_box, config.unroll
        );

        Ok(Self {
            config,
            source: Some(source),
            pivot,
            frame,
            depth,
        })
    }

    /// Sprite-mode engine for `grid`.
    pub fn sprite(config: EngineConfig, grid: GlyphGrid) -> Result<Self> {
        Self::new(
            EngineConfig {
                mode: RenderMode::Sprite,
                ..config
            },
            GlyphSource::Sprite(grid),
        )
    }

    /// Surface-mode engine for `surface`.
    pub fn surface(config: EngineConfig, surface: Box<dyn Surface + Send>) -> Result<Self> {
        Self::new(
            EngineConfig {
                mode: RenderMode::Surface,
                ..config
            },
            GlyphSource::Surface(surface),
        )
    }

    /// Render one frame for `rotation` and return it.
    ///
    /// The output depends only on `rotation` and the construction arguments.
    /// After [`Engine::release`] the frame stays blank.
    pub fn render(&mut self, rotation: Rotation) -> &Frame {
        self.frame.clear();
        match (&self.source, &self.pivot) {
            (Some(GlyphSource::Sprite(grid)), Some(pivot)) => {
                composite_sprite(grid, pivot, &self.config, rotation.a, &mut self.frame);
            }
            (Some(GlyphSource::Surface(surface)), _) => {
                self.depth.clear();
                composite_surface(
                    surface.as_ref(),
                    &self.config,
                    rotation,
                    &mut self.frame,
                    &mut self.depth,
                );
            }
            _ => {}
        }
        &self.frame
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Depth values of the most recent surface-mode frame.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn source(&self) -> Option<&GlyphSource> {
        self.source.as_ref()
    }

    pub fn pivot(&self) -> Option<&SpritePivot> {
        self.pivot.as_ref()
    }

    /// Cleanup hook: drop the glyph source and blank the frame.
    pub fn release(&mut self) {
        if self.source.take().is_some() {
            debug!("engine released glyph source");
        }
        self.frame.clear();
        self.depth.clear();
    }

    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }
}

fn check_dimension(what: &'static str, value: u32) -> Result<()> {
    if value > MAX_DIMENSION {
        return Err(EngineError::TooLarge {
            what,
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
