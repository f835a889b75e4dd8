use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("sprite has no glyphs")]
    EmptySprite,
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    EmptyFrame { width: u16, height: u16 },
    #[error("{what} dimension {value} exceeds the supported maximum {max}")]
    TooLarge {
        what: &'static str,
        value: u32,
        max: u32,
    },
    #[error("view offset {offset} must exceed surface extent {extent}")]
    OffsetTooSmall { offset: f64, extent: f64 },
    #[error("engine mode {mode} does not match glyph source {source_kind}")]
    SourceMismatch {
        mode: &'static str,
        source_kind: &'static str,
    },
    #[error("allocation failed at startup: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
