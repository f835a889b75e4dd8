//! Command-line and environment configuration.
//!
//! Every option can also be set through a `TUI_SPIN_*` environment variable;
//! flags on the command line win.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::{builtin_surface, GlyphGrid, GlyphSource};
use crate::types::{
    Anchor, AngleStep, EngineConfig, RenderMode, SurfaceKind, Variant, ANGLE_STEP_A, ANGLE_STEP_B,
    TICK_MS, VIEW_OFFSET,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tui-spin",
    version,
    about = "Spin an ASCII sprite or a parametric surface in the terminal"
)]
pub struct Cli {
    /// What to render: sprite (2D) or surface (3D)
    #[arg(long, env = "TUI_SPIN_MODE", default_value = "sprite", value_parser = parse_mode)]
    pub mode: RenderMode,

    /// Optimization preset: reference, clipped, fixed-point, unrolled
    #[arg(long, env = "TUI_SPIN_VARIANT", default_value = "fixed-point", value_parser = parse_variant)]
    pub variant: Variant,

    /// Override the preset's fixed-point setting
    #[arg(long, value_name = "BOOL")]
    pub fixed_point: Option<bool>,

    /// Override the preset's bounding-box setting
    #[arg(long, value_name = "BOOL")]
    pub bounding_box: Option<bool>,

    /// Override the preset's loop unrolling setting
    #[arg(long, value_name = "BOOL")]
    pub unroll: Option<bool>,

    /// Surface to render in surface mode: knot or torus
    #[arg(long, env = "TUI_SPIN_SURFACE", default_value = "knot", value_parser = parse_surface)]
    pub surface: SurfaceKind,

    /// Sprite placement: top-left or center
    #[arg(long, env = "TUI_SPIN_ANCHOR", default_value = "top-left", value_parser = parse_anchor)]
    pub anchor: Anchor,

    /// Text file holding a custom sprite (default: the built-in banana)
    #[arg(long, env = "TUI_SPIN_SPRITE")]
    pub sprite: Option<PathBuf>,

    /// Milliseconds per frame
    #[arg(long, env = "TUI_SPIN_TICK_MS", default_value_t = TICK_MS as u64)]
    pub tick_ms: u64,

    /// Radians added to angle A every frame
    #[arg(long, env = "TUI_SPIN_STEP_A", default_value_t = ANGLE_STEP_A, allow_negative_numbers = true, value_parser = parse_finite)]
    pub step_a: f64,

    /// Radians added to angle B every frame (default: 0.02 for surfaces, 0 for sprites)
    #[arg(long, env = "TUI_SPIN_STEP_B", allow_negative_numbers = true, value_parser = parse_finite)]
    pub step_b: Option<f64>,

    /// Distance the surface is pushed away from the viewer
    #[arg(long, env = "TUI_SPIN_OFFSET", default_value_t = VIEW_OFFSET, value_parser = parse_finite)]
    pub offset: f64,

    /// Stop after this many frames (0 runs until interrupted)
    #[arg(long, env = "TUI_SPIN_FRAMES", default_value_t = 0)]
    pub frames: u64,

    /// Write whole frames to stdout without the alternate screen
    #[arg(long, env = "TUI_SPIN_PLAIN")]
    pub plain: bool,

    /// Where log output goes (stdout belongs to the animation)
    #[arg(long, env = "TUI_SPIN_LOG_FILE", default_value = "/tmp/tui-spin.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Engine configuration: preset first, then individual overrides.
    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_variant(self.mode, self.variant).with_anchor(self.anchor);
        if let Some(v) = self.fixed_point {
            config.fixed_point = v;
        }
        if let Some(v) = self.bounding_box {
            config.bounding_box = v;
        }
        if let Some(v) = self.unroll {
            config.unroll = v;
        }
        config.view_offset = self.offset;
        config
    }

    pub fn angle_step(&self) -> AngleStep {
        let b = self.step_b.unwrap_or(match self.mode {
            RenderMode::Sprite => 0.0,
            RenderMode::Surface => ANGLE_STEP_B,
        });
        AngleStep::new(self.step_a, b)
    }

    /// Build the glyph source for the selected mode.
    pub fn load_source(&self) -> Result<GlyphSource> {
        match self.mode {
            RenderMode::Sprite => {
                let grid = match &self.sprite {
                    Some(path) => {
                        let text = fs::read_to_string(path)
                            .with_context(|| format!("reading sprite {}", path.display()))?;
                        GlyphGrid::from_text(&text)
                            .with_context(|| format!("parsing sprite {}", path.display()))?
                    }
                    None => GlyphGrid::banana()?,
                };
                Ok(GlyphSource::Sprite(grid))
            }
            RenderMode::Surface => Ok(GlyphSource::Surface(builtin_surface(self.surface))),
        }
    }
}

fn parse_mode(s: &str) -> Result<RenderMode, String> {
    RenderMode::from_str(s).ok_or_else(|| format!("unknown mode '{s}' (expected sprite or surface)"))
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s).ok_or_else(|| {
        format!("unknown variant '{s}' (expected reference, clipped, fixed-point or unrolled)")
    })
}

fn parse_surface(s: &str) -> Result<SurfaceKind, String> {
    SurfaceKind::from_str(s).ok_or_else(|| format!("unknown surface '{s}' (expected knot or torus)"))
}

/// Angles and distances must be real numbers; `NaN` and `inf` are rejected.
fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("'{s}' is not a number: {e}"))?;
    if !v.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }
    Ok(v)
}

fn parse_anchor(s: &str) -> Result<Anchor, String> {
    Anchor::from_str(s).ok_or_else(|| format!("unknown anchor '{s}' (expected top-left or center)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["tui-spin"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn toggles_override_preset() {
        let cli = parse(&["--variant", "reference", "--bounding-box", "true"]);
        let config = cli.engine_config();
        assert!(!config.fixed_point);
        assert!(config.bounding_box);
    }

    #[test]
    fn step_b_defaults_by_mode() {
        assert_eq!(parse(&["--mode", "sprite"]).angle_step().b, 0.0);
        assert_eq!(parse(&["--mode", "surface"]).angle_step().b, ANGLE_STEP_B);
        assert_eq!(parse(&["--mode", "3d", "--step-b", "-0.1"]).angle_step().b, -0.1);
    }

    #[test]
    fn rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["tui-spin", "--variant", "turbo"]).is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for flag in ["--step-a", "--step-b", "--offset"] {
            for value in ["NaN", "inf", "-inf", "abc"] {
                let argv = ["tui-spin", flag, value];
                assert!(Cli::try_parse_from(argv).is_err(), "{flag} {value}");
            }
        }
        assert_eq!(parse(&["--step-a", "-0.5"]).step_a, -0.5);
        assert_eq!(parse(&["--offset", "7"]).offset, 7.0);
    }

    #[test]
    fn surface_mode_loads_builtin_surface() {
        let cli = parse(&["--mode", "surface", "--surface", "torus"]);
        assert!(matches!(cli.load_source().unwrap(), GlyphSource::Surface(_)));
        assert_eq!(cli.engine_config().mode, RenderMode::Surface);
    }
}
