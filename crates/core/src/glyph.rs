//! Glyph grid: the immutable sprite rendered in sprite mode.
//!
//! Rows shorter than the longest one are padded with the background glyph, so
//! the grid is a plain `width * height` rectangle stored in one contiguous
//! buffer. All access goes through bounds-checked accessors.

use crate::engine::MAX_DIMENSION;
use crate::error::{EngineError, Result};
use crate::fixed::in_range;
use crate::frame::try_filled;
use crate::types::BACKGROUND;

/// The banana sprite.
pub const BANANA: [&str; 14] = [
    "_",
    "//\\",
    "V  \\",
    " \\  \\_",
    "  \\,'.`-.",
    "   |\\ `. `.       ",
    "   ( \\  `. `-.                        _,.-:\\",
    "    \\ \\   `.  `-._             __..--' ,-';/",
    "     \\ `.   `-.   `-..___..---'   _.--' ,'/",
    "      `. `.    `-._        __..--'    ,' /",
    "        `. `-_     ``--..''       _.-' ,'",
    "          `-_ `-.___        __,--'   ,'",
    "             `-.__  `----\"\"\"    __.-'",
    "                `--..____..--'",
];

/// Rectangular, immutable table of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl GlyphGrid {
    /// Build a grid from rows of text.
    ///
    /// Width is the longest row measured in chars. Fails when there is nothing
    /// to draw (no rows, or only empty rows), or when either side exceeds
    /// [`MAX_DIMENSION`]; both checks run before any cell is allocated.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let height = lines.len();
        let width = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(EngineError::EmptySprite);
        }
        check_side("sprite width", width)?;
        check_side("sprite height", height)?;

        let mut cells = try_filled(width * height, BACKGROUND)?;
        for (y, line) in lines.iter().enumerate() {
            let row = &mut cells[y * width..(y + 1) * width];
            for (cell, ch) in row.iter_mut().zip(line.as_ref().chars()) {
                *cell = ch;
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            cells,
        })
    }

    /// Build a grid from a block of text, one row per line.
    ///
    /// Windows line endings are accepted; a single trailing newline does not
    /// add an empty row.
    pub fn from_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        Self::from_lines(&lines)
    }

    /// The built-in banana sprite.
    pub fn banana() -> Result<Self> {
        Self::from_lines(&BANANA)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Glyph at `(x, y)`, or `None` outside the declared extent.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        if in_range(x, self.width) && in_range(y, self.height) {
            Some(self.cells[(y as usize) * (self.width as usize) + (x as usize)])
        } else {
            None
        }
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width as usize)
    }
}

fn check_side(what: &'static str, len: usize) -> Result<()> {
    if len > MAX_DIMENSION as usize {
        return Err(EngineError::TooLarge {
            what,
            value: u32::try_from(len).unwrap_or(u32::MAX),
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banana_dimensions() {
        let grid = GlyphGrid::banana().unwrap();
        assert_eq!(grid.height(), 14);
        assert_eq!(grid.width(), 44);
        assert_eq!(grid.get(0, 0), Some('_'));
        assert_eq!(grid.get(1, 0), Some(' '));
    }

    #[test]
    fn short_rows_are_padded() {
        let grid = GlyphGrid::from_lines(&["ab", "c"]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(1, 1), Some(BACKGROUND));
    }

    #[test]
    fn out_of_extent_is_none() {
        let grid = GlyphGrid::from_lines(&["ab", "cd"]).unwrap();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(1, 1), Some('d'));
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let grid = GlyphGrid::from_lines(&["é█"]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(1, 0), Some('█'));
    }

    #[test]
    fn from_text_strips_carriage_returns() {
        let grid = GlyphGrid::from_text("ab\r\ncd\r\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(1, 0), Some('b'));
    }

    #[test]
    fn oversized_sprite_is_rejected_before_allocating() {
        let side = MAX_DIMENSION as usize;
        let wide = ["x".repeat(side + 1)];
        assert!(matches!(
            GlyphGrid::from_lines(&wide),
            Err(EngineError::TooLarge { what: "sprite width", .. })
        ));
        let tall = vec![""; side + 1];
        assert!(matches!(
            GlyphGrid::from_lines(&tall),
            Err(EngineError::EmptySprite)
        ));
        let tall = vec!["x"; side + 1];
        assert!(matches!(
            GlyphGrid::from_lines(&tall),
            Err(EngineError::TooLarge { what: "sprite height", .. })
        ));
        assert_eq!(GlyphGrid::from_lines(&["x".repeat(side)]).unwrap().width(), side as u32);
    }

    #[test]
    fn empty_sprite_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            GlyphGrid::from_lines(&empty),
            Err(EngineError::EmptySprite)
        ));
        assert!(matches!(
            GlyphGrid::from_text("\n\n"),
            Err(EngineError::EmptySprite)
        ));
    }
}
