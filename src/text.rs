//! Line-count and height estimation for wrapped cell text
//!
//! Without glyph metrics, each character is assigned a weight relative to a full-width
//! character (see [`char_weight`]) and a line holds `max_chars_per_line` weight units.

use crate::error::Result;
use crate::font;
use crate::units::font_points_to_pixels;
use tracing::trace;

/// Width weight of a character, as a fraction of a full-width character.
///
/// Newlines are line separators and never reach this function in [`line_count`].
pub fn char_weight(ch: char) -> f64 {
    match ch {
        '"' | '\'' | '.' | ',' => 0.0,
        'l' | 'i' | 'j' => 0.25,
        '(' | ')' | '{' | '}' | '[' | ']' | '!' | 'f' | 't' | 'I' => 0.3333,
        ' ' | '-' | '_' | '*' | '0'..='9' | 'a'..='z' => 0.5,
        'A'..='Z' => 0.8,
        _ => 1.0,
    }
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Count the visual lines `text` occupies when wrapped at `max_chars_per_line` weight units.
///
/// A newline closes the pending run as `ceil(weight / max)` lines, or counts one blank
/// line when nothing is pending. The final run is flushed only when the text does not
/// end in a newline.
pub fn line_count(text: &str, max_chars_per_line: f64) -> u32 {
    let mut lines: u32 = 0;
    let mut pending = 0.0;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if is_line_break(ch) {
            if pending > 0.0 {
                lines = lines.saturating_add((pending / max_chars_per_line).ceil() as u32);
                pending = 0.0;
            } else {
                lines = lines.saturating_add(1);
            }
            continue;
        }

        pending += char_weight(ch);

        if chars.peek().is_none() {
            lines = lines.saturating_add((pending / max_chars_per_line).ceil() as u32);
        }
    }

    lines
}

/// Weight units that fit on one line of a column.
///
/// Uses the font's point size converted straight to pixels, not the width table.
/// Never less than one so that very narrow columns still produce a finite count.
pub fn max_chars_per_line(column_width_pixels: u32, font_points: u16) -> f64 {
    let font_pixels = font_points_to_pixels(font_points).max(1);
    f64::from((column_width_pixels / font_pixels).max(1))
}

/// Text measurement for one column width and font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEstimator {
    pub max_chars_per_line: f64,
    pub line_height_pixels: u32,
}

impl TextEstimator {
    /// Fails with `OutOfRangeFontSize` when the font has no table entry
    pub fn new(column_width_pixels: u32, font_points: u16) -> Result<Self> {
        let line_height_pixels = font::character_height_pixels(font_points)?;
        Ok(Self {
            max_chars_per_line: max_chars_per_line(column_width_pixels, font_points),
            line_height_pixels,
        })
    }

    /// Visual line count of `text` in this column
    pub fn line_count(&self, text: &str) -> u32 {
        line_count(text, self.max_chars_per_line)
    }

    /// Estimated pixel height of `text` once wrapped
    pub fn text_height_pixels(&self, text: &str) -> u32 {
        let lines = self.line_count(text);
        trace!(
            "Estimated {} lines at {} chars per line",
            lines, self.max_chars_per_line
        );
        lines.saturating_mul(self.line_height_pixels)
    }

    /// Number of text lines needed to cover `height_pixels`
    pub fn lines_for_height(&self, height_pixels: u32) -> u32 {
        height_pixels.div_ceil(self.line_height_pixels)
    }
}
