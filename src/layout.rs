//! Layout planning for content appended to a cell
//!
//! Appends are planned here without touching the document: the new cumulative text,
//! its estimated height and, for media, the anchor position. A plan that fails
//! validation leaves the cell exactly as it was.

use crate::document::{AnchorRect, CellHandle, DrawingHandle, StyleHandle};
use crate::error::{LayoutError, Result};
use crate::registry::AssetKind;
use crate::style::CellStyle;
use crate::text::TextEstimator;
use crate::units::pixels_to_emu;
use tracing::trace;

/// Pixel offsets of a drawing inside its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub dx1: i64,
    pub dy1: i64,
    pub dx2: i64,
    pub dy2: i64,
}

impl Position {
    /// Fails with `InvalidPosition` if any offset is negative
    pub fn new(dx1: i64, dy1: i64, dx2: i64, dy2: i64) -> Result<Self> {
        if dx1 < 0 || dy1 < 0 || dx2 < 0 || dy2 < 0 {
            return Err(LayoutError::InvalidPosition { dx1, dy1, dx2, dy2 });
        }
        Ok(Self { dx1, dy1, dx2, dy2 })
    }

    /// Anchor spanning the single cell at (row, col), offsets in EMU
    pub fn to_anchor(self, row: u32, col: u32) -> AnchorRect {
        AnchorRect {
            row1: row,
            col1: col,
            row2: row,
            col2: col,
            dx1: pixels_to_emu(self.dx1),
            dy1: pixels_to_emu(self.dy1),
            dx2: pixels_to_emu(self.dx2),
            dy2: pixels_to_emu(self.dy2),
        }
    }
}

/// A picture or file placed in a cell
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMedia {
    pub key: String,
    pub kind: AssetKind,
    pub drawing: DrawingHandle,
    pub anchor: AnchorRect,
}

/// Everything the engine remembers about one cell
#[derive(Debug, Clone)]
pub struct CellLayoutState {
    pub handle: CellHandle,
    /// Cumulative text; only ever grows
    pub text: String,
    pub style: CellStyle,
    pub style_handle: StyleHandle,
    pub placed: Vec<PlacedMedia>,
}

impl CellLayoutState {
    /// Point size used to measure this cell
    pub fn font_points(&self) -> u16 {
        self.style.font_points
    }
}

/// Outcome of appending text
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlan {
    pub text: String,
    pub height_pixels: u32,
}

/// Outcome of appending a picture or file icon
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlan {
    pub text: String,
    pub height_pixels: u32,
    pub width: u32,
    pub height: u32,
    pub position: Position,
}

/// Plan appending `appended` to `current`. Returns None for empty input.
pub fn plan_text(current: &str, appended: &str, estimator: &TextEstimator) -> Option<TextPlan> {
    if appended.is_empty() {
        return None;
    }
    let text = format!("{current}{appended}");
    let height_pixels = estimator.text_height_pixels(&text);
    Some(TextPlan {
        text,
        height_pixels,
    })
}

/// Shrink an image so neither side exceeds the column width, keeping its aspect ratio.
///
/// Images that already fit keep their size; nothing is ever enlarged.
pub fn fit_to_column(width: u32, height: u32, column_width_pixels: u32) -> (u32, u32) {
    if width <= column_width_pixels && height <= column_width_pixels {
        return (width, height);
    }
    let scale = f64::from(column_width_pixels) / f64::from(width.max(height));
    (
        (f64::from(width) * scale) as u32,
        (f64::from(height) * scale) as u32,
    )
}

/// Whether the next line of `text` starts fresh: the text is empty, or it ends in two
/// identical line breaks. A mixed "\n\r" tail does not count.
pub fn is_at_line_start(text: &str) -> bool {
    let mut tail = text.chars().rev();
    match (tail.next(), tail.next()) {
        (None, _) => true,
        (Some(last), Some(before)) => last == before && (last == '\n' || last == '\r'),
        _ => false,
    }
}

/// Plan placing a `width` x `height` pixel drawing below the text of a cell.
///
/// Enough line breaks are appended to cover the drawing: one per covered line plus one
/// to close the current line, minus one when the text is already at a line start. The
/// drawing starts at the height of the text before the append, inset by `padding`.
pub fn plan_media(
    current: &str,
    width: u32,
    height: u32,
    padding: i64,
    estimator: &TextEstimator,
) -> Result<MediaPlan> {
    let covered_lines = estimator.lines_for_height(height);
    let from_height = i64::from(estimator.text_height_pixels(current));

    let position = Position::new(
        padding,
        from_height + padding,
        i64::from(width) - padding,
        from_height + i64::from(height) - padding,
    )?;

    let breaks = covered_lines + 1 - u32::from(is_at_line_start(current));
    let mut text = String::with_capacity(current.len() + breaks as usize);
    text.push_str(current);
    text.extend(std::iter::repeat_n('\n', breaks as usize));

    let height_pixels = estimator.text_height_pixels(&text);
    trace!(
        "Media {}x{} covers {} lines, text grows by {} breaks",
        width, height, covered_lines, breaks
    );

    Ok(MediaPlan {
        text,
        height_pixels,
        width,
        height,
        position,
    })
}
