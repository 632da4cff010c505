//! Conversions between points, pixels and the spreadsheet's native units
//!
//! Everything assumes 96 DPI: one point is 4/3 of a pixel. Column widths are
//! measured against the base font (10pt) regardless of the font used in a cell.
//! Row heights are stored natively in 1/20 point.

use crate::constants::*;
use crate::font::BASE_FONT_METRICS;

/// A length tagged with the unit it is expressed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Points(f64),
    Pixels(u32),
    /// 1/256 of the base character width
    NativeColumnUnit(u32),
    /// 1/20 of a point
    NativeRowUnit(u32),
}

impl Dimension {
    /// Convert to whole pixels, truncating
    pub fn to_pixels(self) -> u32 {
        match self {
            Dimension::Points(points) => points_to_pixels(points),
            Dimension::Pixels(pixels) => pixels,
            Dimension::NativeColumnUnit(width) => native_column_width_to_pixels(width),
            Dimension::NativeRowUnit(height) => native_row_height_to_pixels(height),
        }
    }

    /// Convert to points
    pub fn to_points(self) -> f64 {
        match self {
            Dimension::Points(points) => points,
            Dimension::Pixels(pixels) => pixels_to_points(pixels),
            Dimension::NativeColumnUnit(width) => {
                pixels_to_points(native_column_width_to_pixels(width))
            }
            Dimension::NativeRowUnit(height) => f64::from(height) / f64::from(ROW_HEIGHT_UNIT),
        }
    }
}

/// Pixels to points at 96 DPI
pub fn pixels_to_points(pixels: u32) -> f64 {
    POINTS_PER_PIXEL * f64::from(pixels)
}

/// Points to pixels, truncating toward zero
pub fn points_to_pixels(points: f64) -> u32 {
    (points / POINTS_PER_PIXEL) as u32
}

/// Pixel width to native column width, measured in base-font characters
pub fn pixels_to_column_width(pixels: u32) -> u32 {
    let char_width = f64::from(BASE_FONT_METRICS.pixel_width);
    (f64::from(pixels) / char_width * f64::from(COLUMN_WIDTH_UNIT)) as u32
}

/// Character column width (as shown in a spreadsheet UI) to native column width.
///
/// Adds the fixed cell padding before scaling, then rounds to the nearest unit.
pub fn column_width_to_native_column_width(column_width: f64) -> u32 {
    let char_width = f64::from(BASE_FONT_METRICS.pixel_width);
    let padded = (column_width * char_width + COLUMN_WIDTH_PADDING_PIXELS) / char_width;
    (padded * f64::from(COLUMN_WIDTH_UNIT)).round() as u32
}

/// Native column width back to pixels using integer arithmetic
pub fn native_column_width_to_pixels(native_width: u32) -> u32 {
    let pixels = u64::from(native_width) * u64::from(BASE_FONT_METRICS.pixel_width)
        / u64::from(COLUMN_WIDTH_UNIT);
    u32::try_from(pixels).unwrap_or(u32::MAX)
}

/// Points to native row units (1/20 point)
pub fn points_to_native_row_height(points: u32) -> u32 {
    points.saturating_mul(ROW_HEIGHT_UNIT)
}

/// Pixel height to native row height.
///
/// The intermediate point value is truncated to a whole point before scaling, so
/// 41px (30.75pt) stores the same height as 40px (30pt).
pub fn pixels_to_native_row_height(pixels: u32) -> u32 {
    points_to_native_row_height(pixels_to_points(pixels) as u32)
}

/// Native row units to pixels
pub fn native_row_height_to_pixels(native_height: u32) -> u32 {
    points_to_pixels(f64::from(native_height) / f64::from(ROW_HEIGHT_UNIT))
}

/// Pixel size of a font, taken straight from its point size
pub fn font_points_to_pixels(point_size: u16) -> u32 {
    points_to_pixels(f64::from(point_size))
}

/// Pixel offset to English Metric Units for drawing anchors
pub fn pixels_to_emu(pixels: i64) -> i64 {
    pixels * EMU_PER_PIXEL
}
