//! Per-size character metrics for the base spreadsheet font
//!
//! There is no glyph rasterizer behind these numbers. They are pixel sizes of an
//! average character at each supported point size, measured once and kept as a
//! constant table. Sizes outside the table are rejected rather than interpolated.

use crate::constants::{BASE_FONT_POINTS, MAX_FONT_POINTS, MIN_FONT_POINTS};
use crate::error::{LayoutError, Result};

/// Character metrics for a single point size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetricsEntry {
    pub point_size: u16,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

const fn entry(point_size: u16, pixel_width: u32, pixel_height: u32) -> FontMetricsEntry {
    FontMetricsEntry {
        point_size,
        pixel_width,
        pixel_height,
    }
}

/// Metrics for 5pt through 21pt, indexed by `point_size - MIN_FONT_POINTS`
const FONT_TABLE: [FontMetricsEntry; (MAX_FONT_POINTS - MIN_FONT_POINTS + 1) as usize] = [
    entry(5, 4, 12),
    entry(6, 4, 13),
    entry(7, 5, 13),
    entry(8, 6, 16),
    entry(9, 7, 16),
    entry(10, 7, 18),
    entry(11, 8, 22),
    entry(12, 9, 23),
    entry(13, 9, 26),
    entry(14, 10, 27),
    entry(15, 11, 32),
    entry(16, 12, 35),
    entry(17, 13, 35),
    entry(18, 13, 35),
    entry(19, 14, 40),
    entry(20, 15, 42),
    entry(21, 15, 42),
];

/// Metrics of the base font, used for all column-width math
pub const BASE_FONT_METRICS: FontMetricsEntry =
    FONT_TABLE[(BASE_FONT_POINTS - MIN_FONT_POINTS) as usize];

/// Look up the metrics entry for a point size
pub fn metrics(point_size: u16) -> Result<FontMetricsEntry> {
    if !(MIN_FONT_POINTS..=MAX_FONT_POINTS).contains(&point_size) {
        return Err(LayoutError::OutOfRangeFontSize(point_size));
    }
    Ok(FONT_TABLE[(point_size - MIN_FONT_POINTS) as usize])
}

/// Width of an average character in pixels
pub fn character_width_pixels(point_size: u16) -> Result<u32> {
    metrics(point_size).map(|m| m.pixel_width)
}

/// Height of one rendered text line in pixels
pub fn character_height_pixels(point_size: u16) -> Result<u32> {
    metrics(point_size).map(|m| m.pixel_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_point_size() {
        for (offset, entry) in FONT_TABLE.iter().enumerate() {
            assert_eq!(entry.point_size, MIN_FONT_POINTS + offset as u16);
        }
    }

    #[test]
    fn test_base_font_metrics() {
        assert_eq!(BASE_FONT_METRICS.point_size, 10);
        assert_eq!(BASE_FONT_METRICS.pixel_width, 7);
        assert_eq!(BASE_FONT_METRICS.pixel_height, 18);
    }

    #[test]
    fn test_lookup_bounds() {
        assert_eq!(character_width_pixels(5).unwrap(), 4);
        assert_eq!(character_height_pixels(21).unwrap(), 42);
        assert_eq!(character_height_pixels(14).unwrap(), 27);

        assert!(matches!(
            metrics(4),
            Err(LayoutError::OutOfRangeFontSize(4))
        ));
        assert!(matches!(
            character_height_pixels(22),
            Err(LayoutError::OutOfRangeFontSize(22))
        ));
    }
}
