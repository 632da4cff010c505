//! Constants for unit conversion and default sheet geometry

/// Points per pixel at 96 DPI
pub const POINTS_PER_PIXEL: f64 = 0.75;

/// Native column width units per character (1/256 of the base character width)
pub const COLUMN_WIDTH_UNIT: u32 = 256;

/// Native row height units per point (twips)
pub const ROW_HEIGHT_UNIT: u32 = 20;

/// Fixed padding, in pixels, added when converting a character column width to native units
pub const COLUMN_WIDTH_PADDING_PIXELS: f64 = 5.0;

/// Drawing anchor offsets are stored in English Metric Units
pub const EMU_PER_PIXEL: i64 = 9525;

/// Font size used for every column-width pixel approximation
pub const BASE_FONT_POINTS: u16 = 10;

/// Default font family of new documents
pub const BASE_FONT_NAME: &str = "Malgun Gothic";

/// Smallest font size with an entry in the metrics table
pub const MIN_FONT_POINTS: u16 = 5;

/// Largest font size with an entry in the metrics table
pub const MAX_FONT_POINTS: u16 = 21;

/// Default column width, in characters
pub const DEFAULT_COLUMN_WIDTH_CHARS: u32 = 8;

/// Default row height in points
pub const DEFAULT_ROW_HEIGHT_POINTS: f64 = 15.0;

/// Edge length of the icon shown for an embedded file
pub const FILE_ICON_SIZE_PIXELS: u32 = 30;
