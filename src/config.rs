//! Document-wide layout settings

use crate::constants::*;
use crate::error::Result;
use crate::resource::{FileFormat, render_default_icon};
use std::collections::HashMap;

/// Settings applied when a workbook and its sheets are created
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Font family given to every new cell
    pub base_font_name: String,
    /// Width of columns that were never sized, in characters
    pub default_column_width_chars: u32,
    /// Height of rows that were never sized
    pub default_row_height_points: f64,
    /// Edge length of the icon drawn for an embedded file
    pub file_icon_size_pixels: u32,
    /// Icon payloads (PNG) overriding the built-in placeholders
    pub icons: HashMap<FileFormat, Vec<u8>>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_font_name: BASE_FONT_NAME.to_string(),
            default_column_width_chars: DEFAULT_COLUMN_WIDTH_CHARS,
            default_row_height_points: DEFAULT_ROW_HEIGHT_POINTS,
            file_icon_size_pixels: FILE_ICON_SIZE_PIXELS,
            icons: HashMap::new(),
        }
    }
}

impl LayoutConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Font family for new cells
    pub fn with_base_font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.base_font_name = name.into();
        self
    }

    /// Width of unsized columns, in characters
    pub fn with_default_column_width(mut self, characters: u32) -> Self {
        self.default_column_width_chars = characters;
        self
    }

    /// Height of unsized rows, in points
    pub fn with_default_row_height(mut self, points: f64) -> Self {
        self.default_row_height_points = points;
        self
    }

    /// Edge length of file icons, in pixels
    pub fn with_file_icon_size(mut self, pixels: u32) -> Self {
        self.file_icon_size_pixels = pixels;
        self
    }

    /// Use `png` as the icon for files of `format`
    pub fn with_icon(mut self, format: FileFormat, png: Vec<u8>) -> Self {
        self.icons.insert(format, png);
        self
    }

    /// Icon payload for a format: the configured one, or a rendered placeholder
    pub fn icon_bytes(&self, format: FileFormat) -> Result<Vec<u8>> {
        match self.icons.get(&format) {
            Some(png) => Ok(png.clone()),
            None => render_default_icon(format, self.file_icon_size_pixels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.default_column_width_chars, 8);
        assert_eq!(config.default_row_height_points, 15.0);
        assert_eq!(config.file_icon_size_pixels, 30);
        assert!(config.icons.is_empty());
    }

    #[test]
    fn test_custom_icon_overrides_placeholder() {
        let config = LayoutConfig::new()
            .with_base_font_name("Arial")
            .with_icon(FileFormat::Pdf, vec![9, 9, 9]);

        assert_eq!(config.base_font_name, "Arial");
        assert_eq!(config.icon_bytes(FileFormat::Pdf).unwrap(), vec![9, 9, 9]);
        assert_ne!(config.icon_bytes(FileFormat::Word).unwrap(), vec![9, 9, 9]);
    }
}
