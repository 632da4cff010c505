//! Styling passed through to the document model for each cell

use crate::constants::{BASE_FONT_NAME, BASE_FONT_POINTS};
use serde::Serialize;

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color from RGB components
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Alignment {
    #[default]
    General,
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
}

/// One side of a cell border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Border {
    pub style: BorderStyle,
    pub color: Option<Color>,
}

/// Sides of a cell, for per-side border setters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];
}

/// Styling for a cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellStyle {
    pub font_name: String,
    /// Also drives line-height estimation for the cell
    pub font_points: u16,
    pub bold: bool,
    pub font_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
    pub wrap_text: bool,
    pub border_top: Border,
    pub border_bottom: Border,
    pub border_left: Border,
    pub border_right: Border,
    /// Number format code, e.g. "#,##0"
    pub data_format: Option<String>,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            font_name: BASE_FONT_NAME.to_string(),
            font_points: BASE_FONT_POINTS,
            bold: false,
            font_color: None,
            fill_color: None,
            alignment: Alignment::General,
            vertical_alignment: VerticalAlignment::Middle,
            wrap_text: false,
            border_top: Border::default(),
            border_bottom: Border::default(),
            border_left: Border::default(),
            border_right: Border::default(),
            data_format: None,
        }
    }
}

impl CellStyle {
    /// Style given to every newly selected cell: top-aligned with wrapping on
    pub fn wrapped() -> Self {
        Self {
            vertical_alignment: VerticalAlignment::Top,
            wrap_text: true,
            ..Default::default()
        }
    }

    /// Border of one side
    pub fn border_mut(&mut self, side: Side) -> &mut Border {
        match side {
            Side::Top => &mut self.border_top,
            Side::Bottom => &mut self.border_bottom,
            Side::Left => &mut self.border_left,
            Side::Right => &mut self.border_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_style() {
        let style = CellStyle::wrapped();
        assert!(style.wrap_text);
        assert_eq!(style.vertical_alignment, VerticalAlignment::Top);
        assert_eq!(style.font_points, 10);
        assert_eq!(style.font_name, "Malgun Gothic");
    }

    #[test]
    fn test_border_sides() {
        let mut style = CellStyle::default();
        for side in Side::ALL {
            style.border_mut(side).style = BorderStyle::Thin;
        }
        style.border_mut(Side::Left).color = Some(Color::rgb(255, 0, 0));

        assert_eq!(style.border_top.style, BorderStyle::Thin);
        assert_eq!(style.border_right.style, BorderStyle::Thin);
        assert_eq!(style.border_left.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(style.border_bottom.color, None);
    }
}
