//! Sheet-level geometry and the sheet cursor

use crate::cell::CellMut;
use crate::cell_ref::parse_cell_range;
use crate::document::{DocumentModel, SheetHandle};
use crate::error::{LayoutError, Result};
use crate::layout::CellLayoutState;
use crate::units::*;
use crate::workbook::Workbook;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Pixel geometry of one sheet, plus the layout state of every selected cell
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub handle: SheetHandle,
    pub name: String,
    pub default_column_width_pixels: u32,
    pub default_row_height_pixels: u32,
    pub column_widths: HashMap<u32, u32>,
    pub row_heights: HashMap<u32, u32>,
    pub cells: HashMap<(u32, u32), CellLayoutState>,
}

impl SheetLayout {
    /// Empty layout with the given default geometry
    pub fn new(
        handle: SheetHandle,
        name: String,
        default_column_width_pixels: u32,
        default_row_height_pixels: u32,
    ) -> Self {
        Self {
            handle,
            name,
            default_column_width_pixels,
            default_row_height_pixels,
            column_widths: HashMap::new(),
            row_heights: HashMap::new(),
            cells: HashMap::new(),
        }
    }

    /// Width of a column in pixels
    pub fn column_width_pixels(&self, col: u32) -> u32 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width_pixels)
    }

    /// Height of a row in pixels
    pub fn row_height_pixels(&self, row: u32) -> u32 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height_pixels)
    }

    /// Layout state of a cell, if it was ever selected
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellLayoutState> {
        self.cells.get(&(row, col))
    }
}

/// Cursor over one sheet of a workbook.
///
/// Setters consume and return the cursor so calls can be chained; cells are reached
/// with [`SheetMut::select_cell`] and left again with [`CellMut::finish_cell`].
pub struct SheetMut<'a, D: DocumentModel> {
    book: &'a mut Workbook<D>,
    index: usize,
}

impl<'a, D: DocumentModel> SheetMut<'a, D> {
    pub(crate) fn new(book: &'a mut Workbook<D>, index: usize) -> Self {
        Self { book, index }
    }

    /// Position of the sheet in the workbook
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pixel geometry of the sheet
    pub fn layout(&self) -> &SheetLayout {
        self.book.sheet_layout(self.index)
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.layout().name
    }

    /// Rename the sheet
    pub fn set_name(self, name: &str) -> Self {
        self.book.rename_sheet(self.index, name);
        self
    }

    /// Default width for unsized columns, in whole characters
    pub fn set_default_column_width(self, characters: u32) -> Self {
        let sheet = self.book.sheet_layout_mut(self.index);
        sheet.default_column_width_pixels =
            native_column_width_to_pixels(characters.saturating_mul(256));
        let handle = sheet.handle;
        self.book.doc.set_default_column_width(handle, characters);
        self
    }

    /// Default width for unsized columns, rounded down to whole characters
    pub fn set_default_column_width_pixels(self, pixels: u32) -> Self {
        let characters = pixels_to_column_width(pixels) / 256;
        self.set_default_column_width(characters)
    }

    /// Default height for unsized rows, in points
    pub fn set_default_row_height_points(self, points: f64) -> Self {
        let sheet = self.book.sheet_layout_mut(self.index);
        sheet.default_row_height_pixels = points_to_pixels(points);
        let handle = sheet.handle;
        let native = (points.max(0.0) * 20.0) as u32;
        self.book.doc.set_default_row_height(handle, native);
        self
    }

    /// Default height for unsized rows, in pixels
    pub fn set_default_row_height_pixels(self, pixels: u32) -> Self {
        self.set_default_row_height_points(pixels_to_points(pixels))
    }

    /// Column width in characters, as shown in a spreadsheet UI
    pub fn set_column_width(self, col: u32, characters: f64) -> Self {
        let native = column_width_to_native_column_width(characters);
        self.book
            .apply_column_width(self.index, col, native, native_column_width_to_pixels(native));
        self
    }

    /// Column width in pixels
    pub fn set_column_width_pixels(self, col: u32, pixels: u32) -> Self {
        self.book
            .apply_column_width(self.index, col, pixels_to_column_width(pixels), pixels);
        self
    }

    /// Row height in points; may shrink the row
    pub fn set_row_height_points(self, row: u32, points: u32) -> Self {
        self.book.apply_row_height(
            self.index,
            row,
            points_to_native_row_height(points),
            points_to_pixels(f64::from(points)),
        );
        self
    }

    /// Row height in pixels; may shrink the row
    pub fn set_row_height_pixels(self, row: u32, pixels: u32) -> Self {
        self.book
            .apply_row_height(self.index, row, pixels_to_native_row_height(pixels), pixels);
        self
    }

    /// Select a cell, creating its layout state on first selection
    pub fn select_cell(self, row: u32, col: u32) -> CellMut<'a, D> {
        self.book.cell_state_mut(self.index, row, col);
        CellMut::new(self.book, self.index, row, col)
    }

    /// Merge rows `row1..=row2` and columns `col1..=col2`
    #[instrument(skip(self))]
    pub fn merge_region(self, row1: u32, row2: u32, col1: u32, col2: u32) -> Self {
        let handle = self.layout().handle;
        debug!("Merging region on sheet {}", self.index);
        self.book.doc.merge_range(handle, row1, row2, col1, col2);
        self
    }

    /// Merge a region and select its top-left cell
    pub fn merge_region_and_select_cell(
        self,
        row1: u32,
        row2: u32,
        col1: u32,
        col2: u32,
    ) -> CellMut<'a, D> {
        self.merge_region(row1, row2, col1, col2)
            .select_cell(row1, col1)
    }

    /// Merge the region between two A1 references, e.g. ("A1", "C1")
    pub fn merge_region_a1(self, start: &str, end: &str) -> Result<Self> {
        let (row1, row2, col1, col2) = parse_cell_range(start, end)
            .ok_or_else(|| LayoutError::InvalidCellRange(format!("{start}:{end}")))?;
        Ok(self.merge_region(row1, row2, col1, col2))
    }

    /// Return to the workbook
    pub fn finish_sheet(self) -> &'a mut Workbook<D> {
        self.book
    }
}
