//! The layout session for one document
//!
//! A [`Workbook`] owns the document model, the per-document image and file registries
//! and the layout state of every sheet. Nothing is shared between workbooks.

use crate::config::LayoutConfig;
use crate::document::{AssetHandle, DocumentModel};
use crate::error::{LayoutError, Result};
use crate::layout::CellLayoutState;
use crate::registry::{AssetKind, ResourceRegistry};
use crate::resource::{FileFormat, ImageFormat};
use crate::sheet::{SheetLayout, SheetMut};
use crate::style::CellStyle;
use crate::units::{
    native_column_width_to_pixels, pixels_to_native_row_height, points_to_pixels,
};
use tracing::{debug, instrument};

pub struct Workbook<D: DocumentModel> {
    pub(crate) doc: D,
    pub(crate) config: LayoutConfig,
    pub(crate) images: ResourceRegistry,
    pub(crate) files: ResourceRegistry,
    sheets: Vec<SheetLayout>,
    current: usize,
}

impl<D: DocumentModel> Workbook<D> {
    /// Start a workbook with one sheet, using the default configuration
    pub fn new(doc: D) -> Result<Self> {
        Self::with_config(doc, LayoutConfig::default())
    }

    /// Start a workbook with one selected sheet and every file icon registered
    #[instrument(skip(doc, config))]
    pub fn with_config(doc: D, config: LayoutConfig) -> Result<Self> {
        let mut book = Self {
            doc,
            config,
            images: ResourceRegistry::new(AssetKind::Image),
            files: ResourceRegistry::new(AssetKind::File),
            sheets: Vec::new(),
            current: 0,
        };
        book.add_sheet();

        for format in FileFormat::ALL {
            book.icon_asset(format)?;
        }
        debug!("Workbook ready with {} icon images", book.images.len());

        Ok(book)
    }

    /// The underlying document model
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Settings the workbook was created with
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Append a sheet named after its position, skipping names already taken
    pub fn add_sheet(&mut self) -> &mut Self {
        let handle = self.doc.create_sheet();
        let name = (self.sheets.len() + 1..)
            .map(|n| format!("Sheet{n}"))
            .find(|name| self.sheets.iter().all(|s| &s.name != name))
            .unwrap_or_default();
        self.doc.set_sheet_name(handle, &name);

        let default_column_width_pixels =
            native_column_width_to_pixels(self.config.default_column_width_chars.saturating_mul(256));
        let default_row_height_pixels = points_to_pixels(self.config.default_row_height_points);

        debug!("Added sheet '{}'", name);
        self.sheets.push(SheetLayout::new(
            handle,
            name,
            default_column_width_pixels,
            default_row_height_pixels,
        ));
        self
    }

    /// Make the sheet at `index` the current one and return a cursor over it
    pub fn select_sheet(&mut self, index: usize) -> Result<SheetMut<'_, D>> {
        if index >= self.sheets.len() {
            return Err(LayoutError::SheetNotFound(index));
        }
        self.current = index;
        Ok(SheetMut::new(self, index))
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sheet names, in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Name of the last selected sheet
    pub fn current_sheet_name(&self) -> &str {
        &self.sheets[self.current].name
    }

    /// Rename the last selected sheet
    pub fn set_current_sheet_name(&mut self, name: &str) -> &mut Self {
        self.rename_sheet(self.current, name);
        self
    }

    /// Keys of every registered image, icons included, sorted
    pub fn image_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.images.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// Names of every embedded file, sorted
    pub fn file_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.files.keys().collect();
        keys.sort_unstable();
        keys
    }

    /// Serialize the document without closing it
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(self.doc.serialize()?)
    }

    /// Close the document and hand it back
    pub fn close(mut self) -> Result<D> {
        self.doc.close()?;
        Ok(self.doc)
    }

    /// Serialize the document, then close it
    pub fn serialize_and_close(self) -> Result<Vec<u8>> {
        let bytes = self.serialize()?;
        self.close()?;
        Ok(bytes)
    }

    pub(crate) fn sheet_layout(&self, index: usize) -> &SheetLayout {
        &self.sheets[index]
    }

    pub(crate) fn sheet_layout_mut(&mut self, index: usize) -> &mut SheetLayout {
        &mut self.sheets[index]
    }

    pub(crate) fn rename_sheet(&mut self, index: usize, name: &str) {
        let sheet = &mut self.sheets[index];
        sheet.name = name.to_string();
        self.doc.set_sheet_name(sheet.handle, name);
    }

    pub(crate) fn apply_column_width(
        &mut self,
        index: usize,
        col: u32,
        native_width: u32,
        pixels: u32,
    ) {
        let sheet = &mut self.sheets[index];
        sheet.column_widths.insert(col, pixels);
        self.doc.set_column_width(sheet.handle, col, native_width);
    }

    pub(crate) fn apply_row_height(
        &mut self,
        index: usize,
        row: u32,
        native_height: u32,
        pixels: u32,
    ) {
        let sheet = &mut self.sheets[index];
        sheet.row_heights.insert(row, pixels);
        self.doc.get_or_create_row(sheet.handle, row);
        self.doc.set_row_height(sheet.handle, row, native_height);
    }

    /// Raise a row to `pixels` if it is currently lower. Rows never shrink here.
    pub(crate) fn grow_row(&mut self, index: usize, row: u32, pixels: u32) {
        let current = self.sheets[index].row_height_pixels(row);
        if pixels > current {
            debug!("Growing row {} from {}px to {}px", row, current, pixels);
            self.apply_row_height(index, row, pixels_to_native_row_height(pixels), pixels);
        }
    }

    /// Layout state of a cell, created with a wrapped default style on first use
    pub(crate) fn cell_state_mut(&mut self, index: usize, row: u32, col: u32) -> &mut CellLayoutState {
        let sheet = &mut self.sheets[index];
        let sheet_handle = sheet.handle;
        let doc = &mut self.doc;
        let font_name = &self.config.base_font_name;

        sheet.cells.entry((row, col)).or_insert_with(|| {
            doc.get_or_create_row(sheet_handle, row);
            let handle = doc.create_cell(sheet_handle, row, col);
            let style = CellStyle {
                font_name: font_name.clone(),
                ..CellStyle::wrapped()
            };
            let style_handle = doc.create_style(&style);
            doc.set_cell_style(handle, style_handle);

            CellLayoutState {
                handle,
                text: String::new(),
                style,
                style_handle,
                placed: Vec::new(),
            }
        })
    }

    pub(crate) fn cell_state(&self, index: usize, row: u32, col: u32) -> &CellLayoutState {
        &self.sheets[index].cells[&(row, col)]
    }

    /// Picture asset of the icon shown for files of `format`
    pub(crate) fn icon_asset(&mut self, format: FileFormat) -> Result<AssetHandle> {
        let key = format.icon_key();
        if let Some(handle) = self.images.get(key) {
            return Ok(handle);
        }
        let png = self.config.icon_bytes(format)?;
        self.images
            .resolve_image(&mut self.doc, key, &png, ImageFormat::Png)
    }
}
