//! In-memory document model
//!
//! Records every mutation the layout engine makes so it can be inspected directly,
//! and serializes the recorded state as JSON.

use crate::document::*;
use crate::resource::ImageFormat;
use crate::style::{CellStyle, Color};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryCell {
    pub text: String,
    /// Numeric value; set cells carry no text
    pub number: Option<f64>,
    pub style: Option<StyleHandle>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryRow {
    /// Native row height, if one was set
    pub height: Option<u32>,
    pub cells: BTreeMap<u32, MemoryCell>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySheet {
    pub name: String,
    pub default_column_width: Option<u32>,
    pub default_row_height: Option<u32>,
    /// Native column widths by column index
    pub columns: BTreeMap<u32, u32>,
    pub rows: BTreeMap<u32, MemoryRow>,
    /// (row1, row2, col1, col2)
    pub merges: Vec<(u32, u32, u32, u32)>,
}

#[derive(Debug, Clone, Serialize)]
pub enum MemoryAsset {
    Picture {
        format: ImageFormat,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
    Package {
        display_name: String,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
}

impl MemoryAsset {
    /// Stored payload
    pub fn bytes(&self) -> &[u8] {
        match self {
            MemoryAsset::Picture { bytes, .. } | MemoryAsset::Package { bytes, .. } => bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum DrawingContent {
    Picture(AssetHandle),
    Object { package: AssetHandle, icon: AssetHandle },
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryDrawing {
    pub sheet: SheetHandle,
    pub cell: CellHandle,
    pub content: DrawingContent,
    pub anchor: AnchorRect,
    pub mode: AnchorMode,
    pub icon_display: bool,
    pub line_color: Option<Color>,
}

/// A document model that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryDocument {
    sheets: Vec<MemorySheet>,
    styles: Vec<CellStyle>,
    assets: Vec<MemoryAsset>,
    drawings: Vec<MemoryDrawing>,
    fail_object_packages: bool,
    closed: bool,
}

/// JSON shape written by `serialize`
#[derive(Serialize)]
struct Snapshot<'a> {
    sheets: &'a [MemorySheet],
    styles: &'a [CellStyle],
    assets: &'a [MemoryAsset],
    drawings: &'a [MemoryDrawing],
}

fn not_found(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, what.to_string())
}

impl MemoryDocument {
    /// Empty document with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `register_object_package` call fail, for exercising error paths
    pub fn with_failing_object_packages(mut self) -> Self {
        self.fail_object_packages = true;
        self
    }

    /// Recorded sheets, in creation order
    pub fn sheets(&self) -> &[MemorySheet] {
        &self.sheets
    }

    /// Registered pictures and packages, indexed by `AssetHandle`
    pub fn assets(&self) -> &[MemoryAsset] {
        &self.assets
    }

    /// Placed pictures and objects, indexed by `DrawingHandle`
    pub fn drawings(&self) -> &[MemoryDrawing] {
        &self.drawings
    }

    /// Style behind a handle
    pub fn style(&self, handle: StyleHandle) -> Option<&CellStyle> {
        self.styles.get(handle.0)
    }

    /// Whether `close` was called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn cell(&self, sheet: usize, row: u32, col: u32) -> Option<&MemoryCell> {
        self.sheets.get(sheet)?.rows.get(&row)?.cells.get(&col)
    }

    /// Text value of a cell
    pub fn cell_text(&self, sheet: usize, row: u32, col: u32) -> Option<&str> {
        self.cell(sheet, row, col).map(|c| c.text.as_str())
    }

    /// Numeric value of a cell
    pub fn cell_number(&self, sheet: usize, row: u32, col: u32) -> Option<f64> {
        self.cell(sheet, row, col)?.number
    }

    /// Style assigned to a cell
    pub fn cell_style(&self, sheet: usize, row: u32, col: u32) -> Option<&CellStyle> {
        self.cell(sheet, row, col)
            .and_then(|c| c.style)
            .and_then(|handle| self.style(handle))
    }

    /// Native height of a row, if one was set
    pub fn row_height(&self, sheet: usize, row: u32) -> Option<u32> {
        self.sheets.get(sheet)?.rows.get(&row)?.height
    }

    /// Native width of a column, if one was set
    pub fn column_width(&self, sheet: usize, col: u32) -> Option<u32> {
        self.sheets.get(sheet)?.columns.get(&col).copied()
    }

    fn sheet_mut(&mut self, sheet: SheetHandle) -> Option<&mut MemorySheet> {
        self.sheets.get_mut(sheet.0)
    }

    fn cell_mut(&mut self, cell: CellHandle) -> Option<&mut MemoryCell> {
        self.sheet_mut(cell.sheet)?
            .rows
            .get_mut(&cell.row)?
            .cells
            .get_mut(&cell.col)
    }

    fn push_drawing(&mut self, drawing: MemoryDrawing) -> io::Result<DrawingHandle> {
        if drawing.sheet.0 >= self.sheets.len() {
            return Err(not_found("sheet"));
        }
        self.drawings.push(drawing);
        Ok(DrawingHandle(self.drawings.len() - 1))
    }
}

impl DocumentModel for MemoryDocument {
    fn create_sheet(&mut self) -> SheetHandle {
        let index = self.sheets.len();
        self.sheets.push(MemorySheet {
            name: format!("Sheet{}", index + 1),
            ..Default::default()
        });
        SheetHandle(index)
    }

    fn set_sheet_name(&mut self, sheet: SheetHandle, name: &str) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.name = name.to_string();
        }
    }

    fn get_or_create_row(&mut self, sheet: SheetHandle, row: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.rows.entry(row).or_default();
        }
    }

    fn create_cell(&mut self, sheet: SheetHandle, row: u32, col: u32) -> CellHandle {
        if let Some(s) = self.sheet_mut(sheet) {
            s.rows
                .entry(row)
                .or_default()
                .cells
                .insert(col, MemoryCell::default());
        }
        CellHandle { sheet, row, col }
    }

    fn set_cell_text(&mut self, cell: CellHandle, text: &str) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.text = text.to_string();
            cell.number = None;
        }
    }

    fn set_cell_number(&mut self, cell: CellHandle, value: f64) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.text.clear();
            cell.number = Some(value);
        }
    }

    fn create_style(&mut self, style: &CellStyle) -> StyleHandle {
        self.styles.push(style.clone());
        StyleHandle(self.styles.len() - 1)
    }

    fn update_style(&mut self, handle: StyleHandle, style: &CellStyle) {
        if let Some(existing) = self.styles.get_mut(handle.0) {
            *existing = style.clone();
        }
    }

    fn set_cell_style(&mut self, cell: CellHandle, style: StyleHandle) {
        if let Some(cell) = self.cell_mut(cell) {
            cell.style = Some(style);
        }
    }

    fn merge_range(&mut self, sheet: SheetHandle, row1: u32, row2: u32, col1: u32, col2: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.merges.push((row1, row2, col1, col2));
        }
    }

    fn set_default_column_width(&mut self, sheet: SheetHandle, characters: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.default_column_width = Some(characters);
        }
    }

    fn set_column_width(&mut self, sheet: SheetHandle, col: u32, native_width: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.columns.insert(col, native_width);
        }
    }

    fn set_default_row_height(&mut self, sheet: SheetHandle, native_height: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.default_row_height = Some(native_height);
        }
    }

    fn set_row_height(&mut self, sheet: SheetHandle, row: u32, native_height: u32) {
        if let Some(sheet) = self.sheet_mut(sheet) {
            sheet.rows.entry(row).or_default().height = Some(native_height);
        }
    }

    fn register_binary_asset(
        &mut self,
        bytes: &[u8],
        format: ImageFormat,
    ) -> io::Result<AssetHandle> {
        self.assets.push(MemoryAsset::Picture {
            format,
            bytes: bytes.to_vec(),
        });
        debug!("Stored picture asset #{} ({} bytes)", self.assets.len() - 1, bytes.len());
        Ok(AssetHandle(self.assets.len() - 1))
    }

    fn register_object_package(
        &mut self,
        bytes: &[u8],
        display_name: &str,
    ) -> io::Result<AssetHandle> {
        if self.fail_object_packages {
            return Err(io::Error::other(format!(
                "cannot embed object package '{display_name}'"
            )));
        }
        self.assets.push(MemoryAsset::Package {
            display_name: display_name.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(AssetHandle(self.assets.len() - 1))
    }

    fn place_drawing(
        &mut self,
        sheet: SheetHandle,
        cell: CellHandle,
        asset: AssetHandle,
        anchor: AnchorRect,
        mode: AnchorMode,
    ) -> io::Result<DrawingHandle> {
        if asset.0 >= self.assets.len() {
            return Err(not_found("asset"));
        }
        self.push_drawing(MemoryDrawing {
            sheet,
            cell,
            content: DrawingContent::Picture(asset),
            anchor,
            mode,
            icon_display: false,
            line_color: None,
        })
    }

    fn place_object(
        &mut self,
        sheet: SheetHandle,
        cell: CellHandle,
        package: AssetHandle,
        icon: AssetHandle,
        anchor: AnchorRect,
    ) -> io::Result<DrawingHandle> {
        if package.0 >= self.assets.len() || icon.0 >= self.assets.len() {
            return Err(not_found("asset"));
        }
        self.push_drawing(MemoryDrawing {
            sheet,
            cell,
            content: DrawingContent::Object { package, icon },
            anchor,
            mode: AnchorMode::MoveAndResize,
            icon_display: false,
            line_color: None,
        })
    }

    fn force_icon_display(&mut self, object: DrawingHandle) {
        if let Some(drawing) = self.drawings.get_mut(object.0) {
            drawing.icon_display = true;
        }
    }

    fn set_drawing_line_color(&mut self, drawing: DrawingHandle, color: Color) {
        if let Some(drawing) = self.drawings.get_mut(drawing.0) {
            drawing.line_color = Some(color);
        }
    }

    fn serialize(&self) -> io::Result<Vec<u8>> {
        if self.closed {
            return Err(io::Error::other("document is closed"));
        }
        let snapshot = Snapshot {
            sheets: &self.sheets,
            styles: &self.styles,
            assets: &self.assets,
            drawings: &self.drawings,
        };
        serde_json::to_vec(&snapshot).map_err(io::Error::other)
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_and_cell_bookkeeping() {
        let mut doc = MemoryDocument::new();
        let sheet = doc.create_sheet();
        assert_eq!(doc.sheets()[0].name, "Sheet1");

        let cell = doc.create_cell(sheet, 2, 3);
        doc.set_cell_text(cell, "hello");
        doc.set_row_height(sheet, 2, 600);
        doc.set_column_width(sheet, 3, 7314);

        assert_eq!(doc.cell_text(0, 2, 3), Some("hello"));
        assert_eq!(doc.row_height(0, 2), Some(600));
        assert_eq!(doc.column_width(0, 3), Some(7314));
        assert_eq!(doc.cell_text(0, 0, 0), None);
    }

    #[test]
    fn test_styles_are_updated_in_place() {
        let mut doc = MemoryDocument::new();
        let sheet = doc.create_sheet();
        let cell = doc.create_cell(sheet, 0, 0);
        let handle = doc.create_style(&CellStyle::default());
        doc.set_cell_style(cell, handle);

        let mut style = CellStyle::default();
        style.bold = true;
        doc.update_style(handle, &style);

        assert!(doc.cell_style(0, 0, 0).unwrap().bold);
    }

    #[test]
    fn test_drawing_requires_known_asset() {
        let mut doc = MemoryDocument::new();
        let sheet = doc.create_sheet();
        let cell = doc.create_cell(sheet, 0, 0);
        let anchor = AnchorRect {
            row1: 0,
            col1: 0,
            row2: 0,
            col2: 0,
            dx1: 0,
            dy1: 0,
            dx2: 9525,
            dy2: 9525,
        };
        let result = doc.place_drawing(sheet, cell, AssetHandle(0), anchor, AnchorMode::default());
        assert!(result.is_err());

        let asset = doc.register_binary_asset(&[1, 2, 3], ImageFormat::Png).unwrap();
        let drawing = doc
            .place_drawing(sheet, cell, asset, anchor, AnchorMode::default())
            .unwrap();
        doc.set_drawing_line_color(drawing, Color::rgb(1, 2, 3));
        assert_eq!(doc.drawings()[0].line_color, Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_failing_object_packages() {
        let mut doc = MemoryDocument::new().with_failing_object_packages();
        assert!(doc.register_object_package(b"data", "a.txt").is_err());
        assert!(doc.assets().is_empty());
    }

    #[test]
    fn test_serialize_then_close() {
        let mut doc = MemoryDocument::new();
        let sheet = doc.create_sheet();
        doc.set_sheet_name(sheet, "Report");

        let bytes = doc.serialize().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["sheets"][0]["name"], "Report");

        doc.close().unwrap();
        assert!(doc.is_closed());
        assert!(doc.serialize().is_err());
    }

    #[test]
    fn test_snapshot_holds_recorded_content_only() {
        let mut doc = MemoryDocument::new().with_failing_object_packages();
        let sheet = doc.create_sheet();
        doc.register_binary_asset(&[1, 2, 3], ImageFormat::Png).unwrap();
        doc.create_cell(sheet, 0, 0);

        let bytes = DocumentModel::serialize(&doc).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["assets", "drawings", "sheets", "styles"]);
        assert_eq!(json["assets"][0]["Picture"]["format"], "Png");
    }
}
