//! The document model the layout engine drives
//!
//! The engine never depends on a concrete spreadsheet writer. Anything that can create
//! sheets and cells, size rows and columns, store binary assets and anchor drawings can
//! back it by implementing [`DocumentModel`].

use crate::resource::ImageFormat;
use crate::style::{CellStyle, Color};
use serde::Serialize;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SheetHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellHandle {
    pub sheet: SheetHandle,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StyleHandle(pub usize);

/// A stored picture or object package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetHandle(pub usize);

/// A picture or embedded object placed on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DrawingHandle(pub usize);

/// How a drawing follows its anchor cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AnchorMode {
    MoveAndResize,
    #[default]
    MoveDontResize,
    DontMoveOrResize,
}

/// Placement of a drawing: two cell coordinates plus sub-cell offsets in EMU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorRect {
    pub row1: u32,
    pub col1: u32,
    pub row2: u32,
    pub col2: u32,
    pub dx1: i64,
    pub dy1: i64,
    pub dx2: i64,
    pub dy2: i64,
}

/// Capabilities the layout engine needs from a spreadsheet document.
///
/// Infallible methods mutate in-memory structure only. Methods returning
/// [`io::Result`] touch the asset store or the output and their errors are
/// propagated to the caller unchanged.
pub trait DocumentModel {
    fn create_sheet(&mut self) -> SheetHandle;

    fn set_sheet_name(&mut self, sheet: SheetHandle, name: &str);

    fn get_or_create_row(&mut self, sheet: SheetHandle, row: u32);

    fn create_cell(&mut self, sheet: SheetHandle, row: u32, col: u32) -> CellHandle;

    fn set_cell_text(&mut self, cell: CellHandle, text: &str);

    /// Store a numeric value, replacing any text value of the cell
    fn set_cell_number(&mut self, cell: CellHandle, value: f64);

    fn create_style(&mut self, style: &CellStyle) -> StyleHandle;

    fn update_style(&mut self, handle: StyleHandle, style: &CellStyle);

    fn set_cell_style(&mut self, cell: CellHandle, style: StyleHandle);

    fn merge_range(&mut self, sheet: SheetHandle, row1: u32, row2: u32, col1: u32, col2: u32);

    /// Default width for columns without an explicit width, in whole characters
    fn set_default_column_width(&mut self, sheet: SheetHandle, characters: u32);

    fn set_column_width(&mut self, sheet: SheetHandle, col: u32, native_width: u32);

    fn set_default_row_height(&mut self, sheet: SheetHandle, native_height: u32);

    fn set_row_height(&mut self, sheet: SheetHandle, row: u32, native_height: u32);

    fn register_binary_asset(&mut self, bytes: &[u8], format: ImageFormat)
    -> io::Result<AssetHandle>;

    /// Store an embedded file as an opaque object package
    fn register_object_package(&mut self, bytes: &[u8], display_name: &str)
    -> io::Result<AssetHandle>;

    fn place_drawing(
        &mut self,
        sheet: SheetHandle,
        cell: CellHandle,
        asset: AssetHandle,
        anchor: AnchorRect,
        mode: AnchorMode,
    ) -> io::Result<DrawingHandle>;

    /// Place an object package displayed through `icon`, a previously registered picture
    fn place_object(
        &mut self,
        sheet: SheetHandle,
        cell: CellHandle,
        package: AssetHandle,
        icon: AssetHandle,
        anchor: AnchorRect,
    ) -> io::Result<DrawingHandle>;

    /// Show an embedded object as its icon instead of a content preview.
    /// Best effort; the default does nothing.
    fn force_icon_display(&mut self, _object: DrawingHandle) {}

    /// Outline color of a placed picture. Best effort; the default does nothing.
    fn set_drawing_line_color(&mut self, _drawing: DrawingHandle, _color: Color) {}

    fn serialize(&self) -> io::Result<Vec<u8>>;

    fn close(&mut self) -> io::Result<()>;
}
