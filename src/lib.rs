//! Heuristic auto-sizing and media placement for spreadsheet cells
//!
//! Cells are filled by appending text, images and embedded files. After every append
//! the cell's row is grown to fit the whole cumulative content, estimated from
//! per-character weights and a fixed font metrics table instead of a font engine.
//! Images and file icons are anchored below the existing text, and line breaks are
//! appended so later text lands underneath them.
//!
//! The spreadsheet itself sits behind [`DocumentModel`]; [`MemoryDocument`] keeps
//! everything in memory and serializes to JSON.

pub mod cell;
pub mod cell_ref;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod font;
pub mod layout;
pub mod memory;
pub mod registry;
pub mod resource;
pub mod sheet;
pub mod style;
pub mod text;
pub mod units;
pub mod workbook;

pub use cell::CellMut;
pub use config::LayoutConfig;
pub use document::{AnchorMode, AnchorRect, DocumentModel};
pub use error::{LayoutError, Result};
pub use memory::MemoryDocument;
pub use resource::{FileFormat, FileResource, ImageFormat, ImageResource};
pub use sheet::SheetMut;
pub use style::{Alignment, BorderStyle, CellStyle, Color, Side, VerticalAlignment};
pub use units::Dimension;
pub use workbook::Workbook;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workbook_flow() {
        let mut book = Workbook::new(MemoryDocument::new()).unwrap();
        book.select_sheet(0)
            .unwrap()
            .set_name("Report")
            .set_column_width(0, 20.0)
            .select_cell(0, 0)
            .append_text("Header")
            .unwrap()
            .finish_cell()
            .select_cell(1, 0)
            .append_text("Data")
            .unwrap();

        let doc = book.close().unwrap();
        assert_eq!(doc.sheets()[0].name, "Report");
        assert_eq!(doc.cell_text(0, 0, 0), Some("Header"));
        assert_eq!(doc.cell_text(0, 1, 0), Some("Data"));
    }
}
