//! The cell cursor: styling and cumulative text, image and file appends
//!
//! Every append observes everything appended to the cell before it. The cumulative
//! text is re-measured as a whole and the row grows to fit, never shrinking.

use crate::document::{AnchorMode, DocumentModel};
use crate::error::Result;
use crate::font;
use crate::layout::{CellLayoutState, PlacedMedia, fit_to_column, plan_media, plan_text};
use crate::registry::AssetKind;
use crate::resource::{FileResource, ImageResource};
use crate::sheet::SheetMut;
use crate::style::{Alignment, BorderStyle, CellStyle, Color, Side, VerticalAlignment};
use crate::text::TextEstimator;
use crate::units::{
    column_width_to_native_column_width, native_column_width_to_pixels, pixels_to_column_width,
    pixels_to_native_row_height, points_to_native_row_height, points_to_pixels,
};
use crate::workbook::Workbook;
use tracing::{debug, instrument};

/// Cursor over one cell of a sheet
pub struct CellMut<'a, D: DocumentModel> {
    book: &'a mut Workbook<D>,
    sheet: usize,
    row: u32,
    col: u32,
}

impl<'a, D: DocumentModel> CellMut<'a, D> {
    pub(crate) fn new(book: &'a mut Workbook<D>, sheet: usize, row: u32, col: u32) -> Self {
        Self {
            book,
            sheet,
            row,
            col,
        }
    }

    /// Zero-based row index
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Everything recorded for this cell so far
    pub fn state(&self) -> &CellLayoutState {
        self.book.cell_state(self.sheet, self.row, self.col)
    }

    /// Cumulative text of the cell
    pub fn text(&self) -> &str {
        &self.state().text
    }

    /// Current style of the cell
    pub fn style(&self) -> &CellStyle {
        &self.state().style
    }

    /// Pictures and files placed in this cell, in append order
    pub fn placed_media(&self) -> &[PlacedMedia] {
        &self.state().placed
    }

    /// Width of this cell's column in pixels
    pub fn column_width_pixels(&self) -> u32 {
        self.book
            .sheet_layout(self.sheet)
            .column_width_pixels(self.col)
    }

    /// Height of this cell's row in pixels
    pub fn row_height_pixels(&self) -> u32 {
        self.book.sheet_layout(self.sheet).row_height_pixels(self.row)
    }

    fn state_mut(&mut self) -> &mut CellLayoutState {
        self.book.cell_state_mut(self.sheet, self.row, self.col)
    }

    fn estimator(&self) -> Result<TextEstimator> {
        TextEstimator::new(self.column_width_pixels(), self.state().font_points())
    }

    fn store_text(&mut self, text: String) {
        let handle = self.state().handle;
        self.book.doc.set_cell_text(handle, &text);
        self.state_mut().text = text;
    }

    fn update_style<F: FnOnce(&mut CellStyle)>(mut self, update: F) -> Self {
        let state = self.state_mut();
        update(&mut state.style);
        let (handle, style) = (state.style_handle, state.style.clone());
        self.book.doc.update_style(handle, &style);
        self
    }

    /// Column width in characters
    pub fn set_width(self, characters: f64) -> Self {
        let native = column_width_to_native_column_width(characters);
        self.book.apply_column_width(
            self.sheet,
            self.col,
            native,
            native_column_width_to_pixels(native),
        );
        self
    }

    /// Column width in pixels
    pub fn set_width_pixels(self, pixels: u32) -> Self {
        self.book
            .apply_column_width(self.sheet, self.col, pixels_to_column_width(pixels), pixels);
        self
    }

    /// Row height in points; may shrink the row
    pub fn set_height_points(self, points: u32) -> Self {
        self.book.apply_row_height(
            self.sheet,
            self.row,
            points_to_native_row_height(points),
            points_to_pixels(f64::from(points)),
        );
        self
    }

    /// Row height in pixels; may shrink the row
    pub fn set_height_pixels(self, pixels: u32) -> Self {
        self.book.apply_row_height(
            self.sheet,
            self.row,
            pixels_to_native_row_height(pixels),
            pixels,
        );
        self
    }

    /// Replace the whole style. Fails if its font size has no metrics.
    pub fn set_style(self, style: CellStyle) -> Result<Self> {
        font::metrics(style.font_points)?;
        Ok(self.update_style(|s| *s = style))
    }

    /// Vertical alignment
    pub fn set_vertical_alignment(self, alignment: VerticalAlignment) -> Self {
        self.update_style(|s| s.vertical_alignment = alignment)
    }

    /// Horizontal alignment
    pub fn set_horizontal_alignment(self, alignment: Alignment) -> Self {
        self.update_style(|s| s.alignment = alignment)
    }

    /// Solid background fill
    pub fn set_fill_color(self, color: Color) -> Self {
        self.update_style(|s| s.fill_color = Some(color))
    }

    /// Border style of one side
    pub fn set_border_style(self, side: Side, style: BorderStyle) -> Self {
        self.update_style(|s| s.border_mut(side).style = style)
    }

    /// Same border style on all four sides
    pub fn set_border_styles(self, style: BorderStyle) -> Self {
        self.update_style(|s| {
            for side in Side::ALL {
                s.border_mut(side).style = style;
            }
        })
    }

    /// Border color of one side
    pub fn set_border_color(self, side: Side, color: Color) -> Self {
        self.update_style(|s| s.border_mut(side).color = Some(color))
    }

    /// Same border color on all four sides
    pub fn set_border_colors(self, color: Color) -> Self {
        self.update_style(|s| {
            for side in Side::ALL {
                s.border_mut(side).color = Some(color);
            }
        })
    }

    /// Font size of the cell; later appends are measured with it
    pub fn set_font_points(self, points: u16) -> Result<Self> {
        font::metrics(points)?;
        Ok(self.update_style(|s| s.font_points = points))
    }

    /// Font color
    pub fn set_font_color(self, color: Color) -> Self {
        self.update_style(|s| s.font_color = Some(color))
    }

    /// Bold font
    pub fn set_bold(self, bold: bool) -> Self {
        self.update_style(|s| s.bold = bold)
    }

    /// Store a numeric value in the cell.
    ///
    /// Numbers are not measured and leave the row height alone. The next append writes
    /// the cumulative text back over the number.
    pub fn set_number<N: Into<f64>>(self, value: N) -> Self {
        let handle = self.state().handle;
        self.book.doc.set_cell_number(handle, value.into());
        self
    }

    /// Number format code, e.g. "#,##0"
    pub fn set_data_format(self, format: &str) -> Self {
        self.update_style(|s| s.data_format = Some(format.to_string()))
    }

    /// Outline color of every picture placed in this cell under `key`
    pub fn set_image_line_color(self, key: &str, color: Color) -> Self {
        let drawings: Vec<_> = self
            .placed_media()
            .iter()
            .filter(|m| m.kind == AssetKind::Image && m.key == key)
            .map(|m| m.drawing)
            .collect();
        for drawing in drawings {
            self.book.doc.set_drawing_line_color(drawing, color);
        }
        self
    }

    /// Append text to the cell, growing the row to fit the whole text.
    ///
    /// The stored text is never wrapped; wrapping only drives the height estimate.
    #[instrument(skip(self), fields(row = self.row, col = self.col))]
    pub fn append_text(mut self, text: &str) -> Result<Self> {
        let estimator = self.estimator()?;
        let Some(plan) = plan_text(self.text(), text, &estimator) else {
            return Ok(self);
        };

        self.book.grow_row(self.sheet, self.row, plan.height_pixels);
        self.store_text(plan.text);
        Ok(self)
    }

    /// Append an image below the cell's text, shrunk to the column width if needed,
    /// inset by `padding` pixels.
    #[instrument(skip(self, image), fields(key = %image.key, row = self.row, col = self.col))]
    pub fn append_image(mut self, image: &ImageResource, padding: i32) -> Result<Self> {
        let column_width = self.column_width_pixels();
        let (width, height) = fit_to_column(image.width, image.height, column_width);
        let plan = plan_media(
            self.text(),
            width,
            height,
            i64::from(padding),
            &self.estimator()?,
        )?;

        self.book.grow_row(self.sheet, self.row, plan.height_pixels);

        let book = &mut *self.book;
        let asset = book
            .images
            .resolve_image(&mut book.doc, &image.key, &image.bytes, image.format)?;
        let cell = self.state().handle;
        let sheet = self.book.sheet_layout(self.sheet).handle;
        let anchor = plan.position.to_anchor(self.row, self.col);
        let drawing =
            self.book
                .doc
                .place_drawing(sheet, cell, asset, anchor, AnchorMode::MoveDontResize)?;
        debug!("Placed image {}x{} as {:?}", width, height, drawing);

        self.state_mut().placed.push(PlacedMedia {
            key: image.key.clone(),
            kind: AssetKind::Image,
            drawing,
            anchor,
        });
        self.store_text(plan.text);
        Ok(self)
    }

    /// Append an embedded file shown as its format's icon, inset by `padding` pixels.
    ///
    /// A failing embed is returned as is. The row may already have grown by then.
    #[instrument(skip(self, file), fields(file = %file.file_name, row = self.row, col = self.col))]
    pub fn append_file(mut self, file: &FileResource, padding: i32) -> Result<Self> {
        let size = self.book.config.file_icon_size_pixels;
        let plan = plan_media(
            self.text(),
            size,
            size,
            i64::from(padding),
            &self.estimator()?,
        )?;

        self.book.grow_row(self.sheet, self.row, plan.height_pixels);

        let book = &mut *self.book;
        let package = book.files.resolve_file(
            &mut book.doc,
            &file.file_name,
            &file.bytes,
            &file.file_name,
        )?;
        let icon = self.book.icon_asset(file.format)?;
        let cell = self.state().handle;
        let sheet = self.book.sheet_layout(self.sheet).handle;
        let anchor = plan.position.to_anchor(self.row, self.col);
        let object = self
            .book
            .doc
            .place_object(sheet, cell, package, icon, anchor)?;
        self.book.doc.force_icon_display(object);
        debug!("Embedded file as {:?}", object);

        self.state_mut().placed.push(PlacedMedia {
            key: file.file_name.clone(),
            kind: AssetKind::File,
            drawing: object,
            anchor,
        });
        self.store_text(plan.text);
        Ok(self)
    }

    /// Return to the sheet cursor
    pub fn finish_cell(self) -> SheetMut<'a, D> {
        SheetMut::new(self.book, self.sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::memory::{DrawingContent, MemoryDocument};
    use crate::resource::{FileFormat, ImageFormat};

    fn book() -> Workbook<MemoryDocument> {
        Workbook::new(MemoryDocument::new()).unwrap()
    }

    fn photo(key: &str, width: u32, height: u32) -> ImageResource {
        ImageResource::with_dimensions(vec![1, 2, 3], ImageFormat::Png, key, width, height)
    }

    fn report() -> FileResource {
        FileResource::new(vec![7; 16], FileFormat::Pdf, "report.pdf")
    }

    #[test]
    fn test_new_cell_is_wrapped_and_top_aligned() {
        let mut book = book();
        book.select_sheet(0).unwrap().select_cell(1, 1);

        let style = book.document().cell_style(0, 1, 1).unwrap();
        assert!(style.wrap_text);
        assert_eq!(style.vertical_alignment, VerticalAlignment::Top);
        assert_eq!(style.font_name, "Malgun Gothic");
        assert_eq!(book.document().cell_text(0, 1, 1), Some(""));
    }

    #[test]
    fn test_append_text_grows_row() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(200)
            .append_text("hello")
            .unwrap();
        // one 18px line does not beat the 20px default
        assert_eq!(cell.row_height_pixels(), 20);

        let cell = cell.append_text("\nworld\nagain").unwrap();
        assert_eq!(cell.text(), "hello\nworld\nagain");
        assert_eq!(cell.row_height_pixels(), 54);

        assert_eq!(book.document().cell_text(0, 0, 0), Some("hello\nworld\nagain"));
        assert_eq!(book.document().row_height(0, 0), Some(800));
    }

    #[test]
    fn test_empty_append_changes_nothing() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_text("")
            .unwrap();
        assert_eq!(cell.text(), "");
        assert_eq!(cell.row_height_pixels(), 20);
        assert_eq!(book.document().row_height(0, 0), None);
    }

    #[test]
    fn test_file_in_empty_cell() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_file(&report(), 0)
            .unwrap();

        assert_eq!(cell.text(), "\n\n");
        assert_eq!(cell.row_height_pixels(), 36);
        assert_eq!(cell.placed_media().len(), 1);

        let doc = book.document();
        let drawing = &doc.drawings()[0];
        assert!(drawing.icon_display);
        assert_eq!(drawing.mode, AnchorMode::MoveAndResize);
        assert_eq!((drawing.anchor.dx1, drawing.anchor.dy1), (0, 0));
        assert_eq!((drawing.anchor.dx2, drawing.anchor.dy2), (30 * 9525, 30 * 9525));
        assert_eq!(book.file_keys(), vec!["report.pdf"]);
        assert_eq!(doc.assets().len(), 8);

        match &drawing.content {
            DrawingContent::Object { icon, .. } => {
                assert_eq!(Some(*icon), book.images.get("icon_pdf.png"));
            }
            other => panic!("expected an embedded object, got {other:?}"),
        }
    }

    #[test]
    fn test_large_image_is_fit_to_column() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(200)
            .append_image(&photo("big.png", 1000, 500), 0)
            .unwrap();

        // ceil(100 / 18) = 6 breaks, none needed to close a line in an empty cell
        assert_eq!(cell.text(), "\n".repeat(6));
        assert_eq!(cell.row_height_pixels(), 108);

        let drawing = &book.document().drawings()[0];
        assert_eq!(drawing.mode, AnchorMode::MoveDontResize);
        assert_eq!(drawing.anchor.dx2, 200 * 9525);
        assert_eq!(drawing.anchor.dy2, 100 * 9525);
        assert!(!drawing.icon_display);
    }

    #[test]
    fn test_row_height_never_shrinks_across_appends() {
        let mut book = book();
        let mut heights = Vec::new();

        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(200)
            .append_text("a fairly long first line that wraps in the column")
            .unwrap();
        heights.push(cell.row_height_pixels());
        let cell = cell.append_image(&photo("p.png", 150, 100), 5).unwrap();
        heights.push(cell.row_height_pixels());
        let cell = cell.append_text("caption").unwrap();
        heights.push(cell.row_height_pixels());
        let cell = cell.append_file(&report(), 0).unwrap();
        heights.push(cell.row_height_pixels());

        assert!(heights.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(heights[3] > heights[0]);
    }

    #[test]
    fn test_drawing_starts_below_existing_text() {
        let mut book = book();
        book.select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(200)
            .append_text("hello")
            .unwrap()
            .append_image(&photo("p.png", 150, 100), 10)
            .unwrap();

        let anchor = book.document().drawings()[0].anchor;
        assert_eq!(anchor.dx1, 10 * 9525);
        assert_eq!(anchor.dy1, 28 * 9525);
        assert_eq!(anchor.dx2, 140 * 9525);
        assert_eq!(anchor.dy2, 108 * 9525);
    }

    #[test]
    fn test_invalid_position_leaves_cell_untouched() {
        let mut book = book();
        let result = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_text("hello")
            .unwrap()
            .append_file(&report(), 40);
        assert!(matches!(result, Err(LayoutError::InvalidPosition { .. })));

        let doc = book.document();
        assert_eq!(doc.cell_text(0, 0, 0), Some("hello"));
        assert_eq!(doc.row_height(0, 0), None);
        assert_eq!(doc.assets().len(), 7);
        assert!(doc.drawings().is_empty());
        assert!(book.file_keys().is_empty());
    }

    #[test]
    fn test_failed_embed_is_propagated() {
        let mut book = Workbook::new(MemoryDocument::new().with_failing_object_packages()).unwrap();
        let result = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_text("a")
            .unwrap()
            .append_file(&report(), 0);
        assert!(matches!(result, Err(LayoutError::Document(_))));

        let doc = book.document();
        assert_eq!(doc.cell_text(0, 0, 0), Some("a"));
        assert!(doc.drawings().is_empty());
        assert!(book.file_keys().is_empty());
    }

    #[test]
    fn test_image_key_is_shared_between_cells() {
        let mut book = book();
        let image = photo("logo.png", 40, 20);
        book.select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_image(&image, 0)
            .unwrap()
            .finish_cell()
            .select_cell(3, 2)
            .append_image(&image, 0)
            .unwrap();

        let doc = book.document();
        assert_eq!(doc.assets().len(), 8);
        assert_eq!(doc.drawings().len(), 2);
        assert!(book.image_keys().contains(&"logo.png"));
        let cells: Vec<_> = doc.drawings().iter().map(|d| (d.cell.row, d.cell.col)).collect();
        assert_eq!(cells, vec![(0, 0), (3, 2)]);
    }

    #[test]
    fn test_image_line_color() {
        let mut book = book();
        book.select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_image(&photo("a.png", 20, 20), 0)
            .unwrap()
            .append_image(&photo("b.png", 20, 20), 0)
            .unwrap()
            .set_image_line_color("b.png", Color::black());

        let drawings = book.document().drawings();
        assert_eq!(drawings[0].line_color, None);
        assert_eq!(drawings[1].line_color, Some(Color::black()));
    }

    #[test]
    fn test_style_updates_reach_document() {
        let mut book = book();
        book.select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_bold(true)
            .set_fill_color(Color::rgb(255, 255, 0))
            .set_horizontal_alignment(Alignment::Center)
            .set_border_styles(BorderStyle::Thin)
            .set_border_color(Side::Bottom, Color::rgb(255, 0, 0))
            .set_data_format("#,##0")
            .set_font_points(14)
            .unwrap();

        let style = book.document().cell_style(0, 0, 0).unwrap();
        assert!(style.bold);
        assert_eq!(style.fill_color, Some(Color::rgb(255, 255, 0)));
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.border_top.style, BorderStyle::Thin);
        assert_eq!(style.border_bottom.color, Some(Color::rgb(255, 0, 0)));
        assert_eq!(style.border_left.color, None);
        assert_eq!(style.data_format.as_deref(), Some("#,##0"));
        assert_eq!(style.font_points, 14);
    }

    #[test]
    fn test_font_size_is_validated() {
        let mut book = book();
        let result = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_font_points(30);
        assert!(matches!(result, Err(LayoutError::OutOfRangeFontSize(30))));
        assert_eq!(book.document().cell_style(0, 0, 0).unwrap().font_points, 10);
    }

    #[test]
    fn test_larger_font_gives_taller_lines() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(200)
            .set_font_points(20)
            .unwrap()
            .append_text("a\nb")
            .unwrap();
        // 20pt lines are 42px tall
        assert_eq!(cell.row_height_pixels(), 84);
    }

    #[test]
    fn test_widening_column_keeps_earlier_height() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_width_pixels(40)
            .append_text(&"a".repeat(18))
            .unwrap();
        // 9 weight units at 3 per line
        assert_eq!(cell.row_height_pixels(), 54);

        let cell = cell.set_width_pixels(400).append_text("b").unwrap();
        assert_eq!(cell.column_width_pixels(), 400);
        assert_eq!(cell.row_height_pixels(), 54);
    }

    #[test]
    fn test_number_is_passed_through() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_number(42)
            .set_data_format("#,##0");
        assert_eq!(cell.row_height_pixels(), 20);
        assert_eq!(cell.text(), "");

        let doc = book.document();
        assert_eq!(doc.cell_number(0, 0, 0), Some(42.0));
        assert_eq!(doc.cell_text(0, 0, 0), Some(""));
        assert_eq!(
            doc.cell_style(0, 0, 0).unwrap().data_format.as_deref(),
            Some("#,##0")
        );

        book.select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .set_number(2.5f32)
            .append_text("label")
            .unwrap();
        let doc = book.document();
        assert_eq!(doc.cell_number(0, 0, 0), None);
        assert_eq!(doc.cell_text(0, 0, 0), Some("label"));
    }

    #[test]
    fn test_explicit_height_may_shrink_row() {
        let mut book = book();
        let cell = book
            .select_sheet(0)
            .unwrap()
            .select_cell(0, 0)
            .append_file(&report(), 0)
            .unwrap()
            .set_height_pixels(24);
        assert_eq!(cell.row_height_pixels(), 24);
        assert_eq!(book.document().row_height(0, 0), Some(360));
    }
}
