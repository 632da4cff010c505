//! Fill a two-sheet workbook with text, pictures and embedded files

use cellfit::{
    Alignment, BorderStyle, Color, FileFormat, FileResource, ImageFormat, ImageResource,
    MemoryDocument, VerticalAlignment, Workbook,
};
use std::io::Cursor;
use tracing_subscriber::EnvFilter;

/// A solid-color PNG standing in for a photo
fn sample_png(width: u32, height: u32, color: [u8; 3]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let cat = ImageResource::new(sample_png(150, 100, [200, 160, 90])?, ImageFormat::Png, "cat.png")?;
    let dog = ImageResource::new(sample_png(200, 200, [120, 90, 60])?, ImageFormat::Png, "dog.png")?;
    let notes = FileResource::new(b"remember the milk\n".to_vec(), FileFormat::Text, "notes.txt");
    let budget = FileResource::new(vec![0x50, 0x4b, 0x03, 0x04], FileFormat::Excel, "budget.xlsx");

    let mut book = Workbook::new(MemoryDocument::new())?;

    book.select_sheet(0)?
        .set_name("Sheet One")
        .set_default_column_width_pixels(50)
        .set_default_row_height_pixels(40)
        .merge_region_and_select_cell(0, 1, 0, 2)
        .append_text("Header 1")?
        .set_bold(true)
        .set_font_color(Color::rgb(100, 0, 100))
        .set_font_points(14)?
        .set_horizontal_alignment(Alignment::Center)
        .set_vertical_alignment(VerticalAlignment::Middle)
        .set_fill_color(Color::rgb(100, 255, 100))
        .finish_cell()
        .select_cell(2, 1)
        .set_width_pixels(200)
        .set_height_pixels(200)
        .append_text("A cat walks across the frozen river.")?
        .append_image(&cat, 0)?
        .append_text("Time to go to bed")?
        .append_file(&notes, 0)?
        .append_text("How did you pin it to the horizon?")?
        .finish_cell()
        .select_cell(3, 2)
        .set_width_pixels(300)
        .set_height_pixels(300)
        .append_file(&budget, 0)?
        .append_text("Quarterly numbers")?
        .append_image(&dog, 10)?
        .set_border_styles(BorderStyle::Thin)
        .set_border_colors(Color::rgb(255, 0, 0))
        .set_image_line_color("dog.png", Color::black())
        .finish_cell()
        .finish_sheet()
        .add_sheet()
        .select_sheet(1)?
        .set_name("Sheet Two")
        .set_column_width_pixels(2, 200)
        .set_row_height_pixels(2, 200);

    println!("Sheets: {:?}", book.sheet_names());
    println!("Images: {:?}", book.image_keys());
    println!("Files: {:?}", book.file_keys());

    let bytes = book.serialize_and_close()?;
    std::fs::write("cell_layout.json", &bytes)?;
    println!("Wrote cell_layout.json ({} bytes)", bytes.len());

    Ok(())
}
