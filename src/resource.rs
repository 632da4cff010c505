//! Embeddable media: images and files, plus the icons drawn for files

use crate::error::Result;
use image::{ImageBuffer, ImageReader, Rgba};
use serde::Serialize;
use std::io::Cursor;

/// Picture formats accepted by the document's asset store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageFormat {
    /// Extended Windows metafile
    Emf,
    /// Windows metafile
    Wmf,
    /// Mac PICT
    Pict,
    Jpeg,
    Png,
    /// Device independent bitmap
    Dib,
}

impl ImageFormat {
    /// Numeric picture type understood by spreadsheet writers
    pub fn picture_type(self) -> u32 {
        match self {
            ImageFormat::Emf => 2,
            ImageFormat::Wmf => 3,
            ImageFormat::Pict => 4,
            ImageFormat::Jpeg => 5,
            ImageFormat::Png => 6,
            ImageFormat::Dib => 7,
        }
    }
}

/// Kinds of embedded file, each shown with its own icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileFormat {
    Excel,
    PowerPoint,
    Word,
    Text,
    Etc,
    Jpg,
    Png,
    Pdf,
}

impl FileFormat {
    pub const ALL: [FileFormat; 8] = [
        FileFormat::Excel,
        FileFormat::PowerPoint,
        FileFormat::Word,
        FileFormat::Text,
        FileFormat::Etc,
        FileFormat::Jpg,
        FileFormat::Png,
        FileFormat::Pdf,
    ];

    /// Image registry key of the icon shown for this format.
    ///
    /// Jpg and Png share one icon.
    pub fn icon_key(self) -> &'static str {
        match self {
            FileFormat::Excel => "icon_excel.png",
            FileFormat::PowerPoint => "icon_power_point.png",
            FileFormat::Word => "icon_word.png",
            FileFormat::Text => "icon_txt.png",
            FileFormat::Etc => "icon_file.png",
            FileFormat::Jpg | FileFormat::Png => "icon_image.png",
            FileFormat::Pdf => "icon_pdf.png",
        }
    }

    fn icon_color(self) -> [u8; 3] {
        match self {
            FileFormat::Excel => [33, 115, 70],
            FileFormat::PowerPoint => [209, 71, 38],
            FileFormat::Word => [43, 87, 154],
            FileFormat::Text => [128, 128, 128],
            FileFormat::Etc => [90, 90, 90],
            FileFormat::Jpg | FileFormat::Png => [126, 87, 194],
            FileFormat::Pdf => [200, 30, 30],
        }
    }
}

/// An image to place in a cell, identified by a caller-chosen key
#[derive(Debug, Clone)]
pub struct ImageResource {
    pub key: String,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageResource {
    /// Create an image resource, reading its pixel size from the payload
    pub fn new<S: Into<String>>(bytes: Vec<u8>, format: ImageFormat, key: S) -> Result<Self> {
        let (width, height) = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .into_dimensions()?;

        Ok(Self {
            key: key.into(),
            bytes,
            format,
            width,
            height,
        })
    }

    /// Create an image resource with a known size, for payloads that cannot be decoded
    /// here (metafiles, PICT)
    pub fn with_dimensions<S: Into<String>>(
        bytes: Vec<u8>,
        format: ImageFormat,
        key: S,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            key: key.into(),
            bytes,
            format,
            width,
            height,
        }
    }
}

/// A file to embed in a cell; the file name doubles as its registry key
#[derive(Debug, Clone)]
pub struct FileResource {
    pub bytes: Vec<u8>,
    pub format: FileFormat,
    pub file_name: String,
}

impl FileResource {
    /// Create a file resource keyed by its file name
    pub fn new<S: Into<String>>(bytes: Vec<u8>, format: FileFormat, file_name: S) -> Self {
        Self {
            bytes,
            format,
            file_name: file_name.into(),
        }
    }
}

/// Render the built-in PNG icon for a file format: a colored page with a folded corner
pub fn render_default_icon(format: FileFormat, size: u32) -> Result<Vec<u8>> {
    let [r, g, b] = format.icon_color();
    let fold = size / 4;

    let icon = ImageBuffer::from_fn(size, size, |x, y| {
        let in_fold = x + fold >= size && y < fold;
        let on_edge = x == 0 || y == 0 || x + 1 == size || y + 1 == size;
        if in_fold {
            Rgba([255, 255, 255, 0])
        } else if on_edge {
            Rgba([r / 2, g / 2, b / 2, 255])
        } else {
            Rgba([r, g, b, 255])
        }
    });

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(icon)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_image_dimensions_are_decoded() {
        let image = ImageResource::new(png_bytes(150, 100), ImageFormat::Png, "cat.png").unwrap();
        assert_eq!(image.key, "cat.png");
        assert_eq!((image.width, image.height), (150, 100));
    }

    #[test]
    fn test_undecodable_image_is_an_error() {
        let result = ImageResource::new(vec![1, 2, 3, 4], ImageFormat::Png, "broken.png");
        assert!(result.is_err());
    }

    #[test]
    fn test_picture_types() {
        assert_eq!(ImageFormat::Emf.picture_type(), 2);
        assert_eq!(ImageFormat::Jpeg.picture_type(), 5);
        assert_eq!(ImageFormat::Png.picture_type(), 6);
        assert_eq!(ImageFormat::Dib.picture_type(), 7);
    }

    #[test]
    fn test_image_formats_share_an_icon() {
        assert_eq!(FileFormat::Jpg.icon_key(), FileFormat::Png.icon_key());
        assert_eq!(FileFormat::Text.icon_key(), "icon_txt.png");
    }

    #[test]
    fn test_default_icon_is_a_png_of_the_requested_size() {
        let bytes = render_default_icon(FileFormat::Pdf, 30).unwrap();
        let icon = ImageResource::new(bytes, ImageFormat::Png, "icon_pdf.png").unwrap();
        assert_eq!((icon.width, icon.height), (30, 30));
    }
}
