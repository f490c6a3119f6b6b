//! Image buffers
//!
//! `Image` is the caller-facing buffer: rows top to bottom, channels in
//! blue-green-red(-alpha) order. `TextureImage` is what display objects hold:
//! 8-bit samples, rows bottom to top, channels red-green-blue(-alpha).

use crate::{Error, Result, Size};
use serde::{Deserialize, Serialize};

/// Sample storage of an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl ImageData {
    pub fn depth_name(&self) -> &'static str {
        match self {
            ImageData::U8(_) => "u8",
            ImageData::U16(_) => "u16",
            ImageData::F32(_) => "f32",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ImageData::U8(v) => v.len(),
            ImageData::U16(v) => v.len(),
            ImageData::F32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A row-major image with interleaved channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    rows: usize,
    cols: usize,
    channels: usize,
    data: ImageData,
}

impl Image {
    /// Create an image, checking that the sample count matches the shape
    pub fn new(rows: usize, cols: usize, channels: usize, data: ImageData) -> Result<Self> {
        let expected = rows * cols * channels;
        if data.len() != expected {
            return Err(Error::InvalidData(format!(
                "image of {}x{}x{} needs {} samples, got {}",
                rows,
                cols,
                channels,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            channels,
            data,
        })
    }

    /// Create an 8-bit image
    pub fn from_u8(rows: usize, cols: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(rows, cols, channels, ImageData::U8(data))
    }

    /// Create an 8-bit image where every pixel has the same value
    pub fn filled(rows: usize, cols: usize, pixel: &[u8]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(rows * cols * pixel.len())
            .collect();
        Self {
            rows,
            cols,
            channels: pixel.len(),
            data: ImageData::U8(data),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    pub fn size(&self) -> Size {
        Size::new(self.cols as u32, self.rows as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0 || self.data.is_empty()
    }

    /// Samples of an 8-bit image
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            ImageData::U8(v) => Some(v),
            _ => None,
        }
    }
}

/// An 8-bit image in display layout: rows bottom to top, red first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureImage {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl TextureImage {
    /// Create a black texture
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width * height * channels],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    /// Samples of the pixel at column `x` of row `y` (row 0 is the bottom row)
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels]
    }

    /// Mutable samples of the pixel at column `x` of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = self.offset(x, y);
        &mut self.data[start..start + self.channels]
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} texture",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) * self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_sample_count() {
        assert!(Image::from_u8(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            Image::from_u8(2, 2, 3, vec![0; 11]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_filled() {
        let image = Image::filled(2, 3, &[1, 2, 3]);
        assert_eq!(image.channels(), 3);
        assert_eq!(image.size(), Size::new(3, 2));
        assert_eq!(image.as_u8().map(|d| d.len()), Some(18));
        assert_eq!(&image.as_u8().unwrap()[3..6], &[1, 2, 3]);
    }

    #[test]
    fn test_empty() {
        let image = Image::from_u8(0, 4, 1, Vec::new()).unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn test_texture_pixel_access() {
        let mut texture = TextureImage::new(2, 2, 3);
        texture.pixel_mut(1, 0).copy_from_slice(&[7, 8, 9]);
        assert_eq!(texture.pixel(1, 0), &[7, 8, 9]);
        assert_eq!(texture.data[3..6], [7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 texture")]
    fn test_texture_pixel_column_out_of_range() {
        // column 2 of row 0 would alias row 1 without the bounds check
        let texture = TextureImage::new(2, 2, 3);
        texture.pixel(2, 0);
    }
}
