//! Image filters for textures and overlays

use tracing::debug;
use vizcrate_core::{Error, Image, Result, TextureImage};

/// Check that an image can be displayed: non-empty, 8-bit, 1, 3 or 4 channels
pub fn validate_display_image(image: &Image) -> Result<&[u8]> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }
    let samples = image.as_u8().ok_or(Error::UnsupportedDepth {
        depth: image.data().depth_name(),
    })?;
    match image.channels() {
        1 | 3 | 4 => Ok(samples),
        channels => Err(Error::UnsupportedChannels { channels }),
    }
}

/// Copy an image into display layout.
///
/// Source row `r` becomes texture row `rows - 1 - r`, since images count rows
/// from the top and textures from the bottom. Multi-channel pixels have their
/// first and third channel swapped (blue-green-red to red-green-blue).
pub fn texture_from_image(image: &Image) -> Result<TextureImage> {
    let samples = validate_display_image(image)?;
    let (rows, cols, chs) = (image.rows(), image.cols(), image.channels());
    let row_len = cols * chs;

    let mut texture = TextureImage::new(cols, rows, chs);
    for (r, src_row) in samples.chunks_exact(row_len).enumerate() {
        let dst_start = (rows - 1 - r) * row_len;
        let dst_row = &mut texture.data[dst_start..dst_start + row_len];
        dst_row.copy_from_slice(src_row);
        if chs > 1 {
            for pixel in dst_row.chunks_exact_mut(chs) {
                pixel.swap(0, 2);
            }
        }
    }
    debug!(rows, cols, channels = chs, "copied image into texture");
    Ok(texture)
}

/// Resample a texture to `width x height` with bilinear interpolation.
///
/// Output pixel centers map back onto the input with independent scale
/// factors per axis, so the aspect ratio follows the target rectangle.
pub fn reslice(texture: &TextureImage, width: usize, height: usize) -> TextureImage {
    let mut out = TextureImage::new(width, height, texture.channels);
    if texture.width == 0 || texture.height == 0 {
        return out;
    }
    let sx = texture.width as f32 / width.max(1) as f32;
    let sy = texture.height as f32 / height.max(1) as f32;
    let max_x = (texture.width - 1) as f32;
    let max_y = (texture.height - 1) as f32;

    for y in 0..height {
        let fy = ((y as f32 + 0.5) * sy - 0.5).clamp(0.0, max_y);
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(texture.height - 1);
        let wy = fy - y0 as f32;
        for x in 0..width {
            let fx = ((x as f32 + 0.5) * sx - 0.5).clamp(0.0, max_x);
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(texture.width - 1);
            let wx = fx - x0 as f32;

            for c in 0..texture.channels {
                let v00 = texture.pixel(x0, y0)[c] as f32;
                let v10 = texture.pixel(x1, y0)[c] as f32;
                let v01 = texture.pixel(x0, y1)[c] as f32;
                let v11 = texture.pixel(x1, y1)[c] as f32;
                let top = v00 + (v10 - v00) * wx;
                let bottom = v01 + (v11 - v01) * wx;
                let value = top + (bottom - top) * wy;
                out.pixel_mut(x, y)[c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
