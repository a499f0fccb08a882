//! PNG encoding for RGBA canvases.
//!
//! Produces 8-bit truecolor-with-alpha PNGs (color type 6) with a single
//! IDAT chunk and no scanline filtering.

use geodraw_common::{GeoDrawError, GeoDrawResult};
use image::RgbaImage;
use std::io::Write;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode an RGBA canvas as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> GeoDrawResult<Vec<u8>> {
    create_png(
        image.as_raw(),
        image.width() as usize,
        image.height() as usize,
    )
}

/// Create a PNG image from raw RGBA pixel data.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel, row-major, top row first)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> GeoDrawResult<Vec<u8>> {
    let expected = width * height * 4;
    if pixels.len() != expected {
        return Err(GeoDrawError::Encoding(format!(
            "pixel buffer has {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            expected,
            width,
            height
        )));
    }
    if width == 0 || height == 0 || width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(GeoDrawError::Encoding(format!(
            "invalid image dimensions {}x{}",
            width, height
        )));
    }

    let mut png = Vec::with_capacity(expected / 4 + 64);
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(6); // color type (RGBA)
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let idat = deflate_scanlines(pixels, width, height)
        .map_err(|e| GeoDrawError::Encoding(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Append a length-prefixed, CRC-terminated chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Zlib-compress the scanlines, each prefixed with filter type 0.
fn deflate_scanlines(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 4;
    let mut encoder = flate2::write::ZlibEncoder::new(
        Vec::with_capacity(height * (stride + 1) / 4),
        flate2::Compression::fast(),
    );

    for row in pixels.chunks_exact(stride) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }

    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_ihdr() {
        let pixels = vec![0u8; 3 * 2 * 4];
        let png = create_png(&pixels, 3, 2).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..20], &3u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
        assert_eq!(png[24], 8);
        assert_eq!(png[25], 6);
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_chunk_crc() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"IEND", &[]);
        // Well-known CRC of an empty IEND chunk
        assert_eq!(&out[8..12], &[0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = create_png(&[0u8; 10], 2, 2).unwrap_err();
        assert!(matches!(err, GeoDrawError::Encoding(_)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(create_png(&[], 0, 0).is_err());
    }
}
