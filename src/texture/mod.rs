//! Compressed texture (.TM) decoding.
//!
//! A texture file is a small fixed header followed by a run of 16-byte
//! compressed blocks, each covering a 4x4 texel tile. Blocks are stored
//! top-origin; the decoder writes rows bottom-up so the output buffer uses
//! a bottom-origin convention.

mod block;
pub mod normal;

use serde::Serialize;

use crate::error::{DecodeError, Result};
use crate::reader::Reader;
use block::Block;

/// File offset of the block-compression flag byte.
const FORMAT_FLAG_OFFSET: usize = 0x10;

/// File offset where block data begins.
const PIXEL_DATA_OFFSET: usize = 0x4C;

/// Bytes per compressed block.
const BLOCK_SIZE: usize = 16;

/// A fully decoded texture.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// True iff any pixel's alpha is below full opacity.
    pub has_alpha: bool,
    /// Row-major RGBA8 data, 4 bytes per pixel, bottom-origin rows.
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

impl DecodedTexture {
    /// Get the RGBA value of the pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Write the texture as a PNG file.
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Decode a compressed texture file from bytes.
///
/// Only the block-compressed layout is supported; any other format flag
/// yields [`DecodeError::UnsupportedFormat`] carrying the dimensions read
/// from the header.
pub fn decode_texture(bytes: &[u8]) -> Result<DecodedTexture> {
    let mut header = Reader::new(bytes);
    let width = header.read_i32()?;
    let height = header.read_i32()?;

    header.skip(FORMAT_FLAG_OFFSET - header.position())?;
    let block_compressed = header.read_u8()? > 0;
    if !block_compressed {
        return Err(DecodeError::UnsupportedFormat { width, height });
    }

    if width <= 0 || height <= 0 || width % 4 != 0 || height % 4 != 0 {
        return Err(DecodeError::MalformedRecord(format!(
            "texture dimensions {width}x{height} are not positive multiples of 4"
        )));
    }
    let width = width as usize;
    let height = height as usize;

    header.skip(PIXEL_DATA_OFFSET - header.position())?;
    let mut data = Reader::new(header.take(header.remaining())?);

    let x_segments = width / 4;
    let block_count = x_segments * (height / 4);

    // Verify the block region is actually present before allocating the
    // pixel buffer, so hostile header dimensions fail on the length check
    // instead of a giant allocation.
    let compressed_len = block_count * BLOCK_SIZE;
    if data.remaining() < compressed_len {
        return Err(DecodeError::TruncatedInput {
            offset: PIXEL_DATA_OFFSET,
            needed: compressed_len,
            remaining: data.remaining(),
        });
    }

    let mut pixels = vec![0u8; width * height * 4];
    let mut has_alpha = false;

    for index in 0..block_count {
        let raw = data.take(BLOCK_SIZE)?;
        let mut chunk = [0u8; BLOCK_SIZE];
        chunk.copy_from_slice(raw);

        let decoded = Block::decode(&chunk);
        has_alpha |= decoded.has_alpha;

        let x_segment = index % x_segments;
        let y_segment = index / x_segments;
        for tile_row in 0..4 {
            // Vertical flip: the source stores rows top-origin, the output
            // is bottom-origin.
            let out_row = height - 1 - (y_segment * 4 + tile_row);
            let out_col = x_segment * 4;
            let dst = (out_row * width + out_col) * 4;
            for tile_col in 0..4 {
                let texel = decoded.pixels[tile_row * 4 + tile_col];
                pixels[dst + tile_col * 4..dst + tile_col * 4 + 4].copy_from_slice(&texel);
            }
        }
    }

    Ok(DecodedTexture {
        width: width as u32,
        height: height as u32,
        has_alpha,
        pixels,
    })
}


#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    #[test]
    fn test_single_block_vertical_flip() {
        let mut block = solid_block(0xFFFF);
        // Texel 0 (tile row 0, column 0) selects color 1, the black endpoint.
        block[12] = 0b01;

        let texture = decode_texture(&texture_bytes(4, 4, &[block])).unwrap();
        assert_eq!(texture.width, 4);
        assert_eq!(texture.height, 4);
        // Tile row 0 lands on output row height-1.
        assert_eq!(texture.get_pixel(0, 3), [0, 0, 0, 255]);
        // The rest of the tile is white.
        assert_eq!(texture.get_pixel(1, 3), [255, 255, 255, 255]);
        assert_eq!(texture.get_pixel(0, 0), [255, 255, 255, 255]);
        assert!(!texture.has_alpha);
    }

    #[test]
    fn test_block_addressing_multiple_segments() {
        // 8x4: two blocks side by side; the second is red, the first white.
        let blocks = [solid_block(0xFFFF), solid_block(0xF800)];
        let texture = decode_texture(&texture_bytes(8, 4, &blocks)).unwrap();

        assert_eq!(texture.get_pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(texture.get_pixel(4, 0), [255, 0, 0, 255]);
        assert_eq!(texture.get_pixel(7, 3), [255, 0, 0, 255]);
    }

    #[test]
    fn test_has_alpha_is_or_over_blocks() {
        let opaque = solid_block(0xFFFF);
        let mut translucent = solid_block(0xFFFF);
        translucent[0] = 128; // all texels decode alpha 128

        let texture = decode_texture(&texture_bytes(8, 4, &[opaque, translucent])).unwrap();
        assert!(texture.has_alpha);
        assert_eq!(texture.get_pixel(0, 0)[3], 255);
        assert_eq!(texture.get_pixel(4, 0)[3], 128);
    }

    #[test]
    fn test_unsupported_format_carries_dimensions() {
        let mut bytes = texture_bytes(64, 32, &[]);
        bytes[FORMAT_FLAG_OFFSET] = 0;
        let err = decode_texture(&bytes).unwrap_err();
        match err {
            DecodeError::UnsupportedFormat { width, height } => {
                assert_eq!(width, 64);
                assert_eq!(height, 32);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_block_data() {
        // Header promises a 4x4 texture but carries no block bytes.
        let bytes = texture_bytes(4, 4, &[]);
        let err = decode_texture(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedInput { .. }));
    }

    #[test]
    fn test_truncated_header() {
        let err = decode_texture(&[0u8; 8]).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedInput { .. }));
    }

    #[test]
    fn test_hostile_dimensions_fail_before_allocation() {
        // A header-only file claiming 65536x65536 (a 16 GiB pixel buffer)
        // must come back as a truncation error, not an allocation attempt.
        let bytes = texture_bytes(65536, 65536, &[]);
        let err = decode_texture(&bytes).unwrap_err();
        match err {
            DecodeError::TruncatedInput {
                needed, remaining, ..
            } => {
                assert_eq!(needed, 65536 * 65536); // 16 bytes per 4x4 tile
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_multiple_of_four_dimensions_rejected() {
        let bytes = texture_bytes(6, 4, &[]);
        let err = decode_texture(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedRecord(_)));
    }
}
