//! Uncompressed pixel formats.
//!
//! Rows are `orig_width` pixels wide with no padding. Texels of a block that
//! fall outside the original image are dropped.

use super::quantize;
use crate::{format::TranscoderTextureFormat, level::LevelGeometry};
use basis_transcoder_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Packs one pixel; returns the number of bytes written.
#[inline]
fn pack_pixel(format: TranscoderTextureFormat, p: Color8888, out: &mut [u8]) -> usize {
    match format {
        TranscoderTextureFormat::Rgba32 => {
            out[..4].copy_from_slice(&[p.r, p.g, p.b, p.a]);
            4
        }
        TranscoderTextureFormat::Rgb565 => {
            let v = Color565::from_rgb_rounded(p.r, p.g, p.b).raw_value();
            out[..2].copy_from_slice(&v.to_le_bytes());
            2
        }
        TranscoderTextureFormat::Bgr565 => {
            let v = Color565::from_rgb_rounded(p.b, p.g, p.r).raw_value();
            out[..2].copy_from_slice(&v.to_le_bytes());
            2
        }
        TranscoderTextureFormat::Rgba4444 => {
            let v = (quantize(p.r, 4) as u16) << 12
                | (quantize(p.g, 4) as u16) << 8
                | (quantize(p.b, 4) as u16) << 4
                | quantize(p.a, 4) as u16;
            out[..2].copy_from_slice(&v.to_le_bytes());
            2
        }
        _ => 0,
    }
}

/// Writes the texels of block `(block_x, block_y)` that lie inside the image.
pub fn write_block_pixels(
    format: TranscoderTextureFormat,
    block: &Decoded4x4Block,
    block_x: u32,
    block_y: u32,
    geometry: &LevelGeometry,
    output: &mut [u8],
) {
    let bpp = format.info().bytes_per_unit as usize;
    let width = geometry.orig_width as usize;
    let height = geometry.orig_height as usize;
    for y in 0..4 {
        let py = block_y as usize * 4 + y;
        if py >= height {
            break;
        }
        for x in 0..4 {
            let px = block_x as usize * 4 + x;
            if px >= width {
                break;
            }
            let offset = (py * width + px) * bpp;
            pack_pixel(format, block.get_pixel(x, y), &mut output[offset..offset + bpp]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TranscoderTextureFormat::Rgba32, vec![255, 0, 0, 128])]
    #[case(TranscoderTextureFormat::Rgb565, vec![0x00, 0xF8])]
    #[case(TranscoderTextureFormat::Bgr565, vec![0x1F, 0x00])]
    #[case(TranscoderTextureFormat::Rgba4444, vec![0x08, 0xF0])]
    fn packs_red_pixel(#[case] format: TranscoderTextureFormat, #[case] expected: Vec<u8>) {
        let mut out = [0u8; 4];
        let written = pack_pixel(format, Color8888::new(255, 0, 0, 128), &mut out);
        assert_eq!(out[..written], expected[..]);
    }

    #[test]
    fn clips_to_original_dimensions() {
        let geometry = LevelGeometry {
            orig_width: 5,
            orig_height: 3,
            num_blocks_x: 2,
            num_blocks_y: 1,
        };
        let mut out = vec![0u8; 5 * 3 * 4];
        let block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        write_block_pixels(TranscoderTextureFormat::Rgba32, &block, 1, 0, &geometry, &mut out);
        // Only column 4 of rows 0..3 belongs to block (1, 0).
        for row in 0..3 {
            assert_eq!(out[(row * 5 + 4) * 4..(row * 5 + 5) * 4], [1, 2, 3, 4]);
            assert!(out[row * 5 * 4..(row * 5 + 4) * 4].iter().all(|&b| b == 0));
        }
    }
}
