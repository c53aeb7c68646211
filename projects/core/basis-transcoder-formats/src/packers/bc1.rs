//! BC1 (DXT1) colour blocks.
//!
//! Layout: `color0: u16`, `color1: u16` (RGB565, little endian), then 16 2-bit
//! indices in row-major order starting at the least significant bit.
//! With `color0 > color1` the block is in 4-colour mode.

use super::{closest_rgb, lerp_color, luma_extremes};
use basis_transcoder_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Palette of a 4-colour mode block.
pub fn palette(c0: Color565, c1: Color565) -> [Color8888; 4] {
    let a = c0.to_color_8888();
    let b = c1.to_color_8888();
    [a, b, lerp_color(a, b, 1, 3), lerp_color(a, b, 2, 3)]
}

/// Encodes the RGB part of `block` as a BC1 block. Alpha is ignored.
pub fn encode_bc1(block: &Decoded4x4Block) -> [u8; 8] {
    let (lo, hi) = luma_extremes(block);
    let mut c0 = Color565::from_rgb_rounded(hi.r, hi.g, hi.b);
    let mut c1 = Color565::from_rgb_rounded(lo.r, lo.g, lo.b);
    if c0.raw_value() < c1.raw_value() {
        core::mem::swap(&mut c0, &mut c1);
    }

    let mut indices = 0u32;
    if c0 != c1 {
        let colors = palette(c0, c1);
        for (i, &p) in block.pixels.iter().enumerate() {
            indices |= (closest_rgb(&colors, p) as u32) << (i * 2);
        }
    }

    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&c0.raw_value().to_le_bytes());
    out[2..4].copy_from_slice(&c1.raw_value().to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
    out
}

#[cfg(test)]
pub(crate) fn decode_bc1(bytes: &[u8]) -> [Color8888; 16] {
    let c0 = Color565::from_raw(u16::from_le_bytes([bytes[0], bytes[1]]));
    let c1 = Color565::from_raw(u16::from_le_bytes([bytes[2], bytes[3]]));
    let indices = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let colors = palette(c0, c1);
    core::array::from_fn(|i| colors[((indices >> (i * 2)) & 3) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Color8888::new(255, 0, 0, 255))]
    #[case(Color8888::new(0, 0, 0, 255))]
    #[case(Color8888::new(255, 255, 255, 255))]
    #[case(Color8888::new(8, 4, 248, 255))]
    fn solid_blocks_decode_to_quantized_colour(#[case] color: Color8888) {
        let block = Decoded4x4Block::new(color);
        let encoded = encode_bc1(&block);
        let expected = Color565::from_rgb_rounded(color.r, color.g, color.b).to_color_8888();
        assert!(decode_bc1(&encoded).iter().all(|&p| p == expected));
    }

    #[test]
    fn two_colour_block_keeps_both_colours() {
        let black = Color8888::new(0, 0, 0, 255);
        let white = Color8888::new(255, 255, 255, 255);
        let mut block = Decoded4x4Block::new(black);
        for x in 0..4 {
            block.set_pixel(x, 2, white);
        }
        let decoded = decode_bc1(&encode_bc1(&block));
        assert_eq!(decoded[0], black);
        assert_eq!(decoded[8], white);
    }

    #[test]
    fn uses_four_colour_mode() {
        let mut block = Decoded4x4Block::new(Color8888::new(10, 10, 10, 255));
        block.set_pixel(0, 0, Color8888::new(200, 180, 160, 255));
        let encoded = encode_bc1(&block);
        let c0 = u16::from_le_bytes([encoded[0], encoded[1]]);
        let c1 = u16::from_le_bytes([encoded[2], encoded[3]]);
        assert!(c0 > c1);
    }
}
