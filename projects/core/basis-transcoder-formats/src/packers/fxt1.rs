//! FXT1 `CC_MIXED` blocks covering 8x4 texels.
//!
//! Bits 0..=31 hold the left 4x4 half's 2-bit indices and bits 32..=63 the
//! right half's. Bits 64..=123 hold four RGB555 colours (blue in the low bits):
//! colours 0 and 1 span the left half, 2 and 3 the right. Bit 124 is the alpha
//! flag, bits 125 and 126 the extra green bits, and bit 127 selects `CC_MIXED`.

use super::{closest_rgb, lerp_color, luma_extremes, quantize, BlockBits};
use basis_transcoder_common::{
    color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, etc1::expand5,
};

fn pack555(c: Color8888) -> u32 {
    (quantize(c.r, 5) as u32) << 10 | (quantize(c.g, 5) as u32) << 5 | quantize(c.b, 5) as u32
}

fn unpack555(v: u32) -> Color8888 {
    Color8888::new(
        expand5(((v >> 10) & 31) as u8),
        expand5(((v >> 5) & 31) as u8),
        expand5((v & 31) as u8),
        255,
    )
}

fn encode_half(block: &Decoded4x4Block) -> (u32, u32, u32) {
    let (lo, hi) = luma_extremes(block);
    let (c0, c1) = (pack555(lo), pack555(hi));
    let (a, b) = (unpack555(c0), unpack555(c1));
    let colors = [a, lerp_color(a, b, 1, 3), lerp_color(a, b, 2, 3), b];
    let mut indices = 0u32;
    for (i, &p) in block.pixels.iter().enumerate() {
        indices |= (closest_rgb(&colors, p) as u32) << (i * 2);
    }
    (indices, c0, c1)
}

/// Encodes two horizontally adjacent 4x4 blocks as one FXT1 block.
pub fn encode_fxt1(left: &Decoded4x4Block, right: &Decoded4x4Block) -> [u8; 16] {
    let (left_indices, c0, c1) = encode_half(left);
    let (right_indices, c2, c3) = encode_half(right);

    let mut bits = BlockBits::default();
    bits.put(left_indices, 32);
    bits.put(right_indices, 32);
    for c in [c0, c1, c2, c3] {
        bits.put(c, 15);
    }
    bits.put(0, 1); // alpha
    bits.put(0, 2); // green lsbs
    bits.put(1, 1); // CC_MIXED
    bits.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_mixed_mode_and_colours() {
        let left = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
        let right = Decoded4x4Block::new(Color8888::new(0, 0, 255, 255));
        let out = encode_fxt1(&left, &right);
        let v = u128::from_le_bytes(out);
        assert_eq!(v >> 127, 1);
        let color = |i: u32| ((v >> (64 + i * 15)) & 0x7FFF) as u32;
        assert_eq!(unpack555(color(0)), Color8888::new(255, 0, 0, 255));
        assert_eq!(unpack555(color(2)), Color8888::new(0, 0, 255, 255));
    }

    #[test]
    fn halves_have_independent_indices() {
        let mut left = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
        left.set_pixel(0, 0, Color8888::new(255, 255, 255, 255));
        let right = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
        let v = u128::from_le_bytes(encode_fxt1(&left, &right));
        assert_eq!(v & 3, 3);
        assert_eq!((v >> 32) & 0xFFFF_FFFF, 0);
    }
}
