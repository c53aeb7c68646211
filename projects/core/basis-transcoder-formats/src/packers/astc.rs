//! ASTC 4x4 LDR encoder.
//!
//! Uniform blocks become void-extent blocks. Everything else is a single
//! partition, colour endpoint mode 12 (RGBA direct) block with 8-bit endpoints
//! and a 4x4 grid of 2-bit weights.

use super::{rgba_distance, BlockBits};
use basis_transcoder_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Void-extent header: signature, UNORM16 endpoints, reserved bits, and
/// all-ones extent coordinates.
const VOID_EXTENT_HEADER: u64 = 0xFFFF_FFFF_FFFF_FDFC;

/// 4x4 weight grid, single plane, weight range 0..=3.
const BLOCK_MODE_4X4_QUANT4: u32 = 0x042;
const CEM_RGBA_DIRECT: u32 = 12;
const WEIGHT_BITS: u32 = 2;
const WEIGHT_UNQUANT: [u32; 4] = [0, 21, 43, 64];

/// Interpolates UNORM8 endpoints as an LDR decoder does, returning 8 bits.
#[inline]
pub fn astc_interpolate(e0: u8, e1: u8, weight: u32) -> u8 {
    let l = (e0 as u32) << 8 | e0 as u32;
    let h = (e1 as u32) << 8 | e1 as u32;
    ((l * (64 - weight) + h * weight + 32) >> 6 >> 8) as u8
}

fn weighted_color(e0: Color8888, e1: Color8888, weight: u32) -> Color8888 {
    Color8888::new(
        astc_interpolate(e0.r, e1.r, weight),
        astc_interpolate(e0.g, e1.g, weight),
        astc_interpolate(e0.b, e1.b, weight),
        astc_interpolate(e0.a, e1.a, weight),
    )
}

/// Encodes a void-extent block of a single colour.
pub fn encode_void_extent(color: Color8888) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&VOID_EXTENT_HEADER.to_le_bytes());
    for c in 0..4 {
        let v = color.channel(c) as u16;
        out[8 + c * 2..10 + c * 2].copy_from_slice(&(v << 8 | v).to_le_bytes());
    }
    out
}

/// Encodes `block` as an ASTC 4x4 block.
pub fn encode_astc(block: &Decoded4x4Block) -> [u8; 16] {
    if block.has_identical_pixels() {
        return encode_void_extent(block.pixels[0]);
    }

    let mut lo = [255u8; 4];
    let mut hi = [0u8; 4];
    for p in &block.pixels {
        for c in 0..4 {
            lo[c] = lo[c].min(p.channel(c));
            hi[c] = hi[c].max(p.channel(c));
        }
    }
    // Per-channel min/max keeps sum(e1.rgb) >= sum(e0.rgb), so no blue contraction applies.
    let e0 = Color8888::new(lo[0], lo[1], lo[2], lo[3]);
    let e1 = Color8888::new(hi[0], hi[1], hi[2], hi[3]);

    let mut bits = BlockBits::default();
    bits.put(BLOCK_MODE_4X4_QUANT4, 11);
    bits.put(0, 2); // one partition
    bits.put(CEM_RGBA_DIRECT, 4);
    for c in 0..4 {
        bits.put(lo[c] as u32, 8);
        bits.put(hi[c] as u32, 8);
    }

    // Weights are stored bit-reversed from the top of the block.
    let mut weights = 0u128;
    for (i, &p) in block.pixels.iter().enumerate() {
        let w = (0..4u32)
            .min_by_key(|&w| rgba_distance(weighted_color(e0, e1, WEIGHT_UNQUANT[w as usize]), p))
            .unwrap_or(0);
        weights |= (w as u128) << (i as u32 * WEIGHT_BITS);
    }
    let value = bits.value() | weights.reverse_bits();
    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Decodes the subset of ASTC produced by [`encode_astc`].
    fn decode(bytes: &[u8; 16]) -> [Color8888; 16] {
        let v = u128::from_le_bytes(*bytes);
        if v as u64 == VOID_EXTENT_HEADER {
            let ch = |c: u32| ((v >> (64 + c * 16 + 8)) & 0xFF) as u8;
            return [Color8888::new(ch(0), ch(1), ch(2), ch(3)); 16];
        }
        assert_eq!((v & 0x7FF) as u32, BLOCK_MODE_4X4_QUANT4);
        assert_eq!(((v >> 11) & 3) as u32, 0);
        assert_eq!(((v >> 13) & 15) as u32, CEM_RGBA_DIRECT);
        let ep = |i: u32| ((v >> (17 + i * 8)) & 0xFF) as u8;
        let e0 = Color8888::new(ep(0), ep(2), ep(4), ep(6));
        let e1 = Color8888::new(ep(1), ep(3), ep(5), ep(7));
        let weights = v.reverse_bits();
        core::array::from_fn(|i| {
            let w = ((weights >> (i * 2)) & 3) as usize;
            weighted_color(e0, e1, WEIGHT_UNQUANT[w])
        })
    }

    #[rstest]
    #[case(Color8888::new(255, 0, 255, 255))]
    #[case(Color8888::new(1, 2, 3, 4))]
    fn uniform_blocks_use_void_extent(#[case] color: Color8888) {
        let encoded = encode_astc(&Decoded4x4Block::new(color));
        assert_eq!(encoded[..2], [0xFC, 0xFD]);
        assert_eq!(decode(&encoded), [color; 16]);
    }

    #[test]
    fn endpoint_and_weight_regions_do_not_overlap() {
        // 17 header bits + 64 endpoint bits, weights take the top 32.
        assert!(17 + 64 <= 128 - 16 * WEIGHT_BITS);
    }

    #[test]
    fn two_colour_block_decodes_to_endpoints() {
        let a = Color8888::new(0, 0, 0, 0);
        let b = Color8888::new(255, 128, 64, 255);
        let mut block = Decoded4x4Block::new(a);
        for x in 0..4 {
            block.set_pixel(x, 3, b);
        }
        let decoded = decode(&encode_astc(&block));
        assert_eq!(decoded[0], a);
        assert_eq!(decoded[15], b);
    }

    #[test]
    fn interpolation_hits_endpoints() {
        assert_eq!(astc_interpolate(10, 200, 0), 10);
        assert_eq!(astc_interpolate(10, 200, 64), 200);
    }
}
