//! PVRTC1 and PVRTC2 4bpp blocks.
//!
//! A block is a 32-bit modulation word (2 bits per texel, row-major) followed
//! by a 32-bit colour word holding colour A in bits 0..=15 and colour B in
//! bits 16..=31. Each block is encoded on its own with A and B taken from the
//! block's darkest and brightest texels; decoders blend neighbouring blocks,
//! so edges between very different blocks soften.
//!
//! PVRTC1 blocks are stored in Morton order, see [`morton_offset`].

use super::{luma_extremes, quantize, rgba_distance};
use basis_transcoder_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Modulation weights (out of 8) toward colour B.
const MODULATION_WEIGHTS: [u32; 4] = [0, 3, 5, 8];

/// Index of block `(x, y)` in a PVRTC1 texture of `width` x `height` blocks.
///
/// The low bits of `x` and `y` are interleaved (`y` first) up to the smaller
/// dimension; the remaining high bits of the larger dimension are appended.
pub fn morton_offset(width: u32, height: u32, x: u32, y: u32) -> usize {
    let (min_dim, mut rest) = if height < width { (height, x) } else { (width, y) };

    let mut swizzled = 0u32;
    let mut shift = 0u32;
    let mut s_bit = 1u32;
    let mut d_bit = 1u32;
    while s_bit < min_dim {
        if y & s_bit != 0 {
            swizzled |= d_bit;
        }
        if x & s_bit != 0 {
            swizzled |= d_bit << 1;
        }
        s_bit <<= 1;
        d_bit <<= 2;
        shift += 1;
    }
    rest >>= shift;
    (swizzled | (rest << (2 * shift))) as usize
}

/// Colour as a PVRTC decoder reconstructs it from a packed endpoint.
#[derive(Clone, Copy)]
struct Endpoint {
    color: Color8888,
    bits: u16,
}

fn expand(v: u8, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((v as u32 * 255 + max / 2) / max) as u8
}

/// Packs colour A (`is_b == false`, 15 bits) or colour B (16 bits).
fn pack_endpoint(c: Color8888, opaque: bool, is_b: bool) -> Endpoint {
    if opaque {
        let (r, g) = (quantize(c.r, 5), quantize(c.g, 5));
        let (b, b_bits) = if is_b { (quantize(c.b, 5), 5) } else { (quantize(c.b, 4), 4) };
        let bits = if is_b {
            0x8000 | (r as u16) << 10 | (g as u16) << 5 | b as u16
        } else {
            0x8000 | (r as u16) << 10 | (g as u16) << 5 | (b as u16) << 1
        };
        Endpoint {
            color: Color8888::new(expand(r, 5), expand(g, 5), expand(b, b_bits), 255),
            bits,
        }
    } else {
        let a = quantize(c.a, 3);
        let (r, g) = (quantize(c.r, 4), quantize(c.g, 4));
        let (b, b_bits) = if is_b { (quantize(c.b, 4), 4) } else { (quantize(c.b, 3), 3) };
        let bits = if is_b {
            (a as u16) << 12 | (r as u16) << 8 | (g as u16) << 4 | b as u16
        } else {
            (a as u16) << 12 | (r as u16) << 8 | (g as u16) << 4 | (b as u16) << 1
        };
        Endpoint {
            color: Color8888::new(expand(r, 4), expand(g, 4), expand(b, b_bits), expand(a, 3)),
            bits,
        }
    }
}

fn modulate(a: Color8888, b: Color8888, w: u32) -> Color8888 {
    let mix = |x: u8, y: u8| ((x as u32 * (8 - w) + y as u32 * w) / 8) as u8;
    Color8888::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

fn encode_block(block: &Decoded4x4Block, with_alpha: bool) -> (Endpoint, Endpoint, u32) {
    let opaque = !with_alpha || block.is_opaque();
    let (lo, hi) = luma_extremes(block);
    let a = pack_endpoint(lo, opaque, false);
    let b = pack_endpoint(hi, opaque, true);

    let mut modulation = 0u32;
    for (i, p) in block.pixels.iter().enumerate() {
        let target = if with_alpha { *p } else { p.with_alpha(255) };
        let m = (0..4)
            .min_by_key(|&m| rgba_distance(modulate(a.color, b.color, MODULATION_WEIGHTS[m]), target))
            .unwrap_or(0);
        modulation |= (m as u32) << (i * 2);
    }
    (a, b, modulation)
}

/// Encodes one PVRTC1 4bpp block.
pub fn encode_pvrtc1_block(block: &Decoded4x4Block, with_alpha: bool) -> [u8; 8] {
    let (a, b, modulation) = encode_block(block, with_alpha);
    let color = (b.bits as u32) << 16 | a.bits as u32;
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&modulation.to_le_bytes());
    out[4..].copy_from_slice(&color.to_le_bytes());
    out
}

/// Encodes one PVRTC2 4bpp block.
///
/// PVRTC2 carries a single opacity flag in bit 31 and uses bit 15 as the hard
/// transition flag, which is left clear.
pub fn encode_pvrtc2_block(block: &Decoded4x4Block, with_alpha: bool) -> [u8; 8] {
    let (a, b, modulation) = encode_block(block, with_alpha);
    let color = ((b.bits as u32) << 16 | a.bits as u32) & !0x8000;
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&modulation.to_le_bytes());
    out[4..].copy_from_slice(&color.to_le_bytes());
    out
}
