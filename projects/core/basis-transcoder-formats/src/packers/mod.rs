//! Block packers: one decoded 4x4 block in, one output block out.
//!
//! Every packer is a single-pass encoder that picks endpoints from the block's
//! extremes and then chooses the closest palette entry per texel.

pub mod astc;
pub mod atc;
pub mod bc1;
pub mod bc4;
pub mod bc7;
pub mod eac;
pub mod etc1;
pub mod fxt1;
pub mod pvrtc;
pub mod raster;

use basis_transcoder_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Collects channel `index` (0 = red, 3 = alpha) of every texel, row-major.
#[inline]
pub fn channel_values(block: &Decoded4x4Block, index: usize) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (v, p) in out.iter_mut().zip(block.pixels.iter()) {
        *v = p.channel(index);
    }
    out
}

#[inline]
pub(crate) fn rgb_distance(a: Color8888, b: Color8888) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

#[inline]
pub(crate) fn rgba_distance(a: Color8888, b: Color8888) -> u32 {
    let da = a.a as i32 - b.a as i32;
    rgb_distance(a, b) + (da * da) as u32
}

/// Returns the texels with the lowest and highest luma.
pub(crate) fn luma_extremes(block: &Decoded4x4Block) -> (Color8888, Color8888) {
    let mut lo = block.pixels[0];
    let mut hi = block.pixels[0];
    for &p in &block.pixels[1..] {
        if p.luma() < lo.luma() {
            lo = p;
        }
        if p.luma() > hi.luma() {
            hi = p;
        }
    }
    (lo, hi)
}

/// Index of the palette entry closest to `pixel`.
#[inline]
pub(crate) fn closest_rgb(palette: &[Color8888], pixel: Color8888) -> usize {
    let mut best = 0;
    let mut best_err = u32::MAX;
    for (i, &c) in palette.iter().enumerate() {
        let err = rgb_distance(c, pixel);
        if err < best_err {
            best_err = err;
            best = i;
        }
    }
    best
}

#[inline]
pub(crate) fn lerp_u8(a: u8, b: u8, num: u32, den: u32) -> u8 {
    ((a as u32 * (den - num) + b as u32 * num + den / 2) / den) as u8
}

#[inline]
pub(crate) fn lerp_color(a: Color8888, b: Color8888, num: u32, den: u32) -> Color8888 {
    Color8888::new(
        lerp_u8(a.r, b.r, num, den),
        lerp_u8(a.g, b.g, num, den),
        lerp_u8(a.b, b.b, num, den),
        lerp_u8(a.a, b.a, num, den),
    )
}

/// Quantizes an 8-bit value to `bits` bits, rounding to nearest.
#[inline]
pub(crate) const fn quantize(value: u8, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((value as u32 * max + 127) / 255) as u8
}

/// LSB-first writer filling a 128-bit block.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BlockBits {
    value: u128,
    pos: u32,
}

impl BlockBits {
    #[inline]
    pub(crate) fn put(&mut self, value: u32, bits: u32) {
        debug_assert!(self.pos + bits <= 128);
        let mask = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
        self.value |= ((value & mask) as u128) << self.pos;
        self.pos += bits;
    }

    #[inline]
    pub(crate) fn position(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub(crate) fn value(&self) -> u128 {
        self.value
    }

    #[inline]
    pub(crate) fn to_bytes(self) -> [u8; 16] {
        self.value.to_le_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_bits_pack_lsb_first() {
        let mut bits = BlockBits::default();
        bits.put(0b101, 3);
        bits.put(0xFF, 8);
        assert_eq!(bits.position(), 11);
        assert_eq!(bits.value(), 0b111_1111_1101);
    }

    #[test]
    fn quantize_rounds_to_nearest() {
        assert_eq!(quantize(255, 5), 31);
        assert_eq!(quantize(0, 5), 0);
        assert_eq!(quantize(132, 4), 8);
    }
}
