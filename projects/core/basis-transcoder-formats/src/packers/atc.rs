//! ATC (AMD/Qualcomm) blocks.
//!
//! Colour block: `color0` is RGB555 with the top bit as the mode flag (0 =
//! interpolated), `color1` is RGB565, then 16 2-bit row-major indices. Index 0
//! is `color0`, 3 is `color1`, 1 and 2 are the thirds in between.

use super::{bc4::encode_bc4, channel_values, closest_rgb, lerp_color, luma_extremes, quantize};
use basis_transcoder_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
    etc1::expand5,
};

fn color555(c: Color8888) -> u16 {
    (quantize(c.r, 5) as u16) << 10 | (quantize(c.g, 5) as u16) << 5 | quantize(c.b, 5) as u16
}

fn expand555(value: u16) -> Color8888 {
    let r = ((value >> 10) & 31) as u8;
    let g = ((value >> 5) & 31) as u8;
    let b = (value & 31) as u8;
    Color8888::new(expand5(r), expand5(g), expand5(b), 255)
}

/// Palette for a mode 0 block.
pub fn palette(color0: u16, color1: u16) -> [Color8888; 4] {
    let a = expand555(color0);
    let b = Color565::from_raw(color1).to_color_8888();
    [a, lerp_color(a, b, 1, 3), lerp_color(a, b, 2, 3), b]
}

/// Encodes the RGB part of `block` as an ATC RGB block.
pub fn encode_atc_rgb(block: &Decoded4x4Block) -> [u8; 8] {
    let (lo, hi) = luma_extremes(block);
    let color0 = color555(lo);
    let color1 = Color565::from_rgb_rounded(hi.r, hi.g, hi.b).raw_value();

    let colors = palette(color0, color1);
    let mut indices = 0u32;
    for (i, &p) in block.pixels.iter().enumerate() {
        indices |= (closest_rgb(&colors, p) as u32) << (i * 2);
    }

    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&color0.to_le_bytes());
    out[2..4].copy_from_slice(&color1.to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
    out
}

/// ATC RGBA with interpolated alpha: a BC4-style alpha block, then the colour block.
pub fn encode_atc_rgba(block: &Decoded4x4Block) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encode_bc4(&channel_values(block, 3)));
    out[8..].copy_from_slice(&encode_atc_rgb(block));
    out
}
