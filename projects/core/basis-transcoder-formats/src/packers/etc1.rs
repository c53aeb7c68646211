//! ETC1 encoder for texels that have no exact ETC1 representation (UASTC sources).
//!
//! Each subblock gets its average colour as base and the intensity table with
//! the lowest error. Both flip orientations are tried. Differential mode is used
//! when the two 5-bit averages are within delta range, individual mode otherwise.

use super::{channel_values, eac::encode_eac_a8, rgb_distance};
use basis_transcoder_common::{
    decoded_4x4_block::Decoded4x4Block,
    etc1::{apply_modifier, expand4, expand5, Etc1Block, LINEAR_TO_ETC1_SELECTOR},
};

fn subblock_pixels(flip: bool, subblock: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..4).flat_map(move |y| (0..4).map(move |x| (x, y))).filter(move |&(x, y)| {
        let in_second = if flip { y >= 2 } else { x >= 2 };
        in_second == (subblock == 1)
    })
}

fn subblock_average(block: &Decoded4x4Block, flip: bool, subblock: usize) -> [u32; 3] {
    let mut sum = [0u32; 3];
    for (x, y) in subblock_pixels(flip, subblock) {
        let p = block.get_pixel(x, y);
        sum[0] += p.r as u32;
        sum[1] += p.g as u32;
        sum[2] += p.b as u32;
    }
    sum.map(|s| (s + 4) / 8)
}

/// Picks the best table and selectors for one subblock; returns the error.
fn fit_subblock(
    block: &Decoded4x4Block,
    etc1: &mut Etc1Block,
    flip: bool,
    subblock: usize,
    base: [u8; 3],
) -> u32 {
    let mut best_table = 0u8;
    let mut best_err = u32::MAX;
    for table in 0..8u8 {
        let mut err = 0u32;
        for (x, y) in subblock_pixels(flip, subblock) {
            let p = block.get_pixel(x, y);
            err += (0..4)
                .map(|s| rgb_distance(apply_modifier(base, table, s), p))
                .min()
                .unwrap_or(0);
        }
        if err < best_err {
            best_err = err;
            best_table = table;
        }
    }

    etc1.set_inten_table(subblock, best_table);
    for (x, y) in subblock_pixels(flip, subblock) {
        let p = block.get_pixel(x, y);
        let linear = (0..4u8)
            .min_by_key(|&s| rgb_distance(apply_modifier(base, best_table, s), p))
            .unwrap_or(0);
        etc1.set_selector(x, y, LINEAR_TO_ETC1_SELECTOR[linear as usize]);
    }
    best_err
}

fn encode_with_flip(block: &Decoded4x4Block, flip: bool) -> (Etc1Block, u32) {
    let avg = [
        subblock_average(block, flip, 0),
        subblock_average(block, flip, 1),
    ];
    let q5 = avg.map(|c| c.map(|v| ((v * 31 + 127) / 255) as u8));

    let mut etc1 = Etc1Block::default();
    etc1.set_flip_bit(flip);

    let delta: [i32; 3] = core::array::from_fn(|c| q5[1][c] as i32 - q5[0][c] as i32);
    let bases = if delta.iter().all(|d| (-4..=3).contains(d)) {
        etc1.set_diff_bit(true);
        etc1.set_base5_with_delta(q5[0], delta.map(|d| d as i8));
        [q5[0].map(expand5), q5[1].map(expand5)]
    } else {
        let q4 = avg.map(|c| c.map(|v| ((v * 15 + 127) / 255) as u8));
        etc1.set_diff_bit(false);
        etc1.set_base4_colors(q4[0], q4[1]);
        [q4[0].map(expand4), q4[1].map(expand4)]
    };

    let err = fit_subblock(block, &mut etc1, flip, 0, bases[0])
        + fit_subblock(block, &mut etc1, flip, 1, bases[1]);
    (etc1, err)
}

/// Encodes the RGB part of `block` as an ETC1 block.
pub fn encode_etc1(block: &Decoded4x4Block) -> Etc1Block {
    let (side_by_side, err0) = encode_with_flip(block, false);
    if err0 == 0 {
        return side_by_side;
    }
    let (stacked, err1) = encode_with_flip(block, true);
    if err1 < err0 {
        stacked
    } else {
        side_by_side
    }
}

/// ETC2 RGBA: an EAC alpha block followed by the ETC1 colour block.
pub fn encode_etc2_rgba(block: &Decoded4x4Block, color: Option<&Etc1Block>) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encode_eac_a8(&channel_values(block, 3)));
    let color = match color {
        Some(exact) => *exact,
        None => encode_etc1(block),
    };
    out[8..].copy_from_slice(&color.bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_transcoder_common::color_8888::Color8888;
    use rstest::rstest;

    fn assert_close(a: Color8888, b: Color8888, tolerance: i32) {
        for c in 0..3 {
            let d = (a.channel(c) as i32 - b.channel(c) as i32).abs();
            assert!(d <= tolerance, "{a:?} vs {b:?}");
        }
    }

    #[rstest]
    #[case(Color8888::new(0, 0, 0, 255))]
    #[case(Color8888::new(255, 255, 255, 255))]
    #[case(Color8888::new(200, 40, 90, 255))]
    fn solid_blocks_stay_close(#[case] color: Color8888) {
        let encoded = encode_etc1(&Decoded4x4Block::new(color));
        for p in encoded.decode().pixels {
            assert_close(p, color, 8);
        }
    }

    #[test]
    fn split_block_uses_individual_mode() {
        let mut block = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
        for y in 0..4 {
            for x in 2..4 {
                block.set_pixel(x, y, Color8888::new(255, 255, 255, 255));
            }
        }
        let encoded = encode_etc1(&block);
        assert!(!encoded.diff_bit());
        assert!(!encoded.flip_bit());
        let decoded = encoded.decode();
        assert_close(decoded.get_pixel(0, 0), Color8888::new(0, 0, 0, 255), 8);
        assert_close(decoded.get_pixel(3, 3), Color8888::new(255, 255, 255, 255), 8);
    }

    #[test]
    fn etc2_prefers_exact_colour_block() {
        let block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        let exact = Etc1Block::from_bytes([9, 8, 7, 6, 5, 4, 3, 2]);
        let out = encode_etc2_rgba(&block, Some(&exact));
        assert_eq!(out[8..], exact.bytes);
    }
}
