//! BC7 mode 6 encoder: one subset, RGBA 7-bit endpoints with a p-bit each,
//! 4-bit indices.

use super::{rgba_distance, BlockBits};
use basis_transcoder_common::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

const MODE6_WEIGHTS: [u32; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

#[inline]
fn interpolate(e0: u8, e1: u8, weight: u32) -> u8 {
    ((e0 as u32 * (64 - weight) + e1 as u32 * weight + 32) >> 6) as u8
}

fn interpolate_color(e0: Color8888, e1: Color8888, index: usize) -> Color8888 {
    let w = MODE6_WEIGHTS[index];
    Color8888::new(
        interpolate(e0.r, e1.r, w),
        interpolate(e0.g, e1.g, w),
        interpolate(e0.b, e1.b, w),
        interpolate(e0.a, e1.a, w),
    )
}

/// Quantized endpoint: four 7-bit channels sharing one p-bit.
#[derive(Clone, Copy)]
struct Endpoint {
    channels: [u8; 4],
    pbit: u8,
}

impl Endpoint {
    fn quantize(color: Color8888) -> Self {
        let mut best = Endpoint {
            channels: [0; 4],
            pbit: 0,
        };
        let mut best_err = u32::MAX;
        for pbit in 0..2u8 {
            let mut channels = [0u8; 4];
            let mut err = 0u32;
            for (c, q) in channels.iter_mut().enumerate() {
                let v = color.channel(c) as i32;
                *q = ((v - pbit as i32 + 1) / 2).clamp(0, 127) as u8;
                let d = v - ((*q as i32) << 1 | pbit as i32);
                err += (d * d) as u32;
            }
            if err < best_err {
                best_err = err;
                best = Endpoint { channels, pbit };
            }
        }
        best
    }

    fn to_color(self) -> Color8888 {
        let c = |i: usize| (self.channels[i] << 1) | self.pbit;
        Color8888::new(c(0), c(1), c(2), c(3))
    }
}

/// Encodes `block` as a BC7 mode 6 block.
pub fn encode_bc7(block: &Decoded4x4Block) -> [u8; 16] {
    let mut lo = [255u8; 4];
    let mut hi = [0u8; 4];
    for p in &block.pixels {
        for c in 0..4 {
            lo[c] = lo[c].min(p.channel(c));
            hi[c] = hi[c].max(p.channel(c));
        }
    }

    let mut e0 = Endpoint::quantize(Color8888::new(lo[0], lo[1], lo[2], lo[3]));
    let mut e1 = Endpoint::quantize(Color8888::new(hi[0], hi[1], hi[2], hi[3]));
    let (c0, c1) = (e0.to_color(), e1.to_color());

    let mut indices = [0u8; 16];
    for (idx, &p) in indices.iter_mut().zip(block.pixels.iter()) {
        *idx = (0..16)
            .min_by_key(|&i| rgba_distance(interpolate_color(c0, c1, i), p))
            .unwrap_or(0) as u8;
    }

    // The anchor index is stored with an implicit zero high bit.
    if indices[0] & 8 != 0 {
        core::mem::swap(&mut e0, &mut e1);
        for idx in &mut indices {
            *idx = 15 - *idx;
        }
    }

    let mut bits = BlockBits::default();
    bits.put(1 << 6, 7);
    for c in 0..4 {
        bits.put(e0.channels[c] as u32, 7);
        bits.put(e1.channels[c] as u32, 7);
    }
    bits.put(e0.pbit as u32, 1);
    bits.put(e1.pbit as u32, 1);
    bits.put(indices[0] as u32, 3);
    for &idx in &indices[1..] {
        bits.put(idx as u32, 4);
    }
    debug_assert_eq!(bits.position(), 128);
    bits.to_bytes()
}

#[cfg(test)]
fn decode_bc7_mode6(bytes: &[u8; 16]) -> [Color8888; 16] {
    let v = u128::from_le_bytes(*bytes);
    let get = |pos: u32, n: u32| ((v >> pos) & ((1u128 << n) - 1)) as u8;
    assert_eq!(get(0, 7), 1 << 6);
    let mut e = [[0u8; 4]; 2];
    for c in 0..4 {
        e[0][c] = get(7 + c as u32 * 14, 7);
        e[1][c] = get(14 + c as u32 * 14, 7);
    }
    let p0 = get(63, 1);
    let p1 = get(64, 1);
    let c0 = Color8888::new(e[0][0] << 1 | p0, e[0][1] << 1 | p0, e[0][2] << 1 | p0, e[0][3] << 1 | p0);
    let c1 = Color8888::new(e[1][0] << 1 | p1, e[1][1] << 1 | p1, e[1][2] << 1 | p1, e[1][3] << 1 | p1);
    core::array::from_fn(|i| {
        let idx = if i == 0 {
            get(65, 3)
        } else {
            get(68 + (i as u32 - 1) * 4, 4)
        };
        interpolate_color(c0, c1, idx as usize)
    })
}
