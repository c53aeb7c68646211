//! BC4 single-channel blocks, also used for BC3 alpha, BC5 and ATC alpha.
//!
//! Layout: `e0: u8`, `e1: u8`, then 16 3-bit indices (48 bits, little endian,
//! row-major). With `e0 > e1` the palette has 8 interpolated values.

use super::bc1::encode_bc1;
use super::channel_values;
use basis_transcoder_common::decoded_4x4_block::Decoded4x4Block;

/// Palette of an 8-value mode block (`e0 > e1`).
pub fn palette(e0: u8, e1: u8) -> [u8; 8] {
    let (a, b) = (e0 as u32, e1 as u32);
    let mut out = [0u8; 8];
    out[0] = e0;
    out[1] = e1;
    for (i, v) in out.iter_mut().enumerate().skip(2) {
        let i = i as u32;
        *v = (((8 - i) * a + (i - 1) * b) / 7) as u8;
    }
    out
}

/// Encodes 16 channel values as a BC4 block.
pub fn encode_bc4(values: &[u8; 16]) -> [u8; 8] {
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);

    let mut out = [0u8; 8];
    out[0] = max;
    out[1] = min;
    if max == min {
        return out;
    }

    let colors = palette(max, min);
    let mut indices = 0u64;
    for (i, &v) in values.iter().enumerate() {
        let best = colors
            .iter()
            .enumerate()
            .min_by_key(|&(_, &c)| (c as i32 - v as i32).unsigned_abs())
            .map(|(idx, _)| idx as u64)
            .unwrap_or(0);
        indices |= best << (i * 3);
    }
    out[2..8].copy_from_slice(&indices.to_le_bytes()[..6]);
    out
}

/// BC3: BC4 alpha followed by a BC1 colour block.
pub fn encode_bc3(block: &Decoded4x4Block) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encode_bc4(&channel_values(block, 3)));
    out[8..].copy_from_slice(&encode_bc1(block));
    out
}

/// BC5: two BC4 blocks carrying red and alpha.
pub fn encode_bc5(block: &Decoded4x4Block) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encode_bc4(&channel_values(block, 0)));
    out[8..].copy_from_slice(&encode_bc4(&channel_values(block, 3)));
    out
}

#[cfg(test)]
pub(crate) fn decode_bc4(bytes: &[u8]) -> [u8; 16] {
    let (e0, e1) = (bytes[0], bytes[1]);
    let mut raw = [0u8; 8];
    raw[..6].copy_from_slice(&bytes[2..8]);
    let indices = u64::from_le_bytes(raw);
    let colors = if e0 > e1 {
        palette(e0, e1)
    } else {
        // Only index 0 is produced for flat blocks.
        [e0, e1, 0, 0, 0, 0, 0, 255]
    };
    core::array::from_fn(|i| colors[((indices >> (i * 3)) & 7) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_transcoder_common::color_8888::Color8888;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(77)]
    #[case(255)]
    fn flat_values_roundtrip_exactly(#[case] value: u8) {
        assert_eq!(decode_bc4(&encode_bc4(&[value; 16])), [value; 16]);
    }

    #[test]
    fn gradient_stays_close() {
        let values: [u8; 16] = core::array::from_fn(|i| (i * 17) as u8);
        let decoded = decode_bc4(&encode_bc4(&values));
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 18, "{a} vs {b}");
        }
        assert_eq!(decoded[0], 0);
        assert_eq!(decoded[15], 255);
    }

    #[test]
    fn bc5_second_channel_is_alpha() {
        let block = Decoded4x4Block::new(Color8888::new(10, 20, 30, 40));
        let encoded = encode_bc5(&block);
        assert_eq!(decode_bc4(&encoded[..8]), [10; 16]);
        assert_eq!(decode_bc4(&encoded[8..]), [40; 16]);
    }

    #[test]
    fn bc3_puts_alpha_first() {
        let block = Decoded4x4Block::new(Color8888::new(255, 0, 0, 128));
        let encoded = encode_bc3(&block);
        assert_eq!(decode_bc4(&encoded[..8]), [128; 16]);
        assert_eq!(super::super::bc1::decode_bc1(&encoded[8..])[5].r, 255);
    }
}
