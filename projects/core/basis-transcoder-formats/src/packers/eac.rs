//! EAC single-channel blocks (ETC2 alpha, R11 and RG11).
//!
//! Layout: `base: u8`, `multiplier << 4 | table: u8`, then 16 3-bit indices as
//! a 48-bit big-endian value. Texels are ordered column-major (`p = x * 4 + y`)
//! with texel 0 in the most significant bits.
//!
//! R11 decodes `base * 8 + 4 + modifier * multiplier * 8`, which is the A8
//! value scaled to 11 bits, so one encoder serves both.

use super::channel_values;
use basis_transcoder_common::decoded_4x4_block::Decoded4x4Block;

/// Modifier tables, indexed by table then selector.
pub const EAC_MODIFIER_TABLES: [[i8; 8]; 16] = [
    [-3, -6, -9, -15, 2, 5, 8, 14],
    [-3, -7, -10, -13, 2, 6, 9, 12],
    [-2, -5, -8, -13, 1, 4, 7, 12],
    [-2, -4, -6, -13, 1, 3, 5, 12],
    [-3, -6, -8, -12, 2, 5, 7, 11],
    [-3, -7, -9, -11, 2, 6, 8, 10],
    [-4, -7, -8, -11, 3, 6, 7, 10],
    [-3, -5, -8, -11, 2, 4, 7, 10],
    [-2, -6, -8, -10, 1, 5, 7, 9],
    [-2, -5, -8, -10, 1, 4, 7, 9],
    [-2, -4, -8, -10, 1, 3, 7, 9],
    [-2, -5, -7, -10, 1, 4, 6, 9],
    [-3, -4, -7, -10, 2, 3, 6, 9],
    [-1, -2, -3, -10, 0, 1, 2, 9],
    [-4, -6, -8, -9, 3, 5, 7, 8],
    [-3, -5, -7, -9, 2, 4, 6, 8],
];

#[inline]
fn eac_value(base: i32, table: usize, multiplier: i32, selector: usize) -> i32 {
    (base + EAC_MODIFIER_TABLES[table][selector] as i32 * multiplier).clamp(0, 255)
}

struct Candidate {
    base: u8,
    table: u8,
    multiplier: u8,
    selectors: [u8; 16],
    error: u32,
}

fn evaluate(values: &[u8; 16], base: i32, table: usize, multiplier: i32) -> Candidate {
    let mut selectors = [0u8; 16];
    let mut error = 0u32;
    for (sel, &v) in selectors.iter_mut().zip(values.iter()) {
        let mut best_err = u32::MAX;
        for s in 0..8 {
            let d = eac_value(base, table, multiplier, s) - v as i32;
            let e = (d * d) as u32;
            if e < best_err {
                best_err = e;
                *sel = s as u8;
            }
        }
        error += best_err;
    }
    Candidate {
        base: base as u8,
        table: table as u8,
        multiplier: multiplier as u8,
        selectors,
        error,
    }
}

/// Encodes 16 row-major channel values as an EAC A8 block.
pub fn encode_eac_a8(values: &[u8; 16]) -> [u8; 8] {
    let max = values.iter().copied().max().unwrap_or(0) as i32;
    let min = values.iter().copied().min().unwrap_or(0) as i32;
    let range = max - min;

    let mut best: Option<Candidate> = None;
    for (table, mods) in EAC_MODIFIER_TABLES.iter().enumerate() {
        let lo = mods[3] as i32;
        let span = mods[7] as i32 - lo;
        let multiplier = ((range + span - 1) / span).clamp(1, 15);
        for base in [min - lo * multiplier, (min + max + 1) / 2] {
            let candidate = evaluate(values, base.clamp(0, 255), table, multiplier);
            if best.as_ref().is_none_or(|b| candidate.error < b.error) {
                best = Some(candidate);
            }
        }
    }

    // Table 0 always yields a candidate.
    let Some(best) = best else {
        return [0; 8];
    };

    let mut bits = 0u64;
    for x in 0..4 {
        for y in 0..4 {
            bits = (bits << 3) | best.selectors[y * 4 + x] as u64;
        }
    }

    let mut out = [0u8; 8];
    out[0] = best.base;
    out[1] = (best.multiplier << 4) | best.table;
    out[2..8].copy_from_slice(&bits.to_be_bytes()[2..8]);
    out
}

/// Encodes 16 row-major channel values as an EAC R11 block.
#[inline]
pub fn encode_eac_r11(values: &[u8; 16]) -> [u8; 8] {
    encode_eac_a8(values)
}

/// EAC R11 of the red channel.
pub fn encode_r11_block(block: &Decoded4x4Block) -> [u8; 8] {
    encode_eac_r11(&channel_values(block, 0))
}

/// EAC RG11: red, then alpha in the second channel.
pub fn encode_rg11_block(block: &Decoded4x4Block) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&encode_eac_r11(&channel_values(block, 0)));
    out[8..].copy_from_slice(&encode_eac_r11(&channel_values(block, 3)));
    out
}

#[cfg(test)]
pub(crate) fn decode_eac_a8(bytes: &[u8]) -> [u8; 16] {
    let base = bytes[0] as i32;
    let multiplier = (bytes[1] >> 4) as i32;
    let table = (bytes[1] & 15) as usize;
    let mut raw = [0u8; 8];
    raw[2..8].copy_from_slice(&bytes[2..8]);
    let bits = u64::from_be_bytes(raw);
    let mut out = [0u8; 16];
    for x in 0..4 {
        for y in 0..4 {
            let p = x * 4 + y;
            let s = ((bits >> (45 - 3 * p)) & 7) as usize;
            out[y * 4 + x] = eac_value(base, table, multiplier, s) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(128)]
    #[case(250)]
    #[case(255)]
    fn flat_values_are_exact(#[case] value: u8) {
        let encoded = encode_eac_a8(&[value; 16]);
        assert_eq!(decode_eac_a8(&encoded), [value; 16]);
        assert_ne!(encoded[1] >> 4, 0, "multiplier must be non-zero");
    }

    #[test]
    fn two_level_block_keeps_extremes_close() {
        let values: [u8; 16] = core::array::from_fn(|i| if i % 4 < 2 { 20 } else { 220 });
        let decoded = decode_eac_a8(&encode_eac_a8(&values));
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 16, "{a} vs {b}");
        }
    }

    #[test]
    fn selectors_are_column_major() {
        // Only texel (1, 0) differs; it lands in selector slot p = 4.
        let mut values = [0u8; 16];
        values[1] = 200;
        let decoded = decode_eac_a8(&encode_eac_a8(&values));
        assert!(decoded[1] > 150);
        assert!(decoded[4] < 50);
    }
}
