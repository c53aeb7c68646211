//! # UASTC Block Decoding
//!
//! A UASTC block is 128 bits read least-significant-first:
//!
//! 1. mode prefix, see [`crate::mode`];
//! 2. transcoding hints (skipped, they only speed up re-encoding);
//! 3. component selector for dual-plane modes;
//! 4. partition pattern index for multi-subset modes;
//! 5. BISE coded endpoints, see [`crate::bise`];
//! 6. weights, one or two planes, anchors stored with one bit less.
//!
//! Mode 8 instead stores a single RGBA8 colour for the whole block.

use crate::{
    bise::{decode_endpoints, unquant_endpoint, unquant_weights, MAX_ENDPOINT_COUNT},
    error::UastcError,
    mode::{Mode, CEM_LA, CEM_RGB, MODES, MODE_LUT, RESERVED_MODE, SOLID_COLOR_MODE},
    patterns::*,
};
use basis_transcoder_common::{
    color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, BitReader,
};
use basis_transcoder_formats::{packers::astc::astc_interpolate, SourceBlock};
use likely_stable::unlikely;

/// Size of one UASTC block in bytes.
pub const UASTC_BLOCK_SIZE: usize = 16;

fn decode_mode(reader: &mut BitReader) -> Result<Mode, UastcError> {
    let code = reader.peek_bits(7);
    let index = MODE_LUT[code as usize];
    if unlikely(index >= RESERVED_MODE) {
        return Err(UastcError::InvalidMode(code));
    }
    let mode = MODES[index as usize];
    reader.skip_bits(mode.code_size as u32);
    Ok(mode)
}

fn decode_compsel(reader: &mut BitReader, mode: &Mode) -> usize {
    match (mode.plane_count, mode.cem) {
        // Luminance/alpha modes always put alpha on the second plane.
        (2, CEM_LA) => 3,
        (2, _) => reader.get_bits(2) as usize,
        _ => 0,
    }
}

/// Returns `(pattern, anchors)` for the block, or `None` for single-subset modes.
fn decode_pattern(
    reader: &mut BitReader,
    mode: &Mode,
) -> Result<Option<(&'static [u8; 16], &'static [u8])>, UastcError> {
    let (bits, count) = match (mode.id, mode.subset_count) {
        (_, 1) => return Ok(None),
        // Mode 7 has two subsets but indexes the shared 2/3 table.
        (7, _) => (5, TOTAL_PATTERNS_2_3),
        (_, 2) => (5, TOTAL_PATTERNS_2),
        _ => (4, TOTAL_PATTERNS_3),
    };

    let index = reader.get_bits(bits) as usize;
    if unlikely(index >= count) {
        return Err(UastcError::InvalidPattern {
            mode: mode.id,
            pattern: index as u8,
        });
    }

    Ok(Some(match (mode.id, mode.subset_count) {
        (7, _) => (&PATTERNS_2_3[index], PATTERNS_2_3_ANCHORS[index].as_slice()),
        (_, 2) => (&PATTERNS_2[index], PATTERNS_2_ANCHORS[index].as_slice()),
        _ => (&PATTERNS_3[index], PATTERNS_3_ANCHORS[index].as_slice()),
    }))
}

/// Decodes one UASTC block to RGBA texels.
///
/// # Errors
///
/// Returns [`UastcError`] for the reserved mode or an out of range pattern.
pub fn decode_block(bytes: &[u8; UASTC_BLOCK_SIZE]) -> Result<Decoded4x4Block, UastcError> {
    let mut reader = BitReader::new(bytes);
    let mode = decode_mode(&mut reader)?;

    if mode.id == SOLID_COLOR_MODE {
        let [r, g, b, a] = [0; 4].map(|_: u8| reader.get_bits(8) as u8);
        return Ok(Decoded4x4Block::new(Color8888::new(r, g, b, a)));
    }

    reader.skip_bits(mode.trans_flags_bits as u32);
    let compsel = decode_compsel(&mut reader, &mode);
    let pattern = decode_pattern(&mut reader, &mode)?;

    // Endpoints are stored low/high interleaved per channel.
    let quant = decode_endpoints(&mut reader, mode.endpoint_range_index, mode.endpoint_count as usize);
    let mut endpoints = [0u8; MAX_ENDPOINT_COUNT];
    for (value, q) in endpoints.iter_mut().zip(quant).take(mode.endpoint_count as usize) {
        *value = unquant_endpoint(q, mode.endpoint_range_index);
    }

    let planes = mode.plane_count as usize;
    let mut weight_bits = [mode.weight_bits as u32; 16];
    match pattern {
        Some((_, anchors)) => anchors.iter().for_each(|&a| weight_bits[a as usize] -= 1),
        None => weight_bits[0] -= 1,
    }
    let mut weights = [0u8; 32];
    for (texel, &bits) in weight_bits.iter().enumerate() {
        for plane in 0..planes {
            weights[texel * planes + plane] = reader.get_bits(bits) as u8;
        }
    }
    unquant_weights(&mut weights[..16 * planes], mode.weight_bits);

    let values_per_subset = match mode.cem {
        CEM_RGB => 6,
        CEM_LA => 4,
        _ => 8,
    };
    let subset_endpoints = |subset: usize| -> (Color8888, Color8888) {
        let e = &endpoints[subset * values_per_subset..];
        match mode.cem {
            CEM_RGB => (
                Color8888::new(e[0], e[2], e[4], 255),
                Color8888::new(e[1], e[3], e[5], 255),
            ),
            CEM_LA => (
                Color8888::new(e[0], e[0], e[0], e[2]),
                Color8888::new(e[1], e[1], e[1], e[3]),
            ),
            _ => (
                Color8888::new(e[0], e[2], e[4], e[6]),
                Color8888::new(e[1], e[3], e[5], e[7]),
            ),
        }
    };

    // Channel `c` reads its weight from plane `plane_of[c]`.
    let mut plane_of = [0usize; 4];
    if planes > 1 {
        plane_of[compsel] = 1;
    }

    let mut block = Decoded4x4Block::default();
    for (texel, pixel) in block.pixels.iter_mut().enumerate() {
        let subset = pattern.map_or(0, |(p, _)| p[texel] as usize);
        let (e0, e1) = subset_endpoints(subset);
        let channel = |c: usize| {
            let w = weights[texel * planes + plane_of[c]] as u32;
            astc_interpolate(e0.channel(c), e1.channel(c), w)
        };
        *pixel = Color8888::new(channel(0), channel(1), channel(2), channel(3));
    }
    Ok(block)
}

/// One UASTC block with its decoded texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UastcBlock {
    /// Block bytes.
    pub bytes: [u8; UASTC_BLOCK_SIZE],
    decoded: Decoded4x4Block,
}

impl UastcBlock {
    /// Decodes `bytes`, keeping both the raw and decoded forms.
    pub fn new(bytes: [u8; UASTC_BLOCK_SIZE]) -> Result<Self, UastcError> {
        let decoded = decode_block(&bytes)?;
        Ok(Self { bytes, decoded })
    }

    /// Decoded texels.
    #[inline]
    pub fn texels(&self) -> &Decoded4x4Block {
        &self.decoded
    }
}

impl SourceBlock for UastcBlock {
    #[inline]
    fn decode(&self) -> Decoded4x4Block {
        self.decoded
    }
}
