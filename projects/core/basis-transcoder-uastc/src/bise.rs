//! # Bounded Integer Sequence Encoding
//!
//! UASTC endpoints are quantized to one of the ASTC BISE ranges. A value is a
//! trit (0..3) or quint (0..5) digit plus a number of plain low bits. Unlike
//! ASTC, UASTC stores all digits first, packed as base-3 or base-5 integers
//! (5 trits in 8 bits, 3 quints in 7 bits), followed by every value's bits.

use basis_transcoder_common::BitReader;

/// Most endpoint values any mode carries.
pub const MAX_ENDPOINT_COUNT: usize = 18;

/// One BISE range.
#[derive(Debug, Clone, Copy)]
pub struct BiseRange {
    /// Plain bits per value.
    pub bits: u8,
    /// Whether values carry a trit.
    pub trits: bool,
    /// Whether values carry a quint.
    pub quints: bool,
    /// Largest representable value.
    pub max: u8,
    /// Bit shuffle for the unquantization `B` term: letters name bits `a..=f`, `0` is zero.
    deq_b: &'static [u8; 9],
    /// Unquantization `C` term.
    deq_c: u8,
}

const fn range(
    bits: u8,
    trits: bool,
    quints: bool,
    max: u8,
    deq_b: &'static [u8; 9],
    deq_c: u8,
) -> BiseRange {
    BiseRange {
        bits,
        trits,
        quints,
        max,
        deq_b,
        deq_c,
    }
}

/// BISE ranges indexed by range index.
#[rustfmt::skip]
pub static BISE_RANGES: [BiseRange; 21] = [
    range(1, false, false,   1, b"         ",   0),
    range(0, true,  false,   2, b"         ",   0),
    range(2, false, false,   3, b"         ",   0),
    range(0, false, true,    4, b"         ",   0),
    range(1, true,  false,   5, b"000000000", 204),
    range(3, false, false,   7, b"         ",   0),
    range(1, false, true,    9, b"000000000", 113),
    range(2, true,  false,  11, b"b000b0bb0",  93),
    range(4, false, false,  15, b"         ",   0),
    range(2, false, true,   19, b"b0000bb00",  54),
    range(3, true,  false,  23, b"cb000cbcb",  44),
    range(5, false, false,  31, b"         ",   0),
    range(3, false, true,   39, b"cb0000cbc",  26),
    range(4, true,  false,  47, b"dcb000dcb",  22),
    range(6, false, false,  63, b"         ",   0),
    range(4, false, true,   79, b"dcb0000dc",  13),
    range(5, true,  false,  95, b"edcb000ed",  11),
    range(7, false, false, 127, b"         ",   0),
    range(5, false, true,  159, b"edcb0000e",   6),
    range(6, true,  false, 191, b"fedcb000f",   5),
    range(8, false, false, 255, b"         ",   0),
];

/// Bits holding the last `n` trits of a sequence, indexed by `n`.
const TRIT_TAIL_BITS: [u32; 5] = [0, 2, 4, 5, 7];
/// Bits holding the last `n` quints of a sequence, indexed by `n`.
const QUINT_TAIL_BITS: [u32; 3] = [0, 3, 5];

/// A quantized endpoint value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantEndpoint {
    /// Trit or quint digit, zero for plain ranges.
    pub digit: u8,
    /// Plain low bits.
    pub bits: u8,
}

fn read_digits(
    reader: &mut BitReader,
    out: &mut [QuantEndpoint],
    base: u32,
    per_group: usize,
    group_bits: u32,
    tail_bits: &[u32],
) {
    for chunk in out.chunks_mut(per_group) {
        let bits = match chunk.len() {
            n if n == per_group => group_bits,
            n => tail_bits[n],
        };
        let mut packed = reader.get_bits(bits);
        for value in chunk.iter_mut() {
            value.digit = (packed % base) as u8;
            packed /= base;
        }
    }
}

/// Reads `count` endpoint values quantized to `range_index`.
pub fn decode_endpoints(
    reader: &mut BitReader,
    range_index: u8,
    count: usize,
) -> [QuantEndpoint; MAX_ENDPOINT_COUNT] {
    let mut output = [QuantEndpoint::default(); MAX_ENDPOINT_COUNT];
    let range = BISE_RANGES[range_index as usize];
    let values = &mut output[..count.min(MAX_ENDPOINT_COUNT)];

    if range.quints {
        read_digits(reader, values, 5, 3, 7, &QUINT_TAIL_BITS);
    }
    if range.trits {
        read_digits(reader, values, 3, 5, 8, &TRIT_TAIL_BITS);
    }
    if range.bits > 0 {
        for value in values.iter_mut() {
            value.bits = reader.get_bits(range.bits as u32) as u8;
        }
    }

    output
}

/// Expands a quantized endpoint to 8 bits.
pub fn unquant_endpoint(quant: QuantEndpoint, range_index: u8) -> u8 {
    let range = BISE_RANGES[range_index as usize];
    let bits = quant.bits as u16;

    if !range.trits && !range.quints {
        // Replicate the value's bits downwards from the top.
        let mut left_aligned = bits << (8 - range.bits);
        let mut value = 0u16;
        while left_aligned > 0 {
            value |= left_aligned;
            left_aligned >>= range.bits;
        }
        return value as u8;
    }

    let a = if bits & 1 != 0 { 511 } else { 0 };
    let mut b = 0u16;
    for &shift in range.deq_b {
        b <<= 1;
        if shift != b'0' && shift != b' ' {
            b |= (bits >> (shift - b'a')) & 1;
        }
    }
    let value = (quant.digit as u16 * range.deq_c as u16 + b) ^ a;
    ((a & 0x80) | (value >> 2)) as u8
}

/// Expands quantized weights of `weight_bits` bits to the 0..=64 range in place.
pub fn unquant_weights(weights: &mut [u8], weight_bits: u8) {
    const LUT1: [u8; 2] = [0, 64];
    const LUT2: [u8; 4] = [0, 21, 43, 64];
    const LUT3: [u8; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
    const LUT4: [u8; 16] = [0, 4, 8, 12, 17, 21, 25, 29, 35, 39, 43, 47, 52, 56, 60, 64];
    #[rustfmt::skip]
    const LUT5: [u8; 32] = [
        0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30,
        34, 36, 38, 40, 42, 44, 46, 48, 50, 52, 54, 56, 58, 60, 62, 64,
    ];

    let lut: &[u8] = match weight_bits {
        1 => &LUT1,
        2 => &LUT2,
        3 => &LUT3,
        4 => &LUT4,
        _ => &LUT5,
    };
    for weight in weights {
        *weight = lut[*weight as usize & (lut.len() - 1)];
    }
}
