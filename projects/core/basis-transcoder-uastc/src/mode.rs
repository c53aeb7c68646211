//! UASTC block modes.
//!
//! The mode is identified by a variable length prefix of up to 7 bits; peeking
//! 7 bits and looking them up in [`MODE_LUT`] yields the mode index, and the
//! mode's `code_size` says how many of those bits belong to the prefix.

/// ASTC colour endpoint mode: RGB direct.
pub const CEM_RGB: u8 = 8;
/// ASTC colour endpoint mode: RGBA direct.
pub const CEM_RGBA: u8 = 12;
/// ASTC colour endpoint mode: luminance + alpha direct.
pub const CEM_LA: u8 = 4;

/// Mode index of the solid colour mode.
pub const SOLID_COLOR_MODE: u8 = 8;
/// First reserved mode index.
pub const RESERVED_MODE: u8 = 19;

/// Layout of one block mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode {
    /// Mode index.
    pub id: u8,
    /// Bits in the mode prefix.
    pub code_size: u8,
    /// Index into the BISE range table for endpoints.
    pub endpoint_range_index: u8,
    /// Number of endpoint values.
    pub endpoint_count: u8,
    /// Bits per weight.
    pub weight_bits: u8,
    /// Weight planes.
    pub plane_count: u8,
    /// Partition subsets.
    pub subset_count: u8,
    /// Bits of transcoding hints that follow the prefix.
    pub trans_flags_bits: u8,
    /// Colour endpoint mode.
    pub cem: u8,
}

#[allow(clippy::too_many_arguments)]
const fn mode(
    id: u8,
    code_size: u8,
    endpoint_range_index: u8,
    endpoint_count: u8,
    weight_bits: u8,
    plane_count: u8,
    subset_count: u8,
    trans_flags_bits: u8,
    cem: u8,
) -> Mode {
    Mode {
        id,
        code_size,
        endpoint_range_index,
        endpoint_count,
        weight_bits,
        plane_count,
        subset_count,
        trans_flags_bits,
        cem,
    }
}

/// All modes, indexed by mode id.
#[rustfmt::skip]
pub static MODES: [Mode; 20] = [
    mode(0,  4, 19,  6, 4, 1, 1, 15, CEM_RGB),
    mode(1,  6, 20,  6, 2, 1, 1, 15, CEM_RGB),
    mode(2,  5,  8, 12, 3, 1, 2, 15, CEM_RGB),
    mode(3,  5,  7, 18, 2, 1, 3, 15, CEM_RGB),
    mode(4,  5, 12, 12, 2, 1, 2, 15, CEM_RGB),
    mode(5,  5, 20,  6, 3, 1, 1, 15, CEM_RGB),
    mode(6,  5, 18,  6, 2, 2, 1, 15, CEM_RGB),
    mode(7,  5, 12, 12, 2, 1, 2, 15, CEM_RGB),
    mode(8,  5,  0,  0, 0, 0, 0,  0, 0),
    mode(9,  5,  8, 16, 2, 1, 2, 23, CEM_RGBA),
    mode(10, 3, 13,  8, 4, 1, 1, 17, CEM_RGBA),
    mode(11, 2, 13,  8, 2, 2, 1, 17, CEM_RGBA),
    mode(12, 3, 19,  8, 3, 1, 1, 17, CEM_RGBA),
    mode(13, 5, 20,  8, 1, 2, 1, 23, CEM_RGBA),
    mode(14, 5, 20,  8, 2, 1, 1, 23, CEM_RGBA),
    mode(15, 7, 20,  4, 4, 1, 1, 23, CEM_LA),
    mode(16, 6, 20,  8, 2, 1, 2, 23, CEM_LA),
    mode(17, 6, 20,  4, 2, 2, 1, 23, CEM_LA),
    mode(18, 4, 11,  6, 5, 1, 1, 15, CEM_RGB),
    mode(19, 7,  0,  0, 0, 0, 0,  0, 0),
];

/// Mode index for every 7-bit prefix value.
#[rustfmt::skip]
pub static MODE_LUT: [u8; 128] = [
    11,  0, 10, 3, 11, 15, 12,  7,
    11, 18, 10, 5, 11, 14, 12,  9,
    11,  0, 10, 4, 11, 16, 12,  8,
    11, 18, 10, 6, 11,  2, 12, 13,
    11,  0, 10, 3, 11, 17, 12,  7,
    11, 18, 10, 5, 11, 14, 12,  9,
    11,  0, 10, 4, 11,  1, 12,  8,
    11, 18, 10, 6, 11,  2, 12, 13,
    11,  0, 10, 3, 11, 19, 12,  7,
    11, 18, 10, 5, 11, 14, 12,  9,
    11,  0, 10, 4, 11, 16, 12,  8,
    11, 18, 10, 6, 11,  2, 12, 13,
    11,  0, 10, 3, 11, 17, 12,  7,
    11, 18, 10, 5, 11, 14, 12,  9,
    11,  0, 10, 4, 11,  1, 12,  8,
    11, 18, 10, 6, 11,  2, 12, 13,
];
