//! ETC1 block layout shared by the ETC1S decoder and the ETC1/ETC2 packers.
//!
//! An ETC1 block is 8 bytes. Bytes 0..=2 hold the base colours (either
//! 5-bit base + 3-bit signed delta per channel, or two 4-bit colours),
//! byte 3 holds the two intensity table indices plus the `diff` and `flip`
//! bits, and bytes 4..=7 hold a big-endian selector word: bit `16 + p` is the
//! high bit and bit `p` the low bit of pixel `p = x * 4 + y`.

use crate::{color_8888::Color8888, decoded_4x4_block::Decoded4x4Block};

/// Intensity modifier tables indexed by a *linear* selector (0 = most negative).
pub const ETC1_INTEN_TABLES: [[i16; 4]; 8] = [
    [-8, -2, 2, 8],
    [-17, -5, 5, 17],
    [-29, -9, 9, 29],
    [-42, -13, 13, 42],
    [-60, -18, 18, 60],
    [-80, -24, 24, 80],
    [-106, -33, 33, 106],
    [-183, -47, 47, 183],
];

/// Maps a linear selector to the ETC1 hardware selector index.
pub const LINEAR_TO_ETC1_SELECTOR: [u8; 4] = [3, 2, 0, 1];

/// Maps an ETC1 hardware selector index to a linear selector.
pub const ETC1_TO_LINEAR_SELECTOR: [u8; 4] = [2, 3, 1, 0];

/// Expands a 5-bit channel to 8 bits.
#[inline]
pub const fn expand5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}

/// Expands a 4-bit channel to 8 bits.
#[inline]
pub const fn expand4(c: u8) -> u8 {
    (c << 4) | c
}

/// Applies a linear selector of intensity table `inten` to an expanded base colour.
#[inline]
pub fn apply_modifier(base: [u8; 3], inten: u8, linear_selector: u8) -> Color8888 {
    let m = ETC1_INTEN_TABLES[inten as usize & 7][linear_selector as usize & 3];
    let c = |v: u8| (v as i16 + m).clamp(0, 255) as u8;
    Color8888::new(c(base[0]), c(base[1]), c(base[2]), 255)
}

/// Raw 8-byte ETC1 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Etc1Block {
    /// Block bytes in memory order.
    pub bytes: [u8; 8],
}

impl Etc1Block {
    /// Wraps existing block bytes.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self { bytes }
    }

    /// Whether the block uses differential (5-bit base + delta) colours.
    #[inline]
    pub fn diff_bit(&self) -> bool {
        self.bytes[3] & 2 != 0
    }

    /// Sets the differential mode bit.
    #[inline]
    pub fn set_diff_bit(&mut self, diff: bool) {
        self.bytes[3] = (self.bytes[3] & !2) | ((diff as u8) << 1);
    }

    /// Whether subblocks are stacked vertically (top/bottom) instead of side by side.
    #[inline]
    pub fn flip_bit(&self) -> bool {
        self.bytes[3] & 1 != 0
    }

    /// Sets the flip bit.
    #[inline]
    pub fn set_flip_bit(&mut self, flip: bool) {
        self.bytes[3] = (self.bytes[3] & !1) | flip as u8;
    }

    /// Intensity table of `subblock` (0 or 1).
    #[inline]
    pub fn inten_table(&self, subblock: usize) -> u8 {
        let shift = if subblock == 0 { 5 } else { 2 };
        (self.bytes[3] >> shift) & 7
    }

    /// Sets the intensity table of `subblock` (0 or 1).
    #[inline]
    pub fn set_inten_table(&mut self, subblock: usize, table: u8) {
        let shift = if subblock == 0 { 5 } else { 2 };
        self.bytes[3] = (self.bytes[3] & !(7 << shift)) | ((table & 7) << shift);
    }

    /// Sets a 5-bit base colour with a zero delta, so both subblocks share it.
    pub fn set_base5_color(&mut self, color5: [u8; 3]) {
        self.set_base5_with_delta(color5, [0, 0, 0]);
    }

    /// Sets a 5-bit base colour and a signed 3-bit delta (-4..=3) per channel.
    pub fn set_base5_with_delta(&mut self, color5: [u8; 3], delta: [i8; 3]) {
        for c in 0..3 {
            self.bytes[c] = ((color5[c] & 31) << 3) | ((delta[c] as u8) & 7);
        }
    }

    /// Sets two independent 4-bit colours (individual mode).
    pub fn set_base4_colors(&mut self, c0: [u8; 3], c1: [u8; 3]) {
        for c in 0..3 {
            self.bytes[c] = ((c0[c] & 15) << 4) | (c1[c] & 15);
        }
    }

    #[inline]
    fn selector_word(&self) -> u32 {
        u32::from_be_bytes([self.bytes[4], self.bytes[5], self.bytes[6], self.bytes[7]])
    }

    /// Hardware selector index (0..=3) of pixel `(x, y)`.
    #[inline]
    pub fn selector(&self, x: usize, y: usize) -> u8 {
        let p = x * 4 + y;
        let word = self.selector_word();
        ((((word >> (16 + p)) & 1) << 1) | ((word >> p) & 1)) as u8
    }

    /// Sets the hardware selector index (0..=3) of pixel `(x, y)`.
    #[inline]
    pub fn set_selector(&mut self, x: usize, y: usize, etc1_index: u8) {
        let p = x * 4 + y;
        let mut word = self.selector_word();
        word &= !((1 << (16 + p)) | (1 << p));
        word |= (((etc1_index as u32) >> 1) & 1) << (16 + p);
        word |= ((etc1_index as u32) & 1) << p;
        self.bytes[4..8].copy_from_slice(&word.to_be_bytes());
    }

    /// Expanded 8-bit base colours of both subblocks.
    pub fn subblock_colors(&self) -> [[u8; 3]; 2] {
        let mut out = [[0u8; 3]; 2];
        for c in 0..3 {
            let byte = self.bytes[c];
            if self.diff_bit() {
                let base = byte >> 3;
                let delta = ((byte & 7) << 5) as i8 >> 5;
                let second = (base as i8 + delta).clamp(0, 31) as u8;
                out[0][c] = expand5(base);
                out[1][c] = expand5(second);
            } else {
                out[0][c] = expand4(byte >> 4);
                out[1][c] = expand4(byte & 15);
            }
        }
        out
    }

    /// Subblock (0 or 1) containing pixel `(x, y)`.
    #[inline]
    pub fn subblock_of(&self, x: usize, y: usize) -> usize {
        if self.flip_bit() {
            (y >= 2) as usize
        } else {
            (x >= 2) as usize
        }
    }

    /// Decodes the block to opaque RGBA texels.
    pub fn decode(&self) -> Decoded4x4Block {
        let colors = self.subblock_colors();
        let mut out = Decoded4x4Block::default();
        for y in 0..4 {
            for x in 0..4 {
                let sb = self.subblock_of(x, y);
                let linear = ETC1_TO_LINEAR_SELECTOR[self.selector(x, y) as usize];
                out.set_pixel(
                    x,
                    y,
                    apply_modifier(colors[sb], self.inten_table(sb), linear),
                );
            }
        }
        out
    }
}
