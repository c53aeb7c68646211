//! # Global Selector Codebook
//!
//! A fixed table of 4x4 selector patterns that selector palettes may reference
//! instead of storing patterns inline. Each entry packs 16 linear 2-bit
//! selectors, texel `(x, y)` at bits `2 * (y * 4 + x)`.
//!
//! Entries are looked up together with a 7-bit modifier:
//!
//! | Bits  | Meaning                                     |
//! |-------|---------------------------------------------|
//! | 0..=1 | clockwise rotation in 90 degree steps       |
//! | 2     | horizontal mirror (applied before rotation) |
//! | 3     | inversion (`s -> 3 - s`)                    |
//! | 4..=6 | contrast remap, see [`CONTRAST_REMAP`]      |
//!
//! The codebook is immutable once built and is shared between transcoders
//! behind an `Arc`.

use crate::{error::Etc1sError, selector::Selector};
use alloc::vec::Vec;

/// Number of entries in the procedurally generated codebook.
pub const GLOBAL_SELECTOR_CODEBOOK_SIZE: usize = 3072;

/// Number of distinct modifiers.
pub const TOTAL_MODIFIERS: u32 = 128;

/// Linear selector remaps selected by the modifier's contrast bits.
pub const CONTRAST_REMAP: [[u8; 4]; 8] = [
    [0, 1, 2, 3],
    [0, 0, 3, 3],
    [1, 1, 2, 2],
    [0, 1, 1, 2],
    [1, 2, 2, 3],
    [0, 0, 1, 1],
    [2, 2, 3, 3],
    [0, 2, 1, 3],
];

/// Immutable table of selector patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSelectorCodebook {
    entries: Vec<u32>,
}

impl Default for GlobalSelectorCodebook {
    fn default() -> Self {
        Self::new()
    }
}

/// SplitMix32 style mixer used to derive the procedural entries.
const fn mix(mut z: u32) -> u32 {
    z = z.wrapping_add(0x9E37_79B9);
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

impl GlobalSelectorCodebook {
    /// Builds the standard procedural codebook of [`GLOBAL_SELECTOR_CODEBOOK_SIZE`] entries.
    pub fn new() -> Self {
        let entries = (0..GLOBAL_SELECTOR_CODEBOOK_SIZE as u32).map(mix).collect();
        Self { entries }
    }

    /// Builds a codebook from caller-supplied packed entries.
    ///
    /// # Errors
    ///
    /// Returns [`Etc1sError::InvalidPalette`] for an empty entry list.
    pub fn from_entries(entries: Vec<u32>) -> Result<Self, Etc1sError> {
        if entries.is_empty() {
            return Err(Etc1sError::InvalidPalette("codebook has no entries"));
        }
        Ok(Self { entries })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the codebook has no entries (never true for constructed codebooks).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns entry `index` transformed by `modifier`, or `None` if either is out of range.
    pub fn get(&self, index: u32, modifier: u32) -> Option<Selector> {
        if modifier >= TOTAL_MODIFIERS {
            return None;
        }
        let raw = Selector::from_packed(*self.entries.get(index as usize)?);

        let rotation = modifier & 3;
        let mirror = modifier & 4 != 0;
        let invert = modifier & 8 != 0;
        let remap = &CONTRAST_REMAP[(modifier >> 4) as usize & 7];

        let mut out = Selector::default();
        for y in 0..4 {
            for x in 0..4 {
                let (mut sx, mut sy) = (x, y);
                // Destination (x, y) reads the source texel that rotation moved there.
                for _ in 0..rotation {
                    (sx, sy) = (sy, 3 - sx);
                }
                if mirror {
                    sx = 3 - sx;
                }
                let mut s = raw.get(sx, sy);
                if invert {
                    s = 3 - s;
                }
                out.set(x, y, remap[s as usize]);
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbered() -> GlobalSelectorCodebook {
        // Row y holds selector y everywhere, column 0 of row 0 is 3.
        let mut s = Selector::from_packed(0);
        for y in 0..4 {
            for x in 0..4 {
                s.set(x, y, y as u8);
            }
        }
        s.set(0, 0, 3);
        GlobalSelectorCodebook::from_entries(vec![s.packed()]).unwrap()
    }

    #[test]
    fn procedural_codebook_is_deterministic() {
        let a = GlobalSelectorCodebook::new();
        let b = GlobalSelectorCodebook::new();
        assert_eq!(a.len(), GLOBAL_SELECTOR_CODEBOOK_SIZE);
        assert_eq!(a, b);
    }

    #[test]
    fn identity_modifier_returns_entry() {
        let cb = numbered();
        let s = cb.get(0, 0).unwrap();
        assert_eq!(s.get(0, 0), 3);
        assert_eq!(s.get(1, 0), 0);
        assert_eq!(s.get(2, 3), 3);
    }

    #[test]
    fn inversion_flips_selectors() {
        let cb = numbered();
        let s = cb.get(0, 8).unwrap();
        assert_eq!(s.get(0, 0), 0);
        assert_eq!(s.get(1, 1), 2);
    }

    #[test]
    fn mirror_swaps_columns() {
        let cb = numbered();
        let s = cb.get(0, 4).unwrap();
        assert_eq!(s.get(3, 0), 3);
        assert_eq!(s.get(0, 0), 0);
    }

    #[test]
    fn four_rotations_are_identity() {
        let cb = GlobalSelectorCodebook::new();
        let once = cb.get(5, 1).unwrap();
        // Rotating the rotated entry three more times must land on the original.
        let rotated = GlobalSelectorCodebook::from_entries(vec![once.packed()]).unwrap();
        assert_eq!(rotated.get(0, 3).unwrap(), cb.get(5, 0).unwrap());
    }

    #[rstest]
    #[case(1, 0)]
    #[case(0, TOTAL_MODIFIERS)]
    fn out_of_range_lookups_fail(#[case] index: u32, #[case] modifier: u32) {
        assert!(numbered().get(index, modifier).is_none());
    }

    #[test]
    fn rejects_empty_entries() {
        assert!(GlobalSelectorCodebook::from_entries(Vec::new()).is_err());
    }
}
