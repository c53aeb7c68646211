//! # Selector Palette
//!
//! A [`Selector`] holds the 16 linear 2-bit selectors of one 4x4 block, one
//! byte per row with texel `x` at bits `2 * x`. Linear selector 0 picks the
//! most negative intensity modifier and 3 the most positive.
//!
//! The palette section is stored in one of four ways, chosen by leading flag bits:
//!
//! - **global**: every entry is a codebook index plus a modifier;
//! - **hybrid**: a per-entry flag picks a codebook reference or delta-coded row bytes;
//! - **raw**: four literal row bytes per entry;
//! - **delta**: row bytes Huffman coded as XOR against the previous entry.

use crate::{codebook::GlobalSelectorCodebook, error::Etc1sError, read_symbol};
use alloc::vec::Vec;
use basis_transcoder_common::{read_huffman_table, BitReader};
use tracing::trace;

/// Linear selectors of one 4x4 block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Row `y` holds texel `x` at bits `2 * x`.
    pub rows: [u8; 4],
}

impl Selector {
    /// Builds a selector from its four row bytes.
    #[inline]
    pub const fn from_rows(rows: [u8; 4]) -> Self {
        Self { rows }
    }

    /// Builds a selector from a packed word, texel `(x, y)` at bits `2 * (y * 4 + x)`.
    #[inline]
    pub const fn from_packed(word: u32) -> Self {
        Self {
            rows: word.to_le_bytes(),
        }
    }

    /// Packed form, see [`Selector::from_packed`].
    #[inline]
    pub const fn packed(&self) -> u32 {
        u32::from_le_bytes(self.rows)
    }

    /// Linear selector of texel `(x, y)`.
    #[inline]
    pub const fn get(&self, x: usize, y: usize) -> u8 {
        (self.rows[y] >> (x * 2)) & 3
    }

    /// Sets the linear selector of texel `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let shift = x * 2;
        self.rows[y] = (self.rows[y] & !(3 << shift)) | ((value & 3) << shift);
    }
}

/// Decoded selector palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorPalette {
    entries: Vec<Selector>,
}

impl SelectorPalette {
    /// Decodes `count` selectors from the selector palette section.
    ///
    /// # Errors
    ///
    /// - [`Etc1sError::Bitstream`] for malformed Huffman tables.
    /// - [`Etc1sError::CodebookIndex`] for references past the end of `codebook`.
    /// - [`Etc1sError::IndexOutOfRange`] for undecodable symbols.
    pub fn decode(
        bytes: &[u8],
        count: u32,
        codebook: &GlobalSelectorCodebook,
    ) -> Result<Self, Etc1sError> {
        let mut reader = BitReader::new(bytes);
        let mut entries = Vec::with_capacity(count as usize);

        let lookup = |index: u32, modifier: u32| {
            codebook
                .get(index, modifier)
                .ok_or(Etc1sError::CodebookIndex { index, modifier })
        };

        if reader.get_bit() {
            let pal_bits = reader.get_bits(4);
            let mod_bits = reader.get_bits(4);
            let mod_model = match mod_bits {
                0 => None,
                _ => Some(read_huffman_table(&mut reader)?),
            };
            trace!(count, pal_bits, mod_bits, "Decoding global selector palette");

            for _ in 0..count {
                let index = reader.get_bits(pal_bits);
                let modifier = match &mod_model {
                    Some(model) => read_symbol(&mut reader, model)?,
                    None => 0,
                };
                entries.push(lookup(index, modifier)?);
            }
        } else if reader.get_bit() {
            let pal_bits = reader.get_bits(4);
            let mod_bits = reader.get_bits(4);
            let uses_global_model = read_huffman_table(&mut reader)?;
            let delta_model = read_huffman_table(&mut reader)?;
            trace!(count, pal_bits, mod_bits, "Decoding hybrid selector palette");

            let mut prev = [0u8; 4];
            for _ in 0..count {
                let selector = if read_symbol(&mut reader, &uses_global_model)? == 1 {
                    let index = reader.get_bits(pal_bits);
                    let modifier = reader.get_bits(mod_bits);
                    lookup(index, modifier)?
                } else {
                    let mut rows = [0u8; 4];
                    for (row, p) in rows.iter_mut().zip(prev) {
                        *row = read_byte(&mut reader, &delta_model)? ^ p;
                    }
                    Selector::from_rows(rows)
                };
                prev = selector.rows;
                entries.push(selector);
            }
        } else if reader.get_bit() {
            trace!(count, "Decoding raw selector palette");
            for _ in 0..count {
                let mut rows = [0u8; 4];
                for row in rows.iter_mut() {
                    *row = reader.get_bits(8) as u8;
                }
                entries.push(Selector::from_rows(rows));
            }
        } else {
            let delta_model = read_huffman_table(&mut reader)?;
            trace!(count, "Decoding delta coded selector palette");

            let mut prev = [0u8; 4];
            for i in 0..count {
                let mut rows = [0u8; 4];
                for (row, p) in rows.iter_mut().zip(prev) {
                    *row = match i {
                        0 => reader.get_bits(8) as u8,
                        _ => read_byte(&mut reader, &delta_model)? ^ p,
                    };
                }
                prev = rows;
                entries.push(Selector::from_rows(rows));
            }
        }

        Ok(Self { entries })
    }

    /// Entry at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Selector> {
        self.entries.get(index as usize)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_byte(
    reader: &mut BitReader,
    model: &basis_transcoder_common::HuffmanDecodingTable,
) -> Result<u8, Etc1sError> {
    let symbol = read_symbol(reader, model)?;
    if symbol > 255 {
        return Err(Etc1sError::IndexOutOfRange {
            index: symbol,
            limit: 256,
        });
    }
    Ok(symbol as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{encode_selector_palette_delta, encode_selector_palette_raw};
    use basis_transcoder_common::test_utils::{BitWriter, HuffmanEncoder};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 3)]
    #[case(3, 0, 1)]
    #[case(2, 3, 2)]
    fn selector_get_set(#[case] x: usize, #[case] y: usize, #[case] value: u8) {
        let mut s = Selector::from_packed(0xFFFF_FFFF);
        s.set(x, y, value);
        assert_eq!(s.get(x, y), value);
        assert_eq!(s.packed().count_ones(), 30 + value.count_ones());
    }

    #[test]
    fn packed_layout_matches_rows() {
        let s = Selector::from_packed(0b11 << (2 * (2 * 4 + 1)));
        assert_eq!(s.get(1, 2), 3);
        assert_eq!(s.rows, [0, 0, 0b1100, 0]);
    }

    fn sample() -> Vec<Selector> {
        vec![
            Selector::from_rows([0x00, 0x55, 0xAA, 0xFF]),
            Selector::from_rows([0x1B, 0x1B, 0xE4, 0xE4]),
            Selector::from_rows([0x00, 0x00, 0x00, 0x01]),
        ]
    }

    #[test]
    fn decodes_raw_palette() {
        let entries = sample();
        let bytes = encode_selector_palette_raw(&entries);
        let palette = SelectorPalette::decode(&bytes, 3, &GlobalSelectorCodebook::new()).unwrap();
        assert_eq!(palette.entries, entries);
    }

    #[test]
    fn decodes_delta_palette() {
        let entries = sample();
        let bytes = encode_selector_palette_delta(&entries);
        let palette = SelectorPalette::decode(&bytes, 3, &GlobalSelectorCodebook::new()).unwrap();
        assert_eq!(palette.entries, entries);
    }

    #[test]
    fn decodes_global_palette() {
        let codebook = GlobalSelectorCodebook::new();
        let mut w = BitWriter::new();
        w.put_bit(true);
        w.put_bits(12, 4); // pal_bits
        w.put_bits(0, 4); // mod_bits
        w.put_bits(17, 12);
        w.put_bits(3000, 12);
        let palette = SelectorPalette::decode(&w.finish(), 2, &codebook).unwrap();
        assert_eq!(palette.get(0), codebook.get(17, 0).as_ref());
        assert_eq!(palette.get(1), codebook.get(3000, 0).as_ref());
    }

    #[test]
    fn global_palette_applies_modifiers() {
        let codebook = GlobalSelectorCodebook::new();
        let mod_model = HuffmanEncoder::flat(128);
        let mut w = BitWriter::new();
        w.put_bit(true);
        w.put_bits(12, 4);
        w.put_bits(7, 4);
        mod_model.write_table(&mut w);
        w.put_bits(5, 12);
        mod_model.encode(&mut w, 9);
        let palette = SelectorPalette::decode(&w.finish(), 1, &codebook).unwrap();
        assert_eq!(palette.get(0), codebook.get(5, 9).as_ref());
    }

    #[test]
    fn global_palette_rejects_missing_entry() {
        let codebook = GlobalSelectorCodebook::from_entries(vec![0; 4]).unwrap();
        let mut w = BitWriter::new();
        w.put_bit(true);
        w.put_bits(3, 4);
        w.put_bits(0, 4);
        w.put_bits(6, 3);
        let result = SelectorPalette::decode(&w.finish(), 1, &codebook);
        assert_eq!(
            result,
            Err(Etc1sError::CodebookIndex {
                index: 6,
                modifier: 0
            })
        );
    }

    #[test]
    fn decodes_hybrid_palette() {
        let codebook = GlobalSelectorCodebook::new();
        let flags = HuffmanEncoder::flat(2);
        let delta = HuffmanEncoder::flat(256);
        let inline = Selector::from_rows([0x12, 0x34, 0x56, 0x78]);

        let mut w = BitWriter::new();
        w.put_bit(false);
        w.put_bit(true);
        w.put_bits(12, 4);
        w.put_bits(7, 4);
        flags.write_table(&mut w);
        delta.write_table(&mut w);
        // Entry 0: codebook reference.
        flags.encode(&mut w, 1);
        w.put_bits(100, 12);
        w.put_bits(3, 7);
        // Entry 1: inline rows, XOR against entry 0.
        let reference = codebook.get(100, 3).unwrap();
        flags.encode(&mut w, 0);
        for (row, prev) in inline.rows.iter().zip(reference.rows) {
            delta.encode(&mut w, (row ^ prev) as u32);
        }

        let palette = SelectorPalette::decode(&w.finish(), 2, &codebook).unwrap();
        assert_eq!(palette.get(0), Some(&reference));
        assert_eq!(palette.get(1), Some(&inline));
    }
}
