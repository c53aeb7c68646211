//! # Endpoint Palette
//!
//! Each [`Endpoint`] is an RGB555 base colour plus an ETC1 intensity table
//! index. The palette section starts with four Huffman models (three colour
//! delta models and one intensity delta model) and a grayscale flag, then
//! stores each entry as deltas against the previous one.
//!
//! The colour delta model for a channel is picked by the previous value of
//! that channel, so that dark, mid and bright channels get their own statistics.

use crate::{error::Etc1sError, read_symbol};
use alloc::vec::Vec;
use basis_transcoder_common::{read_huffman_table, BitReader};
use tracing::trace;

/// Upper bound (inclusive) of previous channel values using colour delta model 0.
pub const COLOR5_PAL0_PREV_HI: u8 = 9;
/// Upper bound (inclusive) of previous channel values using colour delta model 1.
pub const COLOR5_PAL1_PREV_HI: u8 = 21;

/// One palette entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// RGB555 base colour, one 5-bit value per channel.
    pub color5: [u8; 3],
    /// ETC1 intensity table index, `0..8`.
    pub inten: u8,
}

impl Endpoint {
    /// Creates an endpoint.
    pub const fn new(color5: [u8; 3], inten: u8) -> Self {
        Self { color5, inten }
    }
}

/// Decoded endpoint palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointPalette {
    entries: Vec<Endpoint>,
}

impl EndpointPalette {
    /// Decodes `count` endpoints from the endpoint palette section.
    pub fn decode(bytes: &[u8], count: u32) -> Result<Self, Etc1sError> {
        let mut reader = BitReader::new(bytes);
        let color_models = [
            read_huffman_table(&mut reader)?,
            read_huffman_table(&mut reader)?,
            read_huffman_table(&mut reader)?,
        ];
        let inten_model = read_huffman_table(&mut reader)?;
        let grayscale = reader.get_bit();
        trace!(count, grayscale, "Decoding endpoint palette");

        let mut prev_color = [16u8; 3];
        let mut prev_inten = 0u8;
        let channels = if grayscale { 1 } else { 3 };

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let delta = read_symbol(&mut reader, &inten_model)?;
            prev_inten = ((delta + prev_inten as u32) & 7) as u8;

            for c in 0..channels {
                let prev = prev_color[c];
                let model = match prev {
                    0..=COLOR5_PAL0_PREV_HI => &color_models[0],
                    0..=COLOR5_PAL1_PREV_HI => &color_models[1],
                    _ => &color_models[2],
                };
                let delta = read_symbol(&mut reader, model)?;
                prev_color[c] = ((prev as u32 + delta) & 31) as u8;
            }
            if grayscale {
                prev_color = [prev_color[0]; 3];
            }

            entries.push(Endpoint::new(prev_color, prev_inten));
        }

        Ok(Self { entries })
    }

    /// Entry at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&Endpoint> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::encode_endpoint_palette;
    use basis_transcoder_common::test_utils::{BitWriter, HuffmanEncoder};

    #[test]
    fn decodes_delta_coded_entries() {
        let entries = vec![
            Endpoint::new([16, 16, 16], 0),
            Endpoint::new([0, 31, 5], 7),
            Endpoint::new([12, 30, 22], 3),
            Endpoint::new([31, 0, 9], 4),
        ];
        let bytes = encode_endpoint_palette(&entries);
        let palette = EndpointPalette::decode(&bytes, entries.len() as u32).unwrap();
        assert_eq!(palette.entries, entries);
    }

    #[test]
    fn grayscale_replicates_first_channel() {
        let color = HuffmanEncoder::flat(32);
        let inten = HuffmanEncoder::flat(8);
        let mut w = BitWriter::new();
        for _ in 0..3 {
            color.write_table(&mut w);
        }
        inten.write_table(&mut w);
        w.put_bit(true);
        inten.encode(&mut w, 2);
        color.encode(&mut w, 4); // 16 + 4

        let palette = EndpointPalette::decode(&w.finish(), 1).unwrap();
        assert_eq!(palette.get(0), Some(&Endpoint::new([20, 20, 20], 2)));
    }

    #[test]
    fn truncated_section_fails() {
        assert!(EndpointPalette::decode(&[], 1).is_err());
    }
}
