//! Encoders for building ETC1S palettes, tables and slices in tests.
//!
//! Everything here writes the simplest valid encoding: flat Huffman models,
//! raw selector palettes and slices where every block codes its own endpoint
//! delta and a direct selector index.
#![allow(missing_docs)]

use crate::{
    decoder::Etc1sSections,
    endpoint::Endpoint,
    selector::Selector,
    slice::{SliceGrid, ENDPOINT_PRED_TOTAL_SYMBOLS, SELECTOR_HISTORY_BUF_RLE_COUNT_TOTAL},
};
use alloc::vec::Vec;
use basis_transcoder_common::test_utils::{BitWriter, HuffmanEncoder};

/// Prediction symbol with predictor 3 (delta) for all four blocks of a group.
pub const ALL_DELTA_PRED_SYMBOL: u32 = 0xFF;

/// Serializes an endpoint palette with flat delta models.
pub fn encode_endpoint_palette(entries: &[Endpoint]) -> Vec<u8> {
    let color = HuffmanEncoder::flat(32);
    let inten = HuffmanEncoder::flat(8);

    let mut w = BitWriter::new();
    for _ in 0..3 {
        color.write_table(&mut w);
    }
    inten.write_table(&mut w);
    w.put_bit(false);

    let mut prev_color = [16u8; 3];
    let mut prev_inten = 0u8;
    for e in entries {
        inten.encode(&mut w, (e.inten.wrapping_sub(prev_inten) & 7) as u32);
        prev_inten = e.inten;
        for c in 0..3 {
            color.encode(&mut w, (e.color5[c].wrapping_sub(prev_color[c]) & 31) as u32);
            prev_color[c] = e.color5[c];
        }
    }
    w.finish()
}

/// Serializes a selector palette in raw mode.
pub fn encode_selector_palette_raw(entries: &[Selector]) -> Vec<u8> {
    let mut w = BitWriter::new();
    w.put_bit(false); // global
    w.put_bit(false); // hybrid
    w.put_bit(true); // raw
    for s in entries {
        for &row in &s.rows {
            w.put_bits(row as u32, 8);
        }
    }
    w.finish()
}

/// Serializes a selector palette in delta mode.
pub fn encode_selector_palette_delta(entries: &[Selector]) -> Vec<u8> {
    let delta = HuffmanEncoder::flat(256);
    let mut w = BitWriter::new();
    w.put_bit(false);
    w.put_bit(false);
    w.put_bit(false);
    delta.write_table(&mut w);

    let mut prev = [0u8; 4];
    for (i, s) in entries.iter().enumerate() {
        for (j, &row) in s.rows.iter().enumerate() {
            if i == 0 {
                w.put_bits(row as u32, 8);
            } else {
                delta.encode(&mut w, (row ^ prev[j]) as u32);
            }
        }
        prev = s.rows;
    }
    w.finish()
}

/// Palettes and models for hand-built ETC1S slices.
#[derive(Debug, Clone)]
pub struct Etc1sFixture {
    pub num_endpoints: u32,
    pub num_selectors: u32,
    pub hist_size: u32,
    pub pred_model: HuffmanEncoder,
    pub delta_endpoint_model: HuffmanEncoder,
    pub selector_model: HuffmanEncoder,
    pub rle_model: HuffmanEncoder,
}

impl Etc1sFixture {
    pub fn new(num_endpoints: u32, num_selectors: u32, hist_size: u32) -> Self {
        Self {
            num_endpoints,
            num_selectors,
            hist_size,
            pred_model: HuffmanEncoder::flat(ENDPOINT_PRED_TOTAL_SYMBOLS),
            delta_endpoint_model: HuffmanEncoder::flat(num_endpoints),
            selector_model: HuffmanEncoder::flat(num_selectors + hist_size + 1),
            rle_model: HuffmanEncoder::flat(SELECTOR_HISTORY_BUF_RLE_COUNT_TOTAL),
        }
    }

    /// Distinct endpoints, spread over the colour range.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        (0..self.num_endpoints)
            .map(|i| {
                let color5 = [
                    ((i * 7 + 3) % 32) as u8,
                    ((i * 13 + 20) % 32) as u8,
                    ((i * 5 + 9) % 32) as u8,
                ];
                Endpoint::new(color5, (i % 8) as u8)
            })
            .collect()
    }

    /// Distinct selectors.
    pub fn selectors(&self) -> Vec<Selector> {
        (0..self.num_selectors)
            .map(|i| {
                Selector::from_rows([
                    (i * 37 + 1) as u8,
                    (i * 91 + 2) as u8,
                    (i * 53 + 3) as u8,
                    (i * 11 + 4) as u8,
                ])
            })
            .collect()
    }

    pub fn endpoint_palette(&self) -> Vec<u8> {
        encode_endpoint_palette(&self.endpoints())
    }

    pub fn selector_palette(&self) -> Vec<u8> {
        encode_selector_palette_raw(&self.selectors())
    }

    pub fn tables(&self) -> Vec<u8> {
        let mut w = BitWriter::new();
        self.pred_model.write_table(&mut w);
        self.delta_endpoint_model.write_table(&mut w);
        self.selector_model.write_table(&mut w);
        self.rle_model.write_table(&mut w);
        w.put_bits(self.hist_size, 13);
        w.finish()
    }

    pub fn sections<'a>(
        &self,
        endpoint_data: &'a [u8],
        selector_data: &'a [u8],
        table_data: &'a [u8],
    ) -> Etc1sSections<'a> {
        Etc1sSections {
            endpoint_data,
            num_endpoints: self.num_endpoints,
            selector_data,
            num_selectors: self.num_selectors,
            table_data,
        }
    }

    /// Encodes a slice where block `i` (row-major) uses `indices[i] = (endpoint, selector)`.
    pub fn explicit_slice(&self, grid: SliceGrid, indices: &[(u32, u32)]) -> Vec<u8> {
        let mut w = BitWriter::new();
        let mut prev_endpoint = 0u32;
        for y in 0..grid.num_blocks_y {
            for x in 0..grid.num_blocks_x {
                if x % 2 == 0 && y % 2 == 0 {
                    self.pred_model.encode(&mut w, ALL_DELTA_PRED_SYMBOL);
                }
                let (endpoint, selector) = indices[(y * grid.num_blocks_x + x) as usize];
                let delta = (endpoint + self.num_endpoints - prev_endpoint) % self.num_endpoints;
                self.delta_endpoint_model.encode(&mut w, delta);
                self.selector_model.encode(&mut w, selector);
                prev_endpoint = endpoint;
            }
        }
        w.finish()
    }
}
