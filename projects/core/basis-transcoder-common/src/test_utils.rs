//! Bitstream writers used to build `.basis` fixtures in tests.
//!
//! These mirror the decoding side exactly: an LSB-first [`BitWriter`] and a
//! [`HuffmanEncoder`] that serializes tables in the format read by
//! [`read_huffman_table`](crate::huffman::read_huffman_table).
#![allow(missing_docs)]

use crate::huffman::{HuffmanDecodingTable, SORTED_CODELENGTH_CODES};
use alloc::vec;
use alloc::vec::Vec;

/// Appends bits least-significant-first.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_pos: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_bits(&mut self, value: u32, n: u32) {
        for i in 0..n {
            if self.bit_pos % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 != 0 {
                let last = self.bytes.len() - 1;
                self.bytes[last] |= 1 << (self.bit_pos % 8);
            }
            self.bit_pos += 1;
        }
    }

    pub fn put_bit(&mut self, bit: bool) {
        self.put_bits(bit as u32, 1);
    }

    /// Writes `value` as a chunked variable-length integer.
    pub fn put_vlc(&mut self, mut value: u32, chunk_bits: u32) {
        let mask = (1u32 << chunk_bits) - 1;
        loop {
            let chunk = value & mask;
            value >>= chunk_bits;
            let more = value != 0;
            self.put_bits(chunk | ((more as u32) << chunk_bits), chunk_bits + 1);
            if !more {
                break;
            }
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_pos
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

const CODELENGTH_CODE_SIZE: u32 = 5;

/// Canonical Huffman encoder matching [`HuffmanDecodingTable`]'s code assignment.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    code_sizes: Vec<u8>,
    codes: Vec<u32>,
}

impl HuffmanEncoder {
    /// Builds an encoder from per-symbol code sizes.
    pub fn from_code_sizes(code_sizes: &[u8]) -> Self {
        let max = HuffmanDecodingTable::MAX_CODE_SIZE as usize;
        let mut counts = vec![0u32; max + 1];
        for &s in code_sizes {
            counts[s as usize] += 1;
        }
        counts[0] = 0;
        let mut next_code = vec![0u32; max + 2];
        let mut code = 0u32;
        for len in 1..=max {
            code = (code + counts[len - 1]) << 1;
            next_code[len] = code;
        }
        let codes = code_sizes
            .iter()
            .map(|&s| {
                if s == 0 {
                    return 0;
                }
                let c = next_code[s as usize];
                next_code[s as usize] += 1;
                c
            })
            .collect();
        Self {
            code_sizes: code_sizes.to_vec(),
            codes,
        }
    }

    /// Every symbol gets the same code length.
    pub fn flat(num_syms: u32) -> Self {
        let mut len = 1u8;
        while (1u32 << len) < num_syms {
            len += 1;
        }
        Self::from_code_sizes(&vec![len; num_syms as usize])
    }

    pub fn num_syms(&self) -> u32 {
        self.code_sizes.len() as u32
    }

    pub fn encode(&self, writer: &mut BitWriter, symbol: u32) {
        let len = self.code_sizes[symbol as usize] as u32;
        assert!(len != 0, "symbol {symbol} has no code");
        let code = self.codes[symbol as usize];
        writer.put_bits(code.reverse_bits() >> (32 - len), len);
    }

    /// Serializes this table using one literal code length per symbol.
    pub fn write_table(&self, writer: &mut BitWriter) {
        let entries: Vec<(u32, u32)> = self.code_sizes.iter().map(|&s| (s as u32, 0)).collect();
        Self::write_raw_code_sizes(writer, self.num_syms(), &entries);
    }

    /// Writes a table header followed by raw code length alphabet symbols.
    ///
    /// Each entry is `(code_length_symbol, extra_bits)`; the extra bits are
    /// emitted for the run-length symbols 17..=20.
    pub fn write_raw_code_sizes(writer: &mut BitWriter, total_syms: u32, entries: &[(u32, u32)]) {
        writer.put_bits(total_syms, 14);
        writer.put_bits(SORTED_CODELENGTH_CODES.len() as u32, 5);
        for _ in SORTED_CODELENGTH_CODES {
            writer.put_bits(CODELENGTH_CODE_SIZE, 3);
        }

        // All 21 code length symbols share one length, so symbol i has code i.
        for &(symbol, extra) in entries {
            writer.put_bits(
                symbol.reverse_bits() >> (32 - CODELENGTH_CODE_SIZE),
                CODELENGTH_CODE_SIZE,
            );
            match symbol {
                17 => writer.put_bits(extra, 3),
                18 => writer.put_bits(extra, 7),
                19 => writer.put_bits(extra, 2),
                20 => writer.put_bits(extra, 7),
                _ => {}
            }
        }
    }
}
