//! Canonical Huffman tables as serialized in `.basis` files.
//!
//! A table is transmitted as a list of per-symbol code sizes, which are
//! themselves entropy coded with a small 21-symbol "code length" alphabet
//! (literal sizes 0..=16 plus four run-length codes). Codes are assigned
//! canonically, shortest first and in symbol order within each length, then
//! bit-reversed so they can be matched against an LSB-first bitstream.

use crate::{bits::BitReader, error::BitstreamError};
use alloc::vec;
use alloc::vec::Vec;

/// Maximum number of symbols a serialized table may declare.
pub const MAX_SYMS: u32 = 16383;
const MAX_SYMS_LOG2: u32 = 14;

const TOTAL_CODELENGTH_CODES: usize = 21;
const SMALL_ZERO_RUN_CODE: u32 = 17;
const LARGE_ZERO_RUN_CODE: u32 = 18;
const SMALL_REPEAT_CODE: u32 = 19;
const LARGE_REPEAT_CODE: u32 = 20;

const SMALL_ZERO_RUN_EXTRA_BITS: u32 = 3;
const MIN_SMALL_ZERO_RUN: u32 = 3;
const LARGE_ZERO_RUN_EXTRA_BITS: u32 = 7;
const MIN_LARGE_ZERO_RUN: u32 = 11;
const SMALL_REPEAT_EXTRA_BITS: u32 = 2;
const MIN_SMALL_REPEAT: u32 = 3;
const LARGE_REPEAT_EXTRA_BITS: u32 = 7;
const MIN_LARGE_REPEAT: u32 = 7;

/// Transmission order of the code length alphabet's own code sizes.
pub const SORTED_CODELENGTH_CODES: [u8; TOTAL_CODELENGTH_CODES] = [
    17, 18, 19, 20, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15, 16,
];

const INVALID_SYMBOL: u32 = u32::MAX;

/// Lookup table decoding one symbol from up to [`HuffmanDecodingTable::MAX_CODE_SIZE`] peeked bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanDecodingTable {
    /// Indexed by the next `max_len` stream bits. Each entry packs `symbol << 5 | len`.
    entries: Vec<u32>,
    max_len: u32,
    num_syms: u32,
}

impl HuffmanDecodingTable {
    /// Longest code a table may contain.
    pub const MAX_CODE_SIZE: u32 = 16;

    /// Builds a table from per-symbol code sizes (0 = unused symbol).
    ///
    /// Over-subscribed code sets are rejected. Incomplete ones are accepted;
    /// unassigned bit patterns decode to a symbol larger than any valid one.
    pub fn from_code_sizes(code_sizes: &[u8]) -> Result<Self, BitstreamError> {
        let mut counts = [0u32; Self::MAX_CODE_SIZE as usize + 1];
        for &size in code_sizes {
            if size as u32 > Self::MAX_CODE_SIZE {
                return Err(BitstreamError::InvalidCodeLengths);
            }
            counts[size as usize] += 1;
        }
        counts[0] = 0;

        let max_len = (1..=Self::MAX_CODE_SIZE)
            .rev()
            .find(|&len| counts[len as usize] != 0)
            .unwrap_or(1);

        // Kraft inequality, scaled to MAX_CODE_SIZE bits.
        let kraft: u64 = (1..=Self::MAX_CODE_SIZE)
            .map(|len| (counts[len as usize] as u64) << (Self::MAX_CODE_SIZE - len))
            .sum();
        if kraft > 1u64 << Self::MAX_CODE_SIZE {
            return Err(BitstreamError::InvalidCodeLengths);
        }

        let mut next_code = [0u32; Self::MAX_CODE_SIZE as usize + 2];
        let mut code = 0u32;
        for len in 1..=Self::MAX_CODE_SIZE as usize {
            code = (code + counts[len - 1]) << 1;
            next_code[len] = code;
        }

        let table_size = 1usize << max_len;
        let mut entries = vec![(INVALID_SYMBOL << 5) | max_len; table_size];

        for (symbol, &size) in code_sizes.iter().enumerate() {
            if size == 0 {
                continue;
            }
            let len = size as u32;
            let canonical = next_code[len as usize];
            next_code[len as usize] += 1;

            let reversed = reverse_bits(canonical, len);
            let entry = ((symbol as u32) << 5) | len;
            let mut index = reversed as usize;
            while index < table_size {
                entries[index] = entry;
                index += 1 << len;
            }
        }

        Ok(Self {
            entries,
            max_len,
            num_syms: code_sizes.len() as u32,
        })
    }

    /// Resolves peeked stream bits into `(symbol, code length)`.
    #[inline]
    pub fn lookup(&self, bits: u32) -> (u32, u32) {
        let entry = self.entries[(bits & ((1 << self.max_len) - 1)) as usize];
        let symbol = entry >> 5;
        let symbol = if symbol == INVALID_SYMBOL >> 5 {
            INVALID_SYMBOL
        } else {
            symbol
        };
        (symbol, entry & 31)
    }

    /// Number of symbols in the alphabet, including ones without a code.
    pub fn num_syms(&self) -> u32 {
        self.num_syms
    }
}

#[inline]
fn reverse_bits(code: u32, len: u32) -> u32 {
    code.reverse_bits() >> (32 - len)
}

/// Reads a serialized Huffman table from `reader`.
pub fn read_huffman_table(reader: &mut BitReader) -> Result<HuffmanDecodingTable, BitstreamError> {
    let total_used_syms = reader.get_bits(MAX_SYMS_LOG2);
    if total_used_syms == 0 {
        return Err(BitstreamError::InvalidHuffmanTable("table declares no symbols"));
    }
    if total_used_syms > MAX_SYMS {
        return Err(BitstreamError::InvalidHuffmanTable("too many symbols"));
    }

    let num_codelength_codes = reader.get_bits(5) as usize;
    if !(1..=TOTAL_CODELENGTH_CODES).contains(&num_codelength_codes) {
        return Err(BitstreamError::InvalidHuffmanTable(
            "code length code count out of range",
        ));
    }

    let mut codelength_sizes = [0u8; TOTAL_CODELENGTH_CODES];
    for &code in SORTED_CODELENGTH_CODES.iter().take(num_codelength_codes) {
        codelength_sizes[code as usize] = reader.get_bits(3) as u8;
    }
    let codelength_table = HuffmanDecodingTable::from_code_sizes(&codelength_sizes)?;

    let total = total_used_syms as usize;
    let mut code_sizes = vec![0u8; total];
    let mut cur = 0usize;
    while cur < total {
        let code = reader.decode_huffman(&codelength_table);
        match code {
            0..=16 => {
                code_sizes[cur] = code as u8;
                cur += 1;
            }
            SMALL_ZERO_RUN_CODE | LARGE_ZERO_RUN_CODE => {
                let run = if code == SMALL_ZERO_RUN_CODE {
                    reader.get_bits(SMALL_ZERO_RUN_EXTRA_BITS) + MIN_SMALL_ZERO_RUN
                } else {
                    reader.get_bits(LARGE_ZERO_RUN_EXTRA_BITS) + MIN_LARGE_ZERO_RUN
                } as usize;
                if cur + run > total {
                    return Err(BitstreamError::InvalidHuffmanTable("zero run overflows table"));
                }
                cur += run;
            }
            SMALL_REPEAT_CODE | LARGE_REPEAT_CODE => {
                let run = if code == SMALL_REPEAT_CODE {
                    reader.get_bits(SMALL_REPEAT_EXTRA_BITS) + MIN_SMALL_REPEAT
                } else {
                    reader.get_bits(LARGE_REPEAT_EXTRA_BITS) + MIN_LARGE_REPEAT
                } as usize;
                if cur == 0 || code_sizes[cur - 1] == 0 {
                    return Err(BitstreamError::InvalidHuffmanTable(
                        "repeat without a previous code size",
                    ));
                }
                if cur + run > total {
                    return Err(BitstreamError::InvalidHuffmanTable("repeat overflows table"));
                }
                let prev = code_sizes[cur - 1];
                code_sizes[cur..cur + run].fill(prev);
                cur += run;
            }
            _ => {
                return Err(BitstreamError::InvalidHuffmanTable("invalid code length symbol"));
            }
        }
    }

    HuffmanDecodingTable::from_code_sizes(&code_sizes)
}
