//! LSB-first bit reader over `.basis` payload sections.
//!
//! The first bit of the stream is the least significant bit of the first byte.
//! Multi-bit reads place the first bit read at bit 0 of the result. Reads past
//! the end of the input yield zero bits; callers bound their loops by counts
//! taken from validated headers, never by the amount of remaining input.

use crate::huffman::HuffmanDecodingTable;

/// Reads bits least-significant-first from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_buf: u64,
    bit_count: u32,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_buf: 0,
            bit_count: 0,
        }
    }

    #[inline]
    fn refill(&mut self) {
        while self.bit_count <= 56 {
            let byte = match self.data.get(self.byte_pos) {
                Some(&b) => b,
                None => 0,
            };
            self.byte_pos += 1;
            self.bit_buf |= (byte as u64) << self.bit_count;
            self.bit_count += 8;
        }
    }

    /// Returns the next `n` bits without consuming them. `n` must be at most 32.
    #[inline]
    pub fn peek_bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= 32);
        if self.bit_count < n {
            self.refill();
        }
        if n == 0 {
            return 0;
        }
        (self.bit_buf & ((1u64 << n) - 1)) as u32
    }

    /// Discards `n` bits that were previously peeked.
    #[inline]
    pub fn skip_bits(&mut self, n: u32) {
        debug_assert!(n <= self.bit_count);
        self.bit_buf >>= n;
        self.bit_count -= n;
    }

    /// Reads `n` bits, `n <= 32`.
    #[inline]
    pub fn get_bits(&mut self, n: u32) -> u32 {
        let value = self.peek_bits(n);
        self.skip_bits(n);
        value
    }

    /// Reads a single bit.
    #[inline]
    pub fn get_bit(&mut self) -> bool {
        self.get_bits(1) != 0
    }

    /// Decodes a chunked variable-length integer.
    ///
    /// Each chunk holds `chunk_bits` payload bits followed by a continuation bit.
    /// Decoding stops once the continuation bit is clear or 32 payload bits
    /// have been collected.
    pub fn decode_vlc(&mut self, chunk_bits: u32) -> u32 {
        debug_assert!(chunk_bits > 0 && chunk_bits < 32);
        let chunk_size = 1u32 << chunk_bits;
        let chunk_mask = chunk_size - 1;

        let mut value = 0u32;
        let mut ofs = 0u32;
        loop {
            let s = self.get_bits(chunk_bits + 1);
            value |= (s & chunk_mask).wrapping_shl(ofs);
            ofs += chunk_bits;

            if s & chunk_size == 0 || ofs >= 32 {
                break;
            }
        }
        value
    }

    /// Decodes one symbol with the supplied Huffman table.
    #[inline]
    pub fn decode_huffman(&mut self, table: &HuffmanDecodingTable) -> u32 {
        let bits = self.peek_bits(HuffmanDecodingTable::MAX_CODE_SIZE);
        let (symbol, len) = table.lookup(bits);
        self.skip_bits(len);
        symbol
    }

    /// Number of whole bytes consumed so far, including partially read ones.
    pub fn bytes_consumed(&self) -> usize {
        self.byte_pos - (self.bit_count / 8) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn reads_lsb_first() {
        let data = [0b1010_1100u8, 0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.get_bits(2), 0b00);
        assert_eq!(reader.get_bits(3), 0b011);
        assert_eq!(reader.get_bits(3), 0b101);
        assert_eq!(reader.get_bits(8), 0xFF);
    }

    #[test]
    fn spans_byte_boundaries() {
        let data = [0x34, 0x12, 0x78, 0x56];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.get_bits(32), 0x5678_1234);
    }

    #[test]
    fn reading_past_end_yields_zero() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.get_bits(8), 0xFF);
        assert_eq!(reader.get_bits(16), 0);
        assert!(!reader.get_bit());
    }

    #[rstest]
    #[case::single_chunk(&[0b0_0101], 4, 5)]
    // 0xF with continuation, then 0x7 without
    #[case::two_chunks(&[0b1111_1111, 0b0000_0000], 4, 0x7F)]
    fn decodes_vlc(#[case] data: &[u8], #[case] chunk_bits: u32, #[case] expected: u32) {
        let mut reader = BitReader::new(data);
        assert_eq!(reader.decode_vlc(chunk_bits), expected);
    }

    #[test]
    fn tracks_consumed_bytes() {
        let data = [0u8; 8];
        let mut reader = BitReader::new(&data);
        reader.get_bits(9);
        assert_eq!(reader.bytes_consumed(), 2);
    }
}
