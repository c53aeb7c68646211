#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bits;
pub mod color_565;
pub mod color_8888;
pub mod crc16;
pub mod decoded_4x4_block;
pub mod etc1;
pub mod error;
pub mod huffman;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use bits::BitReader;
pub use error::BitstreamError;
pub use huffman::{read_huffman_table, HuffmanDecodingTable};
