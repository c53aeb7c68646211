#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod block;
pub mod codebook;
pub mod decoder;
pub mod endpoint;
pub mod error;
pub mod selector;
pub mod slice;
pub mod tables;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use block::Etc1sBlock;
pub use codebook::{GlobalSelectorCodebook, GLOBAL_SELECTOR_CODEBOOK_SIZE};
pub use decoder::{Etc1sDecoder, Etc1sSections};
pub use endpoint::{Endpoint, EndpointPalette};
pub use error::Etc1sError;
pub use selector::{Selector, SelectorPalette};
pub use slice::{decode_slice, SliceGrid};
pub use tables::Etc1sTables;

use basis_transcoder_common::{BitReader, HuffmanDecodingTable};
use likely_stable::unlikely;

/// Decodes one Huffman symbol, rejecting symbols outside the table's alphabet.
#[inline]
pub(crate) fn read_symbol(
    reader: &mut BitReader,
    table: &HuffmanDecodingTable,
) -> Result<u32, Etc1sError> {
    let symbol = reader.decode_huffman(table);
    if unlikely(symbol >= table.num_syms()) {
        return Err(Etc1sError::IndexOutOfRange {
            index: symbol,
            limit: table.num_syms(),
        });
    }
    Ok(symbol)
}
