//! Huffman models shared by every ETC1S slice of a file.

use crate::error::Etc1sError;
use basis_transcoder_common::{read_huffman_table, BitReader, HuffmanDecodingTable};
use tracing::trace;

/// Bits used to store the selector history buffer size.
const SELECTOR_HISTORY_BUF_SIZE_BITS: u32 = 13;

/// The tables section of an ETC1S file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etc1sTables {
    /// Endpoint prediction symbols, four 2-bit predictors per symbol plus a repeat symbol.
    pub endpoint_pred_model: HuffmanDecodingTable,
    /// Endpoint index deltas.
    pub delta_endpoint_model: HuffmanDecodingTable,
    /// Selector indices, history buffer references and the run symbol.
    pub selector_model: HuffmanDecodingTable,
    /// Selector run lengths.
    pub selector_history_buf_rle_model: HuffmanDecodingTable,
    /// Number of entries in the selector history buffer, may be zero.
    pub selector_history_buf_size: u32,
}

impl Etc1sTables {
    /// Decodes the tables section.
    pub fn decode(bytes: &[u8]) -> Result<Self, Etc1sError> {
        let mut reader = BitReader::new(bytes);
        let endpoint_pred_model = read_huffman_table(&mut reader)?;
        let delta_endpoint_model = read_huffman_table(&mut reader)?;
        let selector_model = read_huffman_table(&mut reader)?;
        let selector_history_buf_rle_model = read_huffman_table(&mut reader)?;
        let selector_history_buf_size = reader.get_bits(SELECTOR_HISTORY_BUF_SIZE_BITS);
        trace!(selector_history_buf_size, "Decoded ETC1S tables");

        Ok(Self {
            endpoint_pred_model,
            delta_endpoint_model,
            selector_model,
            selector_history_buf_rle_model,
            selector_history_buf_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Etc1sFixture;

    #[test]
    fn reads_models_and_history_size() {
        let fixture = Etc1sFixture::new(5, 7, 3);
        let tables = Etc1sTables::decode(&fixture.tables()).unwrap();
        assert_eq!(tables.selector_history_buf_size, 3);
        assert_eq!(tables.delta_endpoint_model.num_syms(), 5);
        assert_eq!(tables.selector_model.num_syms(), 7 + 3 + 1);
    }

    #[test]
    fn rejects_truncated_tables() {
        let fixture = Etc1sFixture::new(5, 7, 3);
        let bytes = fixture.tables();
        assert!(Etc1sTables::decode(&bytes[..4]).is_err());
    }
}
