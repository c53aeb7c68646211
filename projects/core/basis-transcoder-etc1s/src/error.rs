use basis_transcoder_common::BitstreamError;
use thiserror::Error;

/// Errors raised while decoding ETC1S palettes, tables or slices.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Etc1sError {
    /// A Huffman table or other bit-level structure is malformed.
    #[error(transparent)]
    Bitstream(#[from] BitstreamError),

    /// The endpoint or selector palette section is malformed.
    #[error("Invalid ETC1S palette: {0}")]
    InvalidPalette(&'static str),

    /// The tables section is malformed.
    #[error("Invalid ETC1S tables: {0}")]
    InvalidTables(&'static str),

    /// A block predicted from a neighbour that does not exist.
    #[error("Invalid endpoint prediction at block ({x}, {y}).")]
    InvalidPrediction {
        /// Block column.
        x: u32,
        /// Block row.
        y: u32,
    },

    /// A decoded endpoint, selector or history index is outside its palette.
    #[error("Decoded index {index} is out of range (limit {limit}).")]
    IndexOutOfRange {
        /// Decoded index.
        index: u32,
        /// Exclusive upper bound.
        limit: u32,
    },

    /// A selector run extends past the end of the slice.
    #[error("Selector run of {run} blocks exceeds the {total} blocks of the slice.")]
    RunTooLong {
        /// Decoded run length.
        run: u32,
        /// Blocks in the slice.
        total: u32,
    },

    /// A selector palette entry references a codebook entry that does not exist.
    #[error("Codebook entry {index} with modifier {modifier} does not exist.")]
    CodebookIndex {
        /// Codebook entry index.
        index: u32,
        /// Modifier index.
        modifier: u32,
    },
}
