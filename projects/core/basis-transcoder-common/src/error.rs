//! Error types for bitstream decoding.

use thiserror::Error;

/// Errors raised while decoding entropy-coded `.basis` bitstreams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitstreamError {
    /// The serialized Huffman table header is malformed.
    #[error("Invalid Huffman table: {0}.")]
    InvalidHuffmanTable(&'static str),

    /// The code lengths do not describe a valid prefix code.
    #[error("Huffman code lengths do not form a valid prefix code.")]
    InvalidCodeLengths,
}
