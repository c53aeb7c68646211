use thiserror::Error;

/// Errors raised when resolving or writing an output format.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The integer does not name a usable format (7 is reserved, values above 21 are unknown).
    #[error("Format value {0} is reserved or unknown.")]
    ReservedFormat(u32),

    /// The format cannot represent this level (e.g. PVRTC1 with non power-of-two dimensions).
    #[error("The requested output format is not supported for this level.")]
    UnsupportedFormat,

    /// Output buffer is too small for the level.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes supplied.
        actual: usize,
    },
}
