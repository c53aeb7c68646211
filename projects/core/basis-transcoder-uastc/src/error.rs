use thiserror::Error;

/// Errors raised while decoding a UASTC block.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UastcError {
    /// The block's mode code maps to the reserved mode.
    #[error("Invalid UASTC block mode code {0:#04x}.")]
    InvalidMode(u32),

    /// The partition pattern index is outside the mode's pattern table.
    #[error("Invalid partition pattern {pattern} for UASTC mode {mode}.")]
    InvalidPattern {
        /// Block mode.
        mode: u8,
        /// Decoded pattern index.
        pattern: u8,
    },
}
