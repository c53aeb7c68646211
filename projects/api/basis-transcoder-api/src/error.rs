//! Error types for transcoder operations.

use crate::transcoder::TranscoderState;
use basis_transcoder_container::{ContainerError, IndexError};
use basis_transcoder_etc1s::Etc1sError;
use basis_transcoder_formats::FormatError;
use basis_transcoder_uastc::UastcError;
use thiserror::Error;

/// Errors that can occur during transcoder operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranscoderError {
    /// The input is not a valid `.basis` file.
    #[error("Invalid .basis container: {0}")]
    InvalidContainer(#[from] ContainerError),

    /// The requested image or mip level does not exist.
    #[error(transparent)]
    IndexError(#[from] IndexError),

    /// The operation is not allowed in the transcoder's current state.
    #[error("Cannot {operation} while the transcoder is {state}.")]
    InvalidState {
        /// What the caller tried to do.
        operation: &'static str,
        /// Lifecycle state at the time of the call.
        state: TranscoderState,
    },

    /// The output buffer is too small for the level.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    BufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// A slice's compressed data is malformed.
    #[error("Corrupt texture data: {0}")]
    CorruptData(#[from] CorruptDataError),

    /// The output format is reserved, unknown, or cannot represent the level.
    #[error("The requested output format is not supported for this level.")]
    UnsupportedFormat,
}

/// The source family decoder that rejected a slice.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CorruptDataError {
    /// ETC1S palettes, tables or slice data.
    #[error(transparent)]
    Etc1s(#[from] Etc1sError),

    /// A UASTC block.
    #[error(transparent)]
    Uastc(#[from] UastcError),
}

impl From<Etc1sError> for TranscoderError {
    fn from(error: Etc1sError) -> Self {
        Self::CorruptData(error.into())
    }
}

impl From<UastcError> for TranscoderError {
    fn from(error: UastcError) -> Self {
        Self::CorruptData(error.into())
    }
}

impl From<FormatError> for TranscoderError {
    fn from(error: FormatError) -> Self {
        match error {
            FormatError::OutputBufferTooSmall { needed, actual } => {
                Self::BufferTooSmall { needed, actual }
            }
            FormatError::ReservedFormat(_) | FormatError::UnsupportedFormat => {
                Self::UnsupportedFormat
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn buffer_too_small_message() {
        let error: TranscoderError = FormatError::OutputBufferTooSmall {
            needed: 64,
            actual: 8,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Output buffer too small: need 64 bytes, but only 8 bytes available."
        );
    }

    #[test]
    fn reserved_format_is_unsupported() {
        let error: TranscoderError = FormatError::ReservedFormat(7).into();
        assert_eq!(error, TranscoderError::UnsupportedFormat);
    }

    #[test]
    fn invalid_state_names_operation_and_state() {
        let error = TranscoderError::InvalidState {
            operation: "stop transcoding",
            state: TranscoderState::Created,
        };
        assert_eq!(
            error.to_string(),
            "Cannot stop transcoding while the transcoder is created."
        );
    }

    #[test]
    fn decoder_errors_are_corrupt_data() {
        let error: TranscoderError = UastcError::InvalidMode(69).into();
        assert!(matches!(error, TranscoderError::CorruptData(CorruptDataError::Uastc(_))));
    }
}
