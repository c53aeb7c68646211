//! C API error handling.

use crate::error::TranscoderError;
use core::ffi::c_char;

/// C-compatible error codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisuErrorCode {
    /// Operation succeeded
    Success = 0,
    /// The input is not a valid .basis file
    InvalidContainer = 1,
    /// Image or level index out of range
    IndexOutOfRange = 2,
    /// Operation not allowed in the transcoder's current state
    InvalidState = 3,
    /// Output buffer too small for the level
    BufferTooSmall = 4,
    /// Compressed texture data is corrupt
    CorruptData = 5,
    /// Output format is reserved, unknown or cannot represent the level
    UnsupportedFormat = 6,
    /// Null pointer provided for a required parameter
    NullPointer = 7,
}

/// C-compatible Result type.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasisuResult {
    /// Error code (0 = success, non-zero = error)
    pub error_code: BasisuErrorCode,
}

impl BasisuResult {
    /// Create a success result
    pub const fn success() -> Self {
        Self {
            error_code: BasisuErrorCode::Success,
        }
    }

    /// Create an error result from an error code
    pub const fn from_error_code(error_code: BasisuErrorCode) -> Self {
        Self { error_code }
    }

    /// Check if the result is successful
    pub fn is_success(&self) -> bool {
        matches!(self.error_code, BasisuErrorCode::Success)
    }
}

impl<T> From<Result<T, TranscoderError>> for BasisuResult {
    fn from(result: Result<T, TranscoderError>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(e) => e.into(),
        }
    }
}

impl From<TranscoderError> for BasisuResult {
    fn from(error: TranscoderError) -> Self {
        Self::from_error_code(error.into())
    }
}

impl From<TranscoderError> for BasisuErrorCode {
    fn from(error: TranscoderError) -> Self {
        match error {
            TranscoderError::InvalidContainer(_) => Self::InvalidContainer,
            TranscoderError::IndexError(_) => Self::IndexOutOfRange,
            TranscoderError::InvalidState { .. } => Self::InvalidState,
            TranscoderError::BufferTooSmall { .. } => Self::BufferTooSmall,
            TranscoderError::CorruptData(_) => Self::CorruptData,
            TranscoderError::UnsupportedFormat => Self::UnsupportedFormat,
        }
    }
}

/// Get a null-terminated string description of the error code.
///
/// The returned string is a static string literal that does not need to be freed.
///
/// # Safety
/// This function is safe to call with any error code value.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_error_message(error_code: BasisuErrorCode) -> *const c_char {
    match error_code {
        BasisuErrorCode::Success => c"Success".as_ptr() as *const c_char,
        BasisuErrorCode::InvalidContainer => {
            c"The input is not a valid .basis file".as_ptr() as *const c_char
        }
        BasisuErrorCode::IndexOutOfRange => {
            c"Image or level index out of range".as_ptr() as *const c_char
        }
        BasisuErrorCode::InvalidState => {
            c"Operation not allowed in the transcoder's current state".as_ptr() as *const c_char
        }
        BasisuErrorCode::BufferTooSmall => {
            c"Output buffer too small for the level".as_ptr() as *const c_char
        }
        BasisuErrorCode::CorruptData => {
            c"Compressed texture data is corrupt".as_ptr() as *const c_char
        }
        BasisuErrorCode::UnsupportedFormat => {
            c"Output format is not supported for this level".as_ptr() as *const c_char
        }
        BasisuErrorCode::NullPointer => {
            c"Null pointer provided for a required parameter".as_ptr() as *const c_char
        }
    }
}
