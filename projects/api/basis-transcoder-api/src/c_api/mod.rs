//! # C API (FFI) Documentation
//!
//! *Note: The C API is only available when the `c-exports` feature is enabled.*
//!
//! The C API wraps [`Codebook`](crate::Codebook) and [`Transcoder`](crate::Transcoder)
//! in opaque handles. Every function that can fail returns a [`BasisuResult`];
//! [`basisu_error_message`] turns its code into a static string.
//!
//! Output parameters are only written on success.
//!
//! ## Example Usage
//!
//! ```c
//! #include <stdio.h>
//! #include <stdlib.h>
//!
//! BasisuCodebook* codebook = basisu_etc1_global_selector_codebook_new();
//! BasisuTranscoder* transcoder = basisu_transcoder_new(codebook);
//!
//! BasisuResult result = basisu_start_transcoding(transcoder, data, data_len);
//! if (result.error_code != BASISU_SUCCESS) {
//!     printf("Invalid file: %s\n", basisu_error_message(result.error_code));
//! }
//!
//! size_t size = 0;
//! basisu_required_output_size(transcoder, data, data_len, 0, 0, 6 /* BC7 */, &size);
//! uint8_t* output = malloc(size);
//! result = basisu_transcode_image_level(transcoder, data, data_len, 0, 0, output, size, 6);
//!
//! basisu_stop_transcoding(transcoder);
//! basisu_transcoder_free(transcoder);
//! basisu_etc1_global_selector_codebook_free(codebook);
//! free(output);
//! ```
//!
//! The codebook may be freed before the transcoders created from it; each
//! transcoder keeps the table alive until it is freed itself.

pub mod codebook;
pub mod error;
pub mod info;
pub mod query;
pub mod transcode;
pub mod transcoder;

pub use codebook::*;
pub use error::*;
pub use info::*;
pub use query::*;
pub use transcode::*;
pub use transcoder::*;

/// Borrows `len` bytes at `data`, or `None` for a null pointer.
///
/// # Safety
/// - A non-null `data` must be valid for reads of `len` bytes for `'a`.
pub(crate) unsafe fn input_bytes<'a>(data: *const u8, len: usize) -> Option<&'a [u8]> {
    if data.is_null() {
        return None;
    }
    Some(unsafe { core::slice::from_raw_parts(data, len) })
}
