//! Transcoder handles for the C API.

use super::codebook::{get_codebook, BasisuCodebook};
use crate::transcoder::Transcoder;
use alloc::boxed::Box;
use core::ptr;

/// Opaque handle to a transcoder.
///
/// - Created with [`basisu_transcoder_new()`]
/// - Passed to the query and transcode functions
/// - Freed with [`basisu_transcoder_free()`]
///
/// A transcoder is NOT thread-safe and must not be used from two threads at
/// once. Separate transcoders may run on separate threads.
#[repr(C)]
pub struct BasisuTranscoder {
    // Private field to ensure it's opaque
    _private: [u8; 0],
}

/// Create a transcoder that shares `codebook`.
///
/// # Safety
/// - `codebook` must be null or a valid pointer to a BasisuCodebook
///
/// # Returns
/// A new transcoder, or null if `codebook` is null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_transcoder_new(
    codebook: *const BasisuCodebook,
) -> *mut BasisuTranscoder {
    match unsafe { get_codebook(codebook) } {
        Some(codebook) => Box::into_raw(Box::new(Transcoder::new(codebook))) as *mut BasisuTranscoder,
        None => ptr::null_mut(),
    }
}

/// Free a transcoder, ending any active session.
///
/// # Safety
/// - `transcoder` must be null or a pointer returned by [`basisu_transcoder_new()`]
/// - `transcoder` must not have been freed already
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_transcoder_free(transcoder: *mut BasisuTranscoder) {
    if !transcoder.is_null() {
        unsafe {
            drop(Box::from_raw(transcoder as *mut Transcoder));
        }
    }
}

/// Borrows the transcoder behind a handle.
///
/// # Safety
/// - `transcoder` must be null or a valid pointer to a BasisuTranscoder
pub(crate) unsafe fn get_transcoder<'a>(
    transcoder: *const BasisuTranscoder,
) -> Option<&'a Transcoder> {
    unsafe { (transcoder as *const Transcoder).as_ref() }
}

/// Mutably borrows the transcoder behind a handle.
///
/// # Safety
/// - `transcoder` must be null or a valid pointer to a BasisuTranscoder not aliased elsewhere
pub(crate) unsafe fn get_transcoder_mut<'a>(
    transcoder: *mut BasisuTranscoder,
) -> Option<&'a mut Transcoder> {
    unsafe { (transcoder as *mut Transcoder).as_mut() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::c_api::codebook::{
        basisu_etc1_global_selector_codebook_free, basisu_etc1_global_selector_codebook_new,
    };
    use crate::transcoder::TranscoderState;

    #[test]
    fn transcoder_outlives_codebook_handle() {
        unsafe {
            let codebook = basisu_etc1_global_selector_codebook_new();
            let transcoder = basisu_transcoder_new(codebook);
            assert!(!transcoder.is_null());
            basisu_etc1_global_selector_codebook_free(codebook);

            let inner = get_transcoder(transcoder).unwrap();
            assert_eq!(inner.state(), TranscoderState::Created);
            assert_eq!(inner.codebook().handle_count(), 1);
            basisu_transcoder_free(transcoder);
        }
    }

    #[test]
    fn null_codebook_gives_null_transcoder() {
        unsafe {
            assert!(basisu_transcoder_new(ptr::null()).is_null());
            basisu_transcoder_free(ptr::null_mut());
        }
    }
}
