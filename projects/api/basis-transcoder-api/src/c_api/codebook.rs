//! Codebook handles for the C API.

use crate::codebook::Codebook;
use alloc::boxed::Box;

/// Opaque handle to a shared global selector codebook.
///
/// - Created with [`basisu_etc1_global_selector_codebook_new()`]
/// - Passed to [`basisu_transcoder_new()`](super::basisu_transcoder_new)
/// - Freed with [`basisu_etc1_global_selector_codebook_free()`]
///
/// The table is immutable and may be shared between threads.
#[repr(C)]
pub struct BasisuCodebook {
    // Private field to ensure it's opaque
    _private: [u8; 0],
}

/// Create the standard global selector codebook.
///
/// The returned handle must be freed with [`basisu_etc1_global_selector_codebook_free()`].
#[unsafe(no_mangle)]
pub extern "C" fn basisu_etc1_global_selector_codebook_new() -> *mut BasisuCodebook {
    Box::into_raw(Box::new(Codebook::new())) as *mut BasisuCodebook
}

/// Free a codebook handle.
///
/// Transcoders created from the handle stay valid.
///
/// # Safety
/// - `codebook` must be null or a pointer returned by [`basisu_etc1_global_selector_codebook_new()`]
/// - `codebook` must not have been freed already
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_etc1_global_selector_codebook_free(codebook: *mut BasisuCodebook) {
    if !codebook.is_null() {
        unsafe {
            drop(Box::from_raw(codebook as *mut Codebook));
        }
    }
}

/// Borrows the codebook behind a handle.
///
/// # Safety
/// - `codebook` must be null or a valid pointer to a BasisuCodebook
pub(crate) unsafe fn get_codebook<'a>(codebook: *const BasisuCodebook) -> Option<&'a Codebook> {
    unsafe { (codebook as *const Codebook).as_ref() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_free() {
        let codebook = basisu_etc1_global_selector_codebook_new();
        assert!(!codebook.is_null());
        unsafe {
            assert_eq!(get_codebook(codebook).unwrap().handle_count(), 1);
            basisu_etc1_global_selector_codebook_free(codebook);
        }
    }

    #[test]
    fn free_null_is_noop() {
        unsafe { basisu_etc1_global_selector_codebook_free(core::ptr::null_mut()) };
    }
}
