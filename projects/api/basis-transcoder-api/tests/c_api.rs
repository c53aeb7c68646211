#![cfg(feature = "c-exports")]
//! The exported C functions driven the way a C caller would.

mod common;

use basis_transcoder_api::{c_api::*, TranscoderTextureFormat};
use common::*;
use core::ptr;

struct Handles {
    codebook: *mut BasisuCodebook,
    transcoder: *mut BasisuTranscoder,
}

impl Handles {
    fn new() -> Self {
        let codebook = basisu_etc1_global_selector_codebook_new();
        let transcoder = unsafe { basisu_transcoder_new(codebook) };
        assert!(!transcoder.is_null());
        Self {
            codebook,
            transcoder,
        }
    }
}

impl Drop for Handles {
    fn drop(&mut self) {
        unsafe {
            basisu_transcoder_free(self.transcoder);
            basisu_etc1_global_selector_codebook_free(self.codebook);
        }
    }
}

#[test]
fn null_handles_are_rejected() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 8, 8, 1);
    let mut output = [0u8; 64];
    unsafe {
        assert!(basisu_transcoder_new(ptr::null()).is_null());
        assert_eq!(
            basisu_start_transcoding(ptr::null_mut(), bytes.as_ptr(), bytes.len()).error_code,
            BasisuErrorCode::NullPointer
        );
        assert_eq!(
            basisu_stop_transcoding(ptr::null_mut()).error_code,
            BasisuErrorCode::NullPointer
        );
        assert_eq!(
            basisu_get_texture_type(ptr::null(), bytes.as_ptr(), bytes.len()),
            BASISU_INVALID_TEXTURE_TYPE
        );

        let handles = Handles::new();
        let result = basisu_transcode_image_level(
            handles.transcoder,
            ptr::null(),
            0,
            0,
            0,
            output.as_mut_ptr(),
            output.len(),
            TranscoderTextureFormat::Bc1Rgb as u32,
        );
        assert_eq!(result.error_code, BasisuErrorCode::NullPointer);

        // Freeing null is a no-op.
        basisu_transcoder_free(ptr::null_mut());
        basisu_etc1_global_selector_codebook_free(ptr::null_mut());
    }
}

#[test]
fn queries_report_file_layout() {
    let bytes = uastc_images(TextureType::Texture2DArray, 2, 12, 8, 2);
    let handles = Handles::new();
    unsafe {
        let t = handles.transcoder;
        assert_eq!(
            basisu_get_texture_type(t, bytes.as_ptr(), bytes.len()),
            TextureType::Texture2DArray as u32
        );
        assert_eq!(basisu_get_total_images(t, bytes.as_ptr(), bytes.len()), 2);
        assert_eq!(basisu_get_total_image_levels(t, bytes.as_ptr(), bytes.len(), 1), 2);
        assert_eq!(basisu_get_total_image_levels(t, bytes.as_ptr(), bytes.len(), 2), 0);

        let (mut w, mut h, mut blocks) = (0u32, 0u32, 0u32);
        let result =
            basisu_get_image_level_desc(t, bytes.as_ptr(), bytes.len(), 1, 1, &mut w, &mut h, &mut blocks);
        assert!(result.is_success());
        assert_eq!((w, h, blocks), (6, 4, 2));

        let mut size = 0usize;
        let result = basisu_required_output_size(
            t,
            bytes.as_ptr(),
            bytes.len(),
            0,
            0,
            TranscoderTextureFormat::Rgba32 as u32,
            &mut size,
        );
        assert!(result.is_success());
        assert_eq!(size, 12 * 8 * 4);

        let result =
            basisu_required_output_size(t, bytes.as_ptr(), bytes.len(), 0, 0, 99, &mut size);
        assert_eq!(result.error_code, BasisuErrorCode::UnsupportedFormat);
    }
}

#[test]
fn failed_queries_leave_outputs_untouched() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 8, 8, 1);
    let handles = Handles::new();
    let (mut w, mut h, mut blocks) = (7u32, 7u32, 7u32);
    let result = unsafe {
        basisu_get_image_level_desc(
            handles.transcoder,
            bytes.as_ptr(),
            bytes.len(),
            0,
            1,
            &mut w,
            &mut h,
            &mut blocks,
        )
    };
    assert_eq!(result.error_code, BasisuErrorCode::IndexOutOfRange);
    assert_eq!((w, h, blocks), (7, 7, 7));
}

#[test]
fn lifecycle_through_exports() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 8, 8, 1);
    let handles = Handles::new();
    let t = handles.transcoder;
    let format = TranscoderTextureFormat::Rgba32 as u32;
    let mut output = vec![0u8; 8 * 8 * 4];

    unsafe {
        let early = basisu_transcode_image_level(
            t,
            bytes.as_ptr(),
            bytes.len(),
            0,
            0,
            output.as_mut_ptr(),
            output.len(),
            format,
        );
        assert_eq!(early.error_code, BasisuErrorCode::InvalidState);
        assert_eq!(
            basisu_stop_transcoding(t).error_code,
            BasisuErrorCode::InvalidState
        );

        let empty = [0u8; 0];
        assert_eq!(
            basisu_start_transcoding(t, empty.as_ptr(), 0).error_code,
            BasisuErrorCode::InvalidContainer
        );
        assert!(basisu_start_transcoding(t, bytes.as_ptr(), bytes.len()).is_success());

        let short = basisu_transcode_image_level(
            t,
            bytes.as_ptr(),
            bytes.len(),
            0,
            0,
            output.as_mut_ptr(),
            output.len() - 1,
            format,
        );
        assert_eq!(short.error_code, BasisuErrorCode::BufferTooSmall);
        assert!(output.iter().all(|&b| b == 0));

        let done = basisu_transcode_image_level(
            t,
            bytes.as_ptr(),
            bytes.len(),
            0,
            0,
            output.as_mut_ptr(),
            output.len(),
            format,
        );
        assert!(done.is_success());
        assert_eq!(output[..4], slice_color(0, 0));
        assert!(basisu_stop_transcoding(t).is_success());
    }
}

#[test]
fn transcoder_outlives_freed_codebook() {
    let bytes = etc1s_2d(8, 8);
    let codebook = basisu_etc1_global_selector_codebook_new();
    unsafe {
        let t = basisu_transcoder_new(codebook);
        basisu_etc1_global_selector_codebook_free(codebook);

        let mut output = vec![0u8; 4 * 8];
        assert!(basisu_start_transcoding(t, bytes.as_ptr(), bytes.len()).is_success());
        let result = basisu_transcode_image_level(
            t,
            bytes.as_ptr(),
            bytes.len(),
            0,
            0,
            output.as_mut_ptr(),
            output.len(),
            TranscoderTextureFormat::Etc1Rgb as u32,
        );
        assert!(result.is_success());
        basisu_transcoder_free(t);
    }
}
