//! Metadata queries for the C API.
//!
//! Queries validate the file on every call and work in any transcoder state.

use super::{
    error::{BasisuErrorCode, BasisuResult},
    info::{BasisuFileInfo, BasisuImageInfo, BasisuImageLevelInfo},
    input_bytes,
    transcoder::{get_transcoder, BasisuTranscoder},
};
use crate::transcoder::Transcoder;
use basis_transcoder_formats::TranscoderTextureFormat;

/// Returned by [`basisu_get_texture_type`] when the query fails.
pub const BASISU_INVALID_TEXTURE_TYPE: u32 = u32::MAX;

/// Resolves the transcoder and input bytes shared by every query.
///
/// # Safety
/// Same as the calling query.
unsafe fn query_args<'a>(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
) -> Result<(&'a Transcoder, &'a [u8]), BasisuErrorCode> {
    let transcoder = unsafe { get_transcoder(transcoder) }.ok_or(BasisuErrorCode::NullPointer)?;
    let bytes = unsafe { input_bytes(data, len) }.ok_or(BasisuErrorCode::NullPointer)?;
    Ok((transcoder, bytes))
}

/// Get the texture type of a file.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
///
/// # Returns
/// The `TextureType` value, or [`BASISU_INVALID_TEXTURE_TYPE`] if the file is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_texture_type(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
) -> u32 {
    match unsafe { query_args(transcoder, data, len) } {
        Ok((transcoder, bytes)) => transcoder
            .texture_type(bytes)
            .map_or(BASISU_INVALID_TEXTURE_TYPE, |t| t as u32),
        Err(_) => BASISU_INVALID_TEXTURE_TYPE,
    }
}

/// Get the number of images in a file.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
///
/// # Returns
/// The image count, or 0 if the file is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_total_images(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
) -> u32 {
    match unsafe { query_args(transcoder, data, len) } {
        Ok((transcoder, bytes)) => transcoder.total_images(bytes).unwrap_or(0),
        Err(_) => 0,
    }
}

/// Get the number of mip levels of an image.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
///
/// # Returns
/// The level count, or 0 if the file or image index is invalid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_total_image_levels(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    image_index: u32,
) -> u32 {
    match unsafe { query_args(transcoder, data, len) } {
        Ok((transcoder, bytes)) => transcoder
            .total_image_levels(bytes, image_index)
            .unwrap_or(0),
        Err(_) => 0,
    }
}

/// Get the size and block count of one mip level.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `orig_width`, `orig_height` and `total_blocks` must be valid for writes
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn basisu_get_image_level_desc(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    image_index: u32,
    level_index: u32,
    orig_width: *mut u32,
    orig_height: *mut u32,
    total_blocks: *mut u32,
) -> BasisuResult {
    if orig_width.is_null() || orig_height.is_null() || total_blocks.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let (transcoder, bytes) = match unsafe { query_args(transcoder, data, len) } {
        Ok(args) => args,
        Err(code) => return BasisuResult::from_error_code(code),
    };

    match transcoder.image_level_desc(bytes, image_index, level_index) {
        Ok(desc) => {
            unsafe {
                *orig_width = desc.orig_width;
                *orig_height = desc.orig_height;
                *total_blocks = desc.total_blocks;
            }
            BasisuResult::success()
        }
        Err(e) => e.into(),
    }
}

/// Get the level 0 description of an image.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `info` must be valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_image_info(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    info: *mut BasisuImageInfo,
    image_index: u32,
) -> BasisuResult {
    if info.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let (transcoder, bytes) = match unsafe { query_args(transcoder, data, len) } {
        Ok(args) => args,
        Err(code) => return BasisuResult::from_error_code(code),
    };

    match transcoder.image_info(bytes, image_index) {
        Ok(result) => {
            unsafe { *info = result.into() };
            BasisuResult::success()
        }
        Err(e) => e.into(),
    }
}

/// Get the description of one mip level.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `info` must be valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_image_level_info(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    info: *mut BasisuImageLevelInfo,
    image_index: u32,
    level_index: u32,
) -> BasisuResult {
    if info.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let (transcoder, bytes) = match unsafe { query_args(transcoder, data, len) } {
        Ok(args) => args,
        Err(code) => return BasisuResult::from_error_code(code),
    };

    match transcoder.image_level_info(bytes, image_index, level_index) {
        Ok(result) => {
            unsafe { *info = result.into() };
            BasisuResult::success()
        }
        Err(e) => e.into(),
    }
}

/// Get file wide information.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `info` must be valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_get_file_info(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    info: *mut BasisuFileInfo,
) -> BasisuResult {
    if info.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let (transcoder, bytes) = match unsafe { query_args(transcoder, data, len) } {
        Ok(args) => args,
        Err(code) => return BasisuResult::from_error_code(code),
    };

    match transcoder.file_info(bytes) {
        Ok(result) => {
            unsafe { *info = (&result).into() };
            BasisuResult::success()
        }
        Err(e) => e.into(),
    }
}

/// Get the number of bytes needed to transcode one mip level to `format`.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `out_size` must be valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_required_output_size(
    transcoder: *const BasisuTranscoder,
    data: *const u8,
    len: usize,
    image_index: u32,
    level_index: u32,
    format: u32,
    out_size: *mut usize,
) -> BasisuResult {
    if out_size.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let (transcoder, bytes) = match unsafe { query_args(transcoder, data, len) } {
        Ok(args) => args,
        Err(code) => return BasisuResult::from_error_code(code),
    };
    let Ok(format) = TranscoderTextureFormat::try_from(format) else {
        return BasisuResult::from_error_code(BasisuErrorCode::UnsupportedFormat);
    };

    match transcoder.required_output_size(bytes, image_index, level_index, format) {
        Ok(size) => {
            unsafe { *out_size = size };
            BasisuResult::success()
        }
        Err(e) => e.into(),
    }
}
