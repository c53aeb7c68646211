//! Session control and transcoding for the C API.

use super::{
    error::{BasisuErrorCode, BasisuResult},
    input_bytes,
    transcoder::{get_transcoder_mut, BasisuTranscoder},
};
use crate::flags::DecodeFlags;
use basis_transcoder_formats::TranscoderTextureFormat;

/// Start a transcoding session on a file, replacing any active session.
///
/// The file must be passed again, unchanged, to every
/// [`basisu_transcode_image_level`] call of the session.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_start_transcoding(
    transcoder: *mut BasisuTranscoder,
    data: *const u8,
    len: usize,
) -> BasisuResult {
    let Some(transcoder) = (unsafe { get_transcoder_mut(transcoder) }) else {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    };
    let Some(bytes) = (unsafe { input_bytes(data, len) }) else {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    };
    transcoder.start_transcoding(bytes).into()
}

/// End the active transcoding session.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
#[unsafe(no_mangle)]
pub unsafe extern "C" fn basisu_stop_transcoding(transcoder: *mut BasisuTranscoder) -> BasisuResult {
    let Some(transcoder) = (unsafe { get_transcoder_mut(transcoder) }) else {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    };
    transcoder.stop_transcoding().into()
}

/// Transcode one mip level into `output` with default flags.
///
/// `format` is a `TranscoderTextureFormat` value.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `output` must be valid for writes of `output_capacity_bytes` bytes
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn basisu_transcode_image_level(
    transcoder: *mut BasisuTranscoder,
    data: *const u8,
    len: usize,
    image_index: u32,
    level_index: u32,
    output: *mut u8,
    output_capacity_bytes: usize,
    format: u32,
) -> BasisuResult {
    unsafe {
        basisu_transcode_image_level_with_flags(
            transcoder,
            data,
            len,
            image_index,
            level_index,
            output,
            output_capacity_bytes,
            format,
            0,
        )
    }
}

/// Transcode one mip level into `output`.
///
/// `decode_flags` is a combination of `DecodeFlags` bits; unknown bits are ignored.
///
/// # Safety
/// - `transcoder` must be a valid pointer to a BasisuTranscoder
/// - `data` must be valid for reads of `len` bytes
/// - `output` must be valid for writes of `output_capacity_bytes` bytes
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn basisu_transcode_image_level_with_flags(
    transcoder: *mut BasisuTranscoder,
    data: *const u8,
    len: usize,
    image_index: u32,
    level_index: u32,
    output: *mut u8,
    output_capacity_bytes: usize,
    format: u32,
    decode_flags: u32,
) -> BasisuResult {
    let Some(transcoder) = (unsafe { get_transcoder_mut(transcoder) }) else {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    };
    let Some(bytes) = (unsafe { input_bytes(data, len) }) else {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    };
    if output.is_null() {
        return BasisuResult::from_error_code(BasisuErrorCode::NullPointer);
    }
    let Ok(format) = TranscoderTextureFormat::try_from(format) else {
        return BasisuResult::from_error_code(BasisuErrorCode::UnsupportedFormat);
    };

    let output = unsafe { core::slice::from_raw_parts_mut(output, output_capacity_bytes) };
    let flags = DecodeFlags::from_bits_truncate(decode_flags);
    transcoder
        .transcode_image_level(bytes, image_index, level_index, output, format, flags)
        .into()
}
