//! Scoped transcoding sessions.

use crate::{
    error::TranscoderError,
    flags::DecodeFlags,
    transcoder::{level_output_size, Transcoder},
};
use alloc::{vec, vec::Vec};
use basis_transcoder_container::{Container, FileInfo, ImageInfo, ImageLevelInfo, TextureType};
use basis_transcoder_formats::TranscoderTextureFormat;

/// A started session over one file, stopped when dropped.
///
/// Created by [`Transcoder::begin`]. The file is parsed once; queries and
/// transcodes reuse the parsed container.
///
/// ```ignore
/// let mut session = transcoder.begin(&bytes)?;
/// for image in 0..session.total_images() {
///     let rgba = session.transcode(image, 0, TranscoderTextureFormat::Rgba32)?;
/// }
/// ```
#[derive(Debug)]
pub struct TranscodeSession<'a> {
    transcoder: &'a mut Transcoder,
    container: Container<'a>,
}

impl<'a> TranscodeSession<'a> {
    pub(crate) fn new(transcoder: &'a mut Transcoder, container: Container<'a>) -> Self {
        Self {
            transcoder,
            container,
        }
    }

    /// The parsed file.
    #[inline]
    pub fn container(&self) -> &Container<'a> {
        &self.container
    }

    /// Texture type of the file.
    #[inline]
    pub fn texture_type(&self) -> TextureType {
        self.container.texture_type()
    }

    /// Number of images in the file.
    #[inline]
    pub fn total_images(&self) -> u32 {
        self.container.total_images()
    }

    /// Number of mip levels of `image_index`.
    pub fn total_image_levels(&self, image_index: u32) -> Result<u32, TranscoderError> {
        Ok(self.container.total_levels(image_index)?)
    }

    /// Level 0 description of `image_index`.
    pub fn image_info(&self, image_index: u32) -> Result<ImageInfo, TranscoderError> {
        Ok(self.container.image_info(image_index)?)
    }

    /// Full description of one mip level.
    pub fn image_level_info(
        &self,
        image_index: u32,
        level_index: u32,
    ) -> Result<ImageLevelInfo, TranscoderError> {
        Ok(self.container.image_level_info(image_index, level_index)?)
    }

    /// File wide information.
    pub fn file_info(&self) -> FileInfo {
        self.container.file_info()
    }

    /// Bytes needed to transcode one mip level to `format`.
    pub fn required_output_size(
        &self,
        image_index: u32,
        level_index: u32,
        format: TranscoderTextureFormat,
    ) -> Result<usize, TranscoderError> {
        level_output_size(&self.container, image_index, level_index, format)
    }

    /// Transcodes one mip level into `output`.
    ///
    /// See [`Transcoder::transcode_image_level`] for the error cases.
    pub fn transcode_into(
        &mut self,
        image_index: u32,
        level_index: u32,
        output: &mut [u8],
        format: TranscoderTextureFormat,
        flags: DecodeFlags,
    ) -> Result<(), TranscoderError> {
        self.transcoder
            .transcode_with(&self.container, image_index, level_index, output, format, flags)
    }

    /// Transcodes one mip level into a newly allocated buffer.
    pub fn transcode_with_flags(
        &mut self,
        image_index: u32,
        level_index: u32,
        format: TranscoderTextureFormat,
        flags: DecodeFlags,
    ) -> Result<Vec<u8>, TranscoderError> {
        let size = self.required_output_size(image_index, level_index, format)?;
        let mut output = vec![0u8; size];
        self.transcode_into(image_index, level_index, &mut output, format, flags)?;
        Ok(output)
    }

    /// Transcodes one mip level into a newly allocated buffer with default flags.
    #[inline]
    pub fn transcode(
        &mut self,
        image_index: u32,
        level_index: u32,
        format: TranscoderTextureFormat,
    ) -> Result<Vec<u8>, TranscoderError> {
        self.transcode_with_flags(image_index, level_index, format, DecodeFlags::empty())
    }
}

impl Drop for TranscodeSession<'_> {
    fn drop(&mut self) {
        // The session is the only borrower of the transcoder, so it is still started.
        let _ = self.transcoder.stop_transcoding();
    }
}
