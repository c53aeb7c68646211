//! # Transcoder
//!
//! [`Transcoder`] answers metadata queries about `.basis` files and drives
//! the transcoding lifecycle:
//!
//! ```text
//! Created --start--> Started --stop--> Stopped
//!                     ^   |              |
//!                     +---+----start-----+
//! ```
//!
//! Queries parse the caller's bytes on every call and work in any state.
//! Transcoding needs a started session on the same file: the session keeps
//! the file's fingerprint and its decoded ETC1S palettes, never the bytes.

use crate::{
    codebook::Codebook,
    engine::{transcode_level, SessionScratch},
    error::TranscoderError,
    flags::DecodeFlags,
    session::TranscodeSession,
};
use basis_transcoder_container::{
    Container, ContainerFingerprint, FileInfo, ImageInfo, ImageLevelInfo, ParseOptions,
    TextureType,
};
use basis_transcoder_formats::{required_output_size, LevelGeometry, TranscoderTextureFormat};
use core::fmt;
use tracing::debug;

/// Lifecycle state of a [`Transcoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscoderState {
    /// No session has been started yet.
    Created,
    /// A session is active and levels can be transcoded.
    Started,
    /// The last session was stopped.
    Stopped,
}

impl fmt::Display for TranscoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Stopped => "stopped",
        })
    }
}

/// Size and block count of one mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelDesc {
    /// Width in pixels.
    pub orig_width: u32,
    /// Height in pixels.
    pub orig_height: u32,
    /// Number of 4x4 blocks.
    pub total_blocks: u32,
}

#[derive(Debug)]
struct ActiveSession {
    fingerprint: ContainerFingerprint,
    scratch: SessionScratch,
}

#[derive(Debug)]
enum Phase {
    Created,
    Started(ActiveSession),
    Stopped,
}

/// A transcoding handle bound to one selector codebook.
///
/// # Examples
///
/// ```ignore
/// use basis_transcoder_api::{Codebook, DecodeFlags, Transcoder, TranscoderTextureFormat};
///
/// let codebook = Codebook::new();
/// let mut transcoder = Transcoder::new(&codebook);
///
/// transcoder.start_transcoding(&bytes)?;
/// let format = TranscoderTextureFormat::Bc7Rgba;
/// let size = transcoder.required_output_size(&bytes, 0, 0, format)?;
/// let mut output = vec![0u8; size];
/// transcoder.transcode_image_level(&bytes, 0, 0, &mut output, format, DecodeFlags::empty())?;
/// transcoder.stop_transcoding()?;
/// ```
#[derive(Debug)]
pub struct Transcoder {
    codebook: Codebook,
    options: ParseOptions,
    phase: Phase,
}

impl Transcoder {
    /// Creates a transcoder sharing `codebook`.
    pub fn new(codebook: &Codebook) -> Self {
        Self {
            codebook: codebook.clone(),
            options: ParseOptions::default(),
            phase: Phase::Created,
        }
    }

    /// Replaces the options used to parse files.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// The codebook this transcoder was created with.
    #[inline]
    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TranscoderState {
        match self.phase {
            Phase::Created => TranscoderState::Created,
            Phase::Started(_) => TranscoderState::Started,
            Phase::Stopped => TranscoderState::Stopped,
        }
    }

    /// Parses and validates `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`TranscoderError::InvalidContainer`] if `bytes` is not a valid `.basis` file.
    pub fn parse<'a>(&self, bytes: &'a [u8]) -> Result<Container<'a>, TranscoderError> {
        Ok(Container::parse_with(bytes, self.options)?)
    }

    /// Texture type of the file.
    pub fn texture_type(&self, bytes: &[u8]) -> Result<TextureType, TranscoderError> {
        Ok(self.parse(bytes)?.texture_type())
    }

    /// Number of images in the file.
    pub fn total_images(&self, bytes: &[u8]) -> Result<u32, TranscoderError> {
        Ok(self.parse(bytes)?.total_images())
    }

    /// Number of mip levels of `image_index`.
    pub fn total_image_levels(&self, bytes: &[u8], image_index: u32) -> Result<u32, TranscoderError> {
        Ok(self.parse(bytes)?.total_levels(image_index)?)
    }

    /// Size and block count of one mip level.
    pub fn image_level_desc(
        &self,
        bytes: &[u8],
        image_index: u32,
        level_index: u32,
    ) -> Result<LevelDesc, TranscoderError> {
        let level = self.parse(bytes)?.level_descriptor(image_index, level_index)?;
        Ok(LevelDesc {
            orig_width: level.orig_width,
            orig_height: level.orig_height,
            total_blocks: level.total_blocks,
        })
    }

    /// Level 0 description of `image_index`.
    pub fn image_info(&self, bytes: &[u8], image_index: u32) -> Result<ImageInfo, TranscoderError> {
        Ok(self.parse(bytes)?.image_info(image_index)?)
    }

    /// Full description of one mip level.
    pub fn image_level_info(
        &self,
        bytes: &[u8],
        image_index: u32,
        level_index: u32,
    ) -> Result<ImageLevelInfo, TranscoderError> {
        Ok(self.parse(bytes)?.image_level_info(image_index, level_index)?)
    }

    /// File wide information.
    pub fn file_info(&self, bytes: &[u8]) -> Result<FileInfo, TranscoderError> {
        Ok(self.parse(bytes)?.file_info())
    }

    /// Bytes needed to transcode one mip level to `format`.
    pub fn required_output_size(
        &self,
        bytes: &[u8],
        image_index: u32,
        level_index: u32,
        format: TranscoderTextureFormat,
    ) -> Result<usize, TranscoderError> {
        level_output_size(&self.parse(bytes)?, image_index, level_index, format)
    }

    /// Starts a session on `bytes`, replacing any active session.
    ///
    /// # Errors
    ///
    /// - [`TranscoderError::InvalidContainer`] if `bytes` is not a valid file.
    /// - [`TranscoderError::CorruptData`] if the ETC1S palettes or tables are malformed.
    ///
    /// The state is unchanged on error.
    pub fn start_transcoding(&mut self, bytes: &[u8]) -> Result<(), TranscoderError> {
        let container = self.parse(bytes)?;
        self.start_with(&container)
    }

    pub(crate) fn start_with(&mut self, container: &Container<'_>) -> Result<(), TranscoderError> {
        let scratch = SessionScratch::new(container, &self.codebook)?;
        debug!(
            texture_type = ?container.texture_type(),
            total_images = container.total_images(),
            source_format = ?container.source_format(),
            "started transcoding"
        );
        self.phase = Phase::Started(ActiveSession {
            fingerprint: container.fingerprint(),
            scratch,
        });
        Ok(())
    }

    /// Ends the active session and frees its scratch memory.
    ///
    /// # Errors
    ///
    /// Returns [`TranscoderError::InvalidState`] unless a session is active.
    pub fn stop_transcoding(&mut self) -> Result<(), TranscoderError> {
        if !matches!(self.phase, Phase::Started(_)) {
            return Err(TranscoderError::InvalidState {
                operation: "stop transcoding",
                state: self.state(),
            });
        }
        self.phase = Phase::Stopped;
        debug!("stopped transcoding");
        Ok(())
    }

    /// Transcodes one mip level of the started file into `output`.
    ///
    /// # Errors
    ///
    /// - [`TranscoderError::InvalidState`] without an active session, or if
    ///   `bytes` is not the file the session was started on.
    /// - [`TranscoderError::IndexError`] for an image or level that does not exist.
    /// - [`TranscoderError::UnsupportedFormat`] if `format` cannot represent the level.
    /// - [`TranscoderError::BufferTooSmall`] if `output` is shorter than
    ///   [`required_output_size`](Self::required_output_size). Nothing is written.
    /// - [`TranscoderError::CorruptData`] if a slice fails to decode. `output`
    ///   may then be partially written; the session stays active.
    pub fn transcode_image_level(
        &mut self,
        bytes: &[u8],
        image_index: u32,
        level_index: u32,
        output: &mut [u8],
        format: TranscoderTextureFormat,
        flags: DecodeFlags,
    ) -> Result<(), TranscoderError> {
        self.session_mut("transcode an image level")?;
        // The data CRC was verified when the session started.
        let container = Container::parse_with(bytes, ParseOptions { skip_crc: true })?;
        self.transcode_with(&container, image_index, level_index, output, format, flags)
    }

    pub(crate) fn transcode_with(
        &mut self,
        container: &Container<'_>,
        image_index: u32,
        level_index: u32,
        output: &mut [u8],
        format: TranscoderTextureFormat,
        flags: DecodeFlags,
    ) -> Result<(), TranscoderError> {
        let session = self.session_mut("transcode an image level")?;
        if session.fingerprint != container.fingerprint() {
            return Err(TranscoderError::InvalidState {
                operation: "transcode a file other than the started one",
                state: TranscoderState::Started,
            });
        }
        transcode_level(
            container,
            &mut session.scratch,
            image_index,
            level_index,
            output,
            format,
            flags,
        )
    }

    fn session_mut(&mut self, operation: &'static str) -> Result<&mut ActiveSession, TranscoderError> {
        let state = self.state();
        match &mut self.phase {
            Phase::Started(session) => Ok(session),
            _ => Err(TranscoderError::InvalidState { operation, state }),
        }
    }

    /// Starts a session that is stopped again when the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Same as [`start_transcoding`](Self::start_transcoding).
    pub fn begin<'a>(&'a mut self, bytes: &'a [u8]) -> Result<TranscodeSession<'a>, TranscoderError> {
        let container = self.parse(bytes)?;
        self.start_with(&container)?;
        Ok(TranscodeSession::new(self, container))
    }
}

/// Bytes needed to transcode one level of `container` to `format`.
pub(crate) fn level_output_size(
    container: &Container<'_>,
    image_index: u32,
    level_index: u32,
    format: TranscoderTextureFormat,
) -> Result<usize, TranscoderError> {
    let level = container.level_descriptor(image_index, level_index)?;
    let geometry = LevelGeometry {
        orig_width: level.orig_width,
        orig_height: level.orig_height,
        num_blocks_x: level.num_blocks_x,
        num_blocks_y: level.num_blocks_y,
    };
    Ok(required_output_size(format, &geometry))
}
