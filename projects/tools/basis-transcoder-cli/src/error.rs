use basis_transcoder_api::TranscoderError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Failed to map file: {0}")]
    MmapError(String),
    #[error(transparent)]
    Transcoder(#[from] TranscoderError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("Path is not valid UTF-8: {0}")]
    InvalidPath(String),
    #[error("Output of {len} bytes does not hold a {width}x{height} RGBA image.")]
    ImageSize { len: usize, width: u32, height: u32 },
}
