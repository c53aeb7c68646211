#![doc = include_str!("../README.MD")]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! Safe, high-level API for transcoding `.basis` files.
//!
//! A [`Transcoder`] validates untrusted `.basis` bytes, reports their images
//! and mip levels, and transcodes ETC1S or UASTC slices into any
//! [`TranscoderTextureFormat`].
//!
//! # Examples
//!
//! ```ignore
//! use basis_transcoder_api::{Codebook, Transcoder, TranscoderTextureFormat};
//!
//! let codebook = Codebook::new();
//! let mut transcoder = Transcoder::new(&codebook);
//!
//! let mut session = transcoder.begin(&bytes)?;
//! let info = session.image_info(0)?;
//! let rgba = session.transcode(0, 0, TranscoderTextureFormat::Rgba32)?;
//! assert_eq!(rgba.len(), (info.orig_width * info.orig_height * 4) as usize);
//! ```

extern crate alloc;

pub mod codebook;
mod engine;
pub mod error;
pub mod flags;
pub mod session;
pub mod transcoder;

#[cfg(feature = "c-exports")]
pub mod c_api;

#[cfg(test)]
mod test_prelude;

pub use codebook::Codebook;
pub use error::{CorruptDataError, TranscoderError};
pub use flags::DecodeFlags;
pub use session::TranscodeSession;
pub use transcoder::{LevelDesc, Transcoder, TranscoderState};

// Types returned by the queries.
pub use basis_transcoder_container::{
    FileInfo, ImageInfo, ImageLevelInfo, IndexError, ParseOptions, SourceFormat, TextureType,
};
pub use basis_transcoder_formats::{FormatInfo, TranscoderTextureFormat};
