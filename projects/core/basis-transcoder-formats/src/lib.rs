#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod level;
pub mod packers;
pub mod source;
pub mod writer;

pub use error::FormatError;
pub use format::{FormatInfo, SourceCompatibility, TranscoderTextureFormat};
pub use level::{required_output_size, LevelGeometry};
pub use source::SourceBlock;
pub use writer::LevelWriter;
