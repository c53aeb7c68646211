#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub(crate) mod constants;
pub mod container;
pub mod error;
pub mod header;
pub mod slice;
pub mod texture;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_prelude;

pub use container::{
    Container, ContainerFingerprint, FileInfo, ImageInfo, ImageLevelInfo, LevelDescriptor,
    ParseOptions,
};
pub use error::{ContainerError, IndexError};
pub use header::{BasisHeader, HeaderFlags};
pub use slice::{SliceDesc, SliceFlags};
pub use texture::{SourceFormat, TextureType};
