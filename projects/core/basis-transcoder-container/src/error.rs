use thiserror::Error;

/// Reasons a byte buffer is rejected as a `.basis` container.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ContainerError {
    #[error("Input is too small to hold a .basis header: {actual} bytes.")]
    TooSmall { actual: usize },

    #[error("Invalid .basis signature {0:#06x}.")]
    BadSignature(u16),

    #[error("Unsupported .basis version {0:#06x}.")]
    UnsupportedVersion(u16),

    #[error("Invalid header size {0}, expected 77.")]
    HeaderSize(u16),

    #[error("Header CRC-16 mismatch: stored {stored:#06x}, computed {computed:#06x}.")]
    HeaderCrcMismatch { stored: u16, computed: u16 },

    #[error("Header declares {declared} data bytes, but {actual} bytes follow the header.")]
    DataSizeMismatch { declared: usize, actual: usize },

    #[error("Data CRC-16 mismatch: stored {stored:#06x}, computed {computed:#06x}.")]
    DataCrcMismatch { stored: u16, computed: u16 },

    #[error("The file contains no slices.")]
    NoSlices,

    #[error("The file contains no images.")]
    NoImages,

    #[error("Unknown texture type {0}.")]
    UnknownTextureType(u8),

    #[error("Unknown source format {0}.")]
    UnknownSourceFormat(u8),

    #[error("Cubemap array image count {0} is not a multiple of 6.")]
    CubemapImageCount(u32),

    #[error("Slice descriptor table at offset {offset} with {count} entries exceeds the file.")]
    SliceTableOutOfBounds { offset: usize, count: usize },

    #[error("The {section} section at offset {offset} with {size} bytes exceeds the file.")]
    SectionOutOfBounds {
        section: &'static str,
        offset: usize,
        size: usize,
    },

    #[error("Data of slice {index} exceeds the file.")]
    SliceOutOfBounds { index: u32 },

    #[error("Slice {index} references image {image_index}, but the file has {total_images} images.")]
    SliceImageIndex {
        index: u32,
        image_index: u32,
        total_images: u32,
    },

    #[error("Block counts of slice {index} do not match its {width}x{height} dimensions.")]
    SliceBlockCounts { index: u32, width: u16, height: u16 },

    #[error("UASTC slice {index} holds {actual} bytes, expected {expected}.")]
    UastcSliceSize {
        index: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Slice {index} is not correctly paired with its alpha slice.")]
    AlphaSlicePairing { index: u32 },

    #[error("Image {image} lists level {found} where level {expected} was expected.")]
    LevelSequence { image: u32, expected: u32, found: u32 },

    #[error("Image {image} has no level 0 slice.")]
    MissingImage { image: u32 },

    #[error("CRC-16 of slice {index} does not match its data.")]
    SliceCrcMismatch { index: u32 },
}

/// An image or level index outside the file.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum IndexError {
    #[error("Image index {index} is out of range, the file has {total} images.")]
    ImageIndex { index: u32, total: u32 },

    #[error("Level index {index} of image {image} is out of range, the image has {total} levels.")]
    LevelIndex { image: u32, index: u32, total: u32 },
}
