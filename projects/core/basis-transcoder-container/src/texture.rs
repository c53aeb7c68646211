//! Texture topologies and source formats.

use derive_enum_all_values::AllValues;

/// How the images of a file relate to each other.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum TextureType {
    /// Independent images, each with its own mip chain.
    Texture2D = 0,
    /// Images sharing resolution and mip count.
    Texture2DArray = 1,
    /// Groups of six faces in +X, -X, +Y, -Y, +Z, -Z order.
    CubemapArray = 2,
    /// Video frames, played back at `us_per_frame`.
    VideoFrames = 3,
    /// Volume slices, the image count is the depth.
    Volume = 4,
}

impl TryFrom<u8> for TextureType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Texture2D,
            1 => Self::Texture2DArray,
            2 => Self::CubemapArray,
            3 => Self::VideoFrames,
            4 => Self::Volume,
            _ => return Err(value),
        })
    }
}

/// Compression family of the stored slices.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum SourceFormat {
    /// Palettized ETC1S with entropy coded blocks.
    Etc1s = 0,
    /// Raw UASTC 4x4 blocks.
    Uastc4x4 = 1,
}

impl TryFrom<u8> for SourceFormat {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Etc1s),
            1 => Ok(Self::Uastc4x4),
            _ => Err(value),
        }
    }
}
