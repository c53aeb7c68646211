//! # Output Formats
//!
//! [`TranscoderTextureFormat`] lists every format a level can be transcoded to.
//! The integer values are a stable contract shared with the C API; value `7`
//! is reserved and never maps to a format.
//!
//! Each format has a [`FormatInfo`] row describing its storage unit, so that
//! sizing and dispatch are table lookups rather than per-call-site matches.

use crate::error::FormatError;
use derive_enum_all_values::AllValues;

/// GPU block-compressed and raster formats a level can be transcoded to.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
#[allow(non_camel_case_types)]
pub enum TranscoderTextureFormat {
    /// ETC1 RGB, 8 bytes per block.
    Etc1Rgb = 0,
    /// ETC2 RGBA (EAC alpha + ETC1 colour), 16 bytes per block.
    Etc2Rgba = 1,
    /// BC1 RGB, 8 bytes per block.
    Bc1Rgb = 2,
    /// BC3 RGBA (BC4 alpha + BC1 colour), 16 bytes per block.
    Bc3Rgba = 3,
    /// BC4 single channel (red), 8 bytes per block.
    Bc4R = 4,
    /// BC5 two channels (red, alpha), 16 bytes per block.
    Bc5Rg = 5,
    /// BC7 RGBA, 16 bytes per block.
    Bc7Rgba = 6,
    /// PVRTC1 4bpp RGB, 8 bytes per block, Morton order.
    Pvrtc1_4Rgb = 8,
    /// PVRTC1 4bpp RGBA, 8 bytes per block, Morton order.
    Pvrtc1_4Rgba = 9,
    /// ASTC 4x4 LDR, 16 bytes per block.
    Astc4x4Rgba = 10,
    /// ATC RGB, 8 bytes per block.
    AtcRgb = 11,
    /// ATC RGBA with interpolated alpha, 16 bytes per block.
    AtcRgba = 12,
    /// 32 bits per pixel, bytes in R, G, B, A order.
    Rgba32 = 13,
    /// 16 bits per pixel, red in the top 5 bits.
    Rgb565 = 14,
    /// 16 bits per pixel, blue in the top 5 bits.
    Bgr565 = 15,
    /// 16 bits per pixel, red in the top nibble, alpha in the bottom one.
    Rgba4444 = 16,
    /// FXT1 RGB, 16 bytes per 8x4 block.
    Fxt1Rgb = 17,
    /// PVRTC2 4bpp RGB, 8 bytes per block.
    Pvrtc2_4Rgb = 18,
    /// PVRTC2 4bpp RGBA, 8 bytes per block.
    Pvrtc2_4Rgba = 19,
    /// EAC R11 unsigned, 8 bytes per block.
    Etc2EacR11 = 20,
    /// EAC RG11 unsigned (red, alpha), 16 bytes per block.
    Etc2EacRg11 = 21,
}

/// How a format's output relates to the stored source blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceCompatibility {
    /// The colour part is an ETC1 block, which ETC1S sources provide without re-encoding.
    Etc1Exact,
    /// Blocks are re-encoded from decoded texels.
    Reencode,
    /// Uncompressed pixels, clipped to the original image dimensions.
    Raster,
}

/// Data-table row describing one output format.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Bytes per output block, or per pixel for raster formats.
    pub bytes_per_unit: u32,
    /// Whether the output is uncompressed pixels.
    pub is_raster: bool,
    /// Texels covered by one output block horizontally (1 for raster).
    pub block_width: u32,
    /// Texels covered by one output block vertically (1 for raster).
    pub block_height: u32,
    /// Whether the format stores an alpha (or alpha-carrying second) channel.
    pub has_alpha: bool,
    /// Whether both block-aligned dimensions must be powers of two.
    pub requires_pow2: bool,
    /// Packing class.
    pub compatibility: SourceCompatibility,
}

const fn block(bytes: u32, has_alpha: bool, compatibility: SourceCompatibility) -> FormatInfo {
    FormatInfo {
        bytes_per_unit: bytes,
        is_raster: false,
        block_width: 4,
        block_height: 4,
        has_alpha,
        requires_pow2: false,
        compatibility,
    }
}

const fn raster(bytes: u32, has_alpha: bool) -> FormatInfo {
    FormatInfo {
        bytes_per_unit: bytes,
        is_raster: true,
        block_width: 1,
        block_height: 1,
        has_alpha,
        requires_pow2: false,
        compatibility: SourceCompatibility::Raster,
    }
}

const PVRTC1: FormatInfo = FormatInfo {
    requires_pow2: true,
    ..block(8, false, SourceCompatibility::Reencode)
};

const FXT1: FormatInfo = FormatInfo {
    block_width: 8,
    ..block(16, false, SourceCompatibility::Reencode)
};

impl TranscoderTextureFormat {
    /// Returns the data-table row for this format.
    pub const fn info(self) -> FormatInfo {
        use SourceCompatibility::*;
        match self {
            Self::Etc1Rgb => block(8, false, Etc1Exact),
            Self::Etc2Rgba => block(16, true, Etc1Exact),
            Self::Bc1Rgb => block(8, false, Reencode),
            Self::Bc3Rgba => block(16, true, Reencode),
            Self::Bc4R => block(8, false, Reencode),
            Self::Bc5Rg => block(16, true, Reencode),
            Self::Bc7Rgba => block(16, true, Reencode),
            Self::Pvrtc1_4Rgb => PVRTC1,
            Self::Pvrtc1_4Rgba => FormatInfo {
                has_alpha: true,
                ..PVRTC1
            },
            Self::Astc4x4Rgba => block(16, true, Reencode),
            Self::AtcRgb => block(8, false, Reencode),
            Self::AtcRgba => block(16, true, Reencode),
            Self::Rgba32 => raster(4, true),
            Self::Rgb565 => raster(2, false),
            Self::Bgr565 => raster(2, false),
            Self::Rgba4444 => raster(2, true),
            Self::Fxt1Rgb => FXT1,
            Self::Pvrtc2_4Rgb => block(8, false, Reencode),
            Self::Pvrtc2_4Rgba => block(8, true, Reencode),
            Self::Etc2EacR11 => block(8, false, Reencode),
            Self::Etc2EacRg11 => block(16, true, Reencode),
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Etc1Rgb => "etc1",
            Self::Etc2Rgba => "etc2",
            Self::Bc1Rgb => "bc1",
            Self::Bc3Rgba => "bc3",
            Self::Bc4R => "bc4",
            Self::Bc5Rg => "bc5",
            Self::Bc7Rgba => "bc7",
            Self::Pvrtc1_4Rgb => "pvrtc1_rgb",
            Self::Pvrtc1_4Rgba => "pvrtc1_rgba",
            Self::Astc4x4Rgba => "astc",
            Self::AtcRgb => "atc_rgb",
            Self::AtcRgba => "atc_rgba",
            Self::Rgba32 => "rgba32",
            Self::Rgb565 => "rgb565",
            Self::Bgr565 => "bgr565",
            Self::Rgba4444 => "rgba4444",
            Self::Fxt1Rgb => "fxt1",
            Self::Pvrtc2_4Rgb => "pvrtc2_rgb",
            Self::Pvrtc2_4Rgba => "pvrtc2_rgba",
            Self::Etc2EacR11 => "eac_r11",
            Self::Etc2EacRg11 => "eac_rg11",
        }
    }

    /// Whether this is a PVRTC1 format, which places blocks in Morton order.
    #[inline]
    pub const fn is_pvrtc1(self) -> bool {
        matches!(self, Self::Pvrtc1_4Rgb | Self::Pvrtc1_4Rgba)
    }
}

impl TryFrom<u32> for TranscoderTextureFormat {
    type Error = FormatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::all_values()
            .iter()
            .copied()
            .find(|f| *f as u32 == value)
            .ok_or(FormatError::ReservedFormat(value))
    }
}

impl core::fmt::Display for TranscoderTextureFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn has_twenty_one_formats() {
        assert_eq!(TranscoderTextureFormat::all_values().len(), 21);
    }

    #[rstest]
    #[case(0, TranscoderTextureFormat::Etc1Rgb)]
    #[case(6, TranscoderTextureFormat::Bc7Rgba)]
    #[case(8, TranscoderTextureFormat::Pvrtc1_4Rgb)]
    #[case(13, TranscoderTextureFormat::Rgba32)]
    #[case(21, TranscoderTextureFormat::Etc2EacRg11)]
    fn converts_stable_values(#[case] value: u32, #[case] expected: TranscoderTextureFormat) {
        assert_eq!(TranscoderTextureFormat::try_from(value), Ok(expected));
        assert_eq!(expected as u32, value);
    }

    #[rstest]
    #[case(7)]
    #[case(22)]
    #[case(u32::MAX)]
    fn rejects_reserved_and_unknown_values(#[case] value: u32) {
        assert_eq!(
            TranscoderTextureFormat::try_from(value),
            Err(FormatError::ReservedFormat(value))
        );
    }

    #[test]
    fn block_formats_use_8_or_16_bytes() {
        for &format in TranscoderTextureFormat::all_values() {
            let info = format.info();
            if info.is_raster {
                assert!(matches!(info.bytes_per_unit, 2 | 4), "{format}");
            } else {
                assert!(matches!(info.bytes_per_unit, 8 | 16), "{format}");
            }
        }
    }

    #[test]
    fn names_are_unique() {
        let all = TranscoderTextureFormat::all_values();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
