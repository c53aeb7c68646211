//! # File Header
//!
//! The fixed 77 byte header at the start of every `.basis` file.

use crate::{constants::*, texture::TextureType};
use bitflags::bitflags;
use endian_writer::{EndianReader, LittleEndianReader};

bitflags! {
    /// Header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeaderFlags: u16 {
        /// Slices are ETC1S.
        const ETC1S = 1;
        /// Images are stored upside down.
        const Y_FLIPPED = 2;
        /// Every colour slice is followed by an alpha slice.
        const HAS_ALPHA_SLICES = 4;
        /// Selectors reference the global selector codebook.
        const USES_GLOBAL_CODEBOOK = 8;
        /// Texels are sRGB encoded.
        const SRGB = 16;
    }
}

/// Raw header fields, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct BasisHeader {
    pub sig: u16,
    pub version: u16,
    pub header_size: u16,
    pub header_crc16: u16,
    pub data_size: u32,
    pub data_crc16: u16,
    /// 24 bits on disk.
    pub total_slices: u32,
    /// 24 bits on disk.
    pub total_images: u32,
    /// Source format: 0 is ETC1S, 1 is UASTC 4x4.
    pub tex_format: u8,
    pub flags: HeaderFlags,
    /// Raw [`TextureType`] value.
    pub tex_type: u8,
    /// 24 bits on disk.
    pub us_per_frame: u32,
    pub userdata0: u32,
    pub userdata1: u32,
    pub total_endpoints: u16,
    pub endpoint_cb_file_ofs: u32,
    /// 24 bits on disk.
    pub endpoint_cb_file_size: u32,
    pub total_selectors: u16,
    pub selector_cb_file_ofs: u32,
    /// 24 bits on disk.
    pub selector_cb_file_size: u32,
    pub tables_file_ofs: u32,
    pub tables_file_size: u32,
    pub slice_desc_file_ofs: u32,
    pub extended_file_ofs: u32,
    pub extended_file_size: u32,
}

/// Reads a little endian field of `size` bytes (1 to 4) at `offset`.
///
/// # Safety
///
/// Four bytes starting at `offset` must be readable through `reader`.
#[inline(always)]
pub(crate) unsafe fn read_field(reader: &mut LittleEndianReader, offset: usize, size: u32) -> u32 {
    let value = reader.read_u32_at(offset as isize);
    match size {
        4 => value,
        _ => value & ((1u32 << (size * 8)) - 1),
    }
}

impl BasisHeader {
    /// Reads the header fields from the start of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than the header.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        // SAFETY: bytes.len() >= HEADER_SIZE and every field ends at or before HEADER_SIZE,
        // narrow fields are read through a 4 byte window that also stays inside the header.
        unsafe {
            let mut reader = LittleEndianReader::new(bytes.as_ptr());
            let r = &mut reader;
            Some(Self {
                sig: read_field(r, SIG_OFFSET, 2) as u16,
                version: read_field(r, VER_OFFSET, 2) as u16,
                header_size: read_field(r, HEADER_SIZE_OFFSET, 2) as u16,
                header_crc16: read_field(r, HEADER_CRC16_OFFSET, 2) as u16,
                data_size: read_field(r, DATA_SIZE_OFFSET, 4),
                data_crc16: read_field(r, DATA_CRC16_OFFSET, 2) as u16,
                total_slices: read_field(r, TOTAL_SLICES_OFFSET, 3),
                total_images: read_field(r, TOTAL_IMAGES_OFFSET, 3),
                tex_format: read_field(r, TEX_FORMAT_OFFSET, 1) as u8,
                flags: HeaderFlags::from_bits_retain(read_field(r, FLAGS_OFFSET, 2) as u16),
                tex_type: read_field(r, TEX_TYPE_OFFSET, 1) as u8,
                us_per_frame: read_field(r, US_PER_FRAME_OFFSET, 3),
                userdata0: read_field(r, USERDATA0_OFFSET, 4),
                userdata1: read_field(r, USERDATA1_OFFSET, 4),
                total_endpoints: read_field(r, TOTAL_ENDPOINTS_OFFSET, 2) as u16,
                endpoint_cb_file_ofs: read_field(r, ENDPOINT_CB_FILE_OFS_OFFSET, 4),
                endpoint_cb_file_size: read_field(r, ENDPOINT_CB_FILE_SIZE_OFFSET, 3),
                total_selectors: read_field(r, TOTAL_SELECTORS_OFFSET, 2) as u16,
                selector_cb_file_ofs: read_field(r, SELECTOR_CB_FILE_OFS_OFFSET, 4),
                selector_cb_file_size: read_field(r, SELECTOR_CB_FILE_SIZE_OFFSET, 3),
                tables_file_ofs: read_field(r, TABLES_FILE_OFS_OFFSET, 4),
                tables_file_size: read_field(r, TABLES_FILE_SIZE_OFFSET, 4),
                slice_desc_file_ofs: read_field(r, SLICE_DESC_FILE_OFS_OFFSET, 4),
                extended_file_ofs: read_field(r, EXTENDED_FILE_OFS_OFFSET, 4),
                extended_file_size: read_field(r, EXTENDED_FILE_SIZE_OFFSET, 4),
            })
        }
    }

    /// Texture type, if the raw value is known.
    #[inline]
    pub fn texture_type(&self) -> Option<TextureType> {
        TextureType::try_from(self.tex_type).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn reads_fields_written_by_builder() {
        let bytes = ContainerBuilder::uastc(TextureType::VideoFrames)
            .us_per_frame(33_333)
            .userdata(7, 0xDEAD_BEEF)
            .slice(SliceSpec::uastc(0, 0, 8, 4))
            .build();
        let header = BasisHeader::read(&bytes).unwrap();

        assert_eq!(header.sig as u32, BASIS_SIGNATURE);
        assert_eq!(header.header_size as usize, HEADER_SIZE);
        assert_eq!(header.total_slices, 1);
        assert_eq!(header.total_images, 1);
        assert_eq!(header.tex_format, 1);
        assert_eq!(header.texture_type(), Some(TextureType::VideoFrames));
        assert_eq!(header.us_per_frame, 33_333);
        assert_eq!((header.userdata0, header.userdata1), (7, 0xDEAD_BEEF));
        assert_eq!(header.data_size as usize, bytes.len() - HEADER_SIZE);
    }

    #[test]
    fn short_input_has_no_header() {
        assert_eq!(BasisHeader::read(&[0u8; HEADER_SIZE - 1]), None);
    }
}
