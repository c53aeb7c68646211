//! Common test imports and a builder for `.basis` fixtures.
//!
//! [`ContainerBuilder`] lays a file out as header, slice table, ETC1S
//! sections, then slice data, and fills in every size, offset and CRC-16.
#![allow(unused_imports)]
#![allow(missing_docs)]

pub use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

#[cfg(test)]
pub use rstest::rstest;

pub use crate::{
    constants::*,
    header::{BasisHeader, HeaderFlags},
    slice::SliceFlags,
    texture::{SourceFormat, TextureType},
};
use basis_transcoder_common::crc16::crc16;
use endian_writer::{EndianWriter, LittleEndianWriter};

/// Colour of the solid UASTC blocks [`SliceSpec::uastc`] fills a slice with.
pub fn slice_color(image_index: u32, level_index: u32) -> [u8; 4] {
    [
        (image_index * 37 + 11) as u8,
        (level_index * 53 + 7) as u8,
        128,
        255,
    ]
}

/// A UASTC mode 8 block: 5 bit mode prefix `0b10111`, then R, G, B, A.
pub fn uastc_solid_block([r, g, b, a]: [u8; 4]) -> [u8; 16] {
    let bits = 0b10111u64 | (r as u64) << 5 | (g as u64) << 13 | (b as u64) << 21 | (a as u64) << 29;
    let mut block = [0u8; 16];
    block[..8].copy_from_slice(&bits.to_le_bytes());
    block
}

/// One slice of a fixture.
#[derive(Debug, Clone)]
pub struct SliceSpec {
    pub image_index: u32,
    pub level_index: u32,
    pub flags: SliceFlags,
    pub orig_width: u16,
    pub orig_height: u16,
    pub num_blocks_x: u16,
    pub num_blocks_y: u16,
    pub data: Vec<u8>,
}

impl SliceSpec {
    pub fn new(image_index: u32, level_index: u32, width: u16, height: u16, data: Vec<u8>) -> Self {
        Self {
            image_index,
            level_index,
            flags: SliceFlags::empty(),
            orig_width: width,
            orig_height: height,
            num_blocks_x: width.div_ceil(4),
            num_blocks_y: height.div_ceil(4),
            data,
        }
    }

    /// A UASTC slice of solid blocks in [`slice_color`].
    pub fn uastc(image_index: u32, level_index: u32, width: u16, height: u16) -> Self {
        let blocks = width.div_ceil(4) as usize * height.div_ceil(4) as usize;
        let block = uastc_solid_block(slice_color(image_index, level_index));
        let data = block.iter().copied().cycle().take(blocks * 16).collect();
        Self::new(image_index, level_index, width, height, data)
    }

    pub fn flags(mut self, flags: SliceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Overrides the block counts derived from the dimensions.
    pub fn blocks(mut self, num_blocks_x: u16, num_blocks_y: u16) -> Self {
        self.num_blocks_x = num_blocks_x;
        self.num_blocks_y = num_blocks_y;
        self
    }
}

/// Shared ETC1S sections of a fixture.
#[derive(Debug, Clone, Default)]
pub struct Etc1sPayload {
    pub endpoint_data: Vec<u8>,
    pub num_endpoints: u16,
    pub selector_data: Vec<u8>,
    pub num_selectors: u16,
    pub table_data: Vec<u8>,
}

impl Etc1sPayload {
    pub fn new(
        endpoint_data: Vec<u8>,
        num_endpoints: u16,
        selector_data: Vec<u8>,
        num_selectors: u16,
        table_data: Vec<u8>,
    ) -> Self {
        Self {
            endpoint_data,
            num_endpoints,
            selector_data,
            num_selectors,
            table_data,
        }
    }
}

/// Builds `.basis` files.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    version: u16,
    tex_format: u8,
    tex_type: TextureType,
    flags: HeaderFlags,
    total_images: Option<u32>,
    us_per_frame: u32,
    userdata: (u32, u32),
    etc1s: Etc1sPayload,
    slices: Vec<SliceSpec>,
}

impl ContainerBuilder {
    fn new(tex_format: u8, tex_type: TextureType, flags: HeaderFlags) -> Self {
        Self {
            version: 0x13,
            tex_format,
            tex_type,
            flags,
            total_images: None,
            us_per_frame: 0,
            userdata: (0, 0),
            etc1s: Etc1sPayload::default(),
            slices: Vec::new(),
        }
    }

    pub fn uastc(tex_type: TextureType) -> Self {
        Self::new(SourceFormat::Uastc4x4 as u8, tex_type, HeaderFlags::empty())
    }

    pub fn etc1s(tex_type: TextureType, payload: Etc1sPayload) -> Self {
        let mut builder = Self::new(SourceFormat::Etc1s as u8, tex_type, HeaderFlags::ETC1S);
        builder.etc1s = payload;
        builder
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Image count; defaults to one past the highest slice image index.
    pub fn images(mut self, total_images: u32) -> Self {
        self.total_images = Some(total_images);
        self
    }

    pub fn flags(mut self, flags: HeaderFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn alpha_slices(self) -> Self {
        self.flags(HeaderFlags::HAS_ALPHA_SLICES)
    }

    pub fn us_per_frame(mut self, us_per_frame: u32) -> Self {
        self.us_per_frame = us_per_frame;
        self
    }

    pub fn userdata(mut self, userdata0: u32, userdata1: u32) -> Self {
        self.userdata = (userdata0, userdata1);
        self
    }

    pub fn slice(mut self, slice: SliceSpec) -> Self {
        self.slices.push(slice);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let table_ofs = HEADER_SIZE;
        let endpoint_ofs = table_ofs + self.slices.len() * SLICE_DESC_SIZE;
        let selector_ofs = endpoint_ofs + self.etc1s.endpoint_data.len();
        let tables_ofs = selector_ofs + self.etc1s.selector_data.len();
        let mut slice_ofs = tables_ofs + self.etc1s.table_data.len();
        let total_len = slice_ofs + self.slices.iter().map(|s| s.data.len()).sum::<usize>();

        // Narrow fields are written as 4 byte values in ascending offset order, each
        // write's high bytes are overwritten by the next field. The slack covers the
        // last descriptor's CRC.
        let mut bytes = vec![0u8; total_len + 4];
        let total_images = self.total_images.unwrap_or_else(|| {
            self.slices.iter().map(|s| s.image_index + 1).max().unwrap_or(0)
        });

        unsafe {
            let mut writer = LittleEndianWriter::new(bytes.as_mut_ptr());
            writer.write_u32_at(BASIS_SIGNATURE, SIG_OFFSET as isize);
            writer.write_u32_at(self.version as u32, VER_OFFSET as isize);
            writer.write_u32_at(HEADER_SIZE as u32, HEADER_SIZE_OFFSET as isize);
            writer.write_u32_at((total_len - HEADER_SIZE) as u32, DATA_SIZE_OFFSET as isize);
            writer.write_u32_at(self.slices.len() as u32, TOTAL_SLICES_OFFSET as isize);
            writer.write_u32_at(total_images, TOTAL_IMAGES_OFFSET as isize);
            writer.write_u32_at(self.tex_format as u32, TEX_FORMAT_OFFSET as isize);
            writer.write_u32_at(self.flags.bits() as u32, FLAGS_OFFSET as isize);
            writer.write_u32_at(self.tex_type as u32, TEX_TYPE_OFFSET as isize);
            writer.write_u32_at(self.us_per_frame & 0xFF_FFFF, US_PER_FRAME_OFFSET as isize);
            writer.write_u32_at(self.userdata.0, USERDATA0_OFFSET as isize);
            writer.write_u32_at(self.userdata.1, USERDATA1_OFFSET as isize);
            writer.write_u32_at(self.etc1s.num_endpoints as u32, TOTAL_ENDPOINTS_OFFSET as isize);
            writer.write_u32_at(endpoint_ofs as u32, ENDPOINT_CB_FILE_OFS_OFFSET as isize);
            writer.write_u32_at(
                self.etc1s.endpoint_data.len() as u32,
                ENDPOINT_CB_FILE_SIZE_OFFSET as isize,
            );
            writer.write_u32_at(self.etc1s.num_selectors as u32, TOTAL_SELECTORS_OFFSET as isize);
            writer.write_u32_at(selector_ofs as u32, SELECTOR_CB_FILE_OFS_OFFSET as isize);
            writer.write_u32_at(
                self.etc1s.selector_data.len() as u32,
                SELECTOR_CB_FILE_SIZE_OFFSET as isize,
            );
            writer.write_u32_at(tables_ofs as u32, TABLES_FILE_OFS_OFFSET as isize);
            writer.write_u32_at(self.etc1s.table_data.len() as u32, TABLES_FILE_SIZE_OFFSET as isize);
            writer.write_u32_at(table_ofs as u32, SLICE_DESC_FILE_OFS_OFFSET as isize);
            writer.write_u32_at(0, EXTENDED_FILE_OFS_OFFSET as isize);
            writer.write_u32_at(0, EXTENDED_FILE_SIZE_OFFSET as isize);

            for (index, slice) in self.slices.iter().enumerate() {
                let desc = (table_ofs + index * SLICE_DESC_SIZE) as isize;
                let at = |offset: usize| desc + offset as isize;
                writer.write_u32_at(slice.image_index, at(SLICE_IMAGE_INDEX_OFFSET));
                writer.write_u32_at(slice.level_index, at(SLICE_LEVEL_INDEX_OFFSET));
                writer.write_u32_at(slice.flags.bits() as u32, at(SLICE_FLAGS_OFFSET));
                writer.write_u32_at(slice.orig_width as u32, at(SLICE_ORIG_WIDTH_OFFSET));
                writer.write_u32_at(slice.orig_height as u32, at(SLICE_ORIG_HEIGHT_OFFSET));
                writer.write_u32_at(slice.num_blocks_x as u32, at(SLICE_NUM_BLOCKS_X_OFFSET));
                writer.write_u32_at(slice.num_blocks_y as u32, at(SLICE_NUM_BLOCKS_Y_OFFSET));
                writer.write_u32_at(slice_ofs as u32, at(SLICE_FILE_OFS_OFFSET));
                writer.write_u32_at(slice.data.len() as u32, at(SLICE_FILE_SIZE_OFFSET));
                writer.write_u32_at(crc16(&slice.data, 0) as u32, at(SLICE_CRC16_OFFSET));
                slice_ofs += slice.data.len();
            }
        }

        bytes.truncate(total_len);
        let mut cursor = endpoint_ofs;
        for section in [
            &self.etc1s.endpoint_data,
            &self.etc1s.selector_data,
            &self.etc1s.table_data,
        ]
        .into_iter()
        .chain(self.slices.iter().map(|s| &s.data))
        {
            bytes[cursor..cursor + section.len()].copy_from_slice(section);
            cursor += section.len();
        }

        refresh_crcs(&mut bytes);
        bytes
    }
}

/// Recomputes the data and header CRC-16 after a fixture has been edited.
pub fn refresh_crcs(bytes: &mut [u8]) {
    let data_crc = crc16(&bytes[HEADER_SIZE..], 0);
    bytes[DATA_CRC16_OFFSET..DATA_CRC16_OFFSET + 2].copy_from_slice(&data_crc.to_le_bytes());
    let header_crc = crc16(&bytes[HEADER_CRC_START..HEADER_SIZE], 0);
    bytes[HEADER_CRC16_OFFSET..HEADER_CRC16_OFFSET + 2].copy_from_slice(&header_crc.to_le_bytes());
}
