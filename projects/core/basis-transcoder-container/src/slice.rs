//! Slice descriptors.
//!
//! A slice is one stored mip level of one image: a colour slice, or for
//! ETC1S files with alpha, a colour slice followed by its alpha slice.

use crate::{constants::*, header::read_field};
use bitflags::bitflags;
use endian_writer::LittleEndianReader;

bitflags! {
    /// Per-slice flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SliceFlags: u8 {
        /// The slice holds alpha data (ETC1S) or its blocks carry alpha (UASTC).
        const HAS_ALPHA = 1;
        /// The slice is a video I-frame and does not reference the previous frame.
        const IFRAME = 2;
    }
}

/// One entry of the slice descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceDesc {
    /// Image the slice belongs to. 24 bits on disk.
    pub image_index: u32,
    /// Mip level within the image.
    pub level_index: u8,
    /// Slice flags.
    pub flags: SliceFlags,
    /// Width in pixels.
    pub orig_width: u16,
    /// Height in pixels.
    pub orig_height: u16,
    /// 4x4 blocks per row.
    pub num_blocks_x: u16,
    /// 4x4 block rows.
    pub num_blocks_y: u16,
    /// Offset of the slice data from the start of the file.
    pub file_ofs: u32,
    /// Size of the slice data in bytes.
    pub file_size: u32,
    /// CRC-16 of the slice data.
    pub crc16: u16,
}

impl SliceDesc {
    /// Reads the descriptor at the start of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than a descriptor.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < SLICE_DESC_SIZE {
            return None;
        }

        // SAFETY: bytes.len() >= SLICE_DESC_SIZE. Every 4 byte window read below ends at or
        // before SLICE_DESC_SIZE; the trailing CRC is taken from the top of the window
        // ending at the descriptor's last byte.
        unsafe {
            let mut reader = LittleEndianReader::new(bytes.as_ptr());
            let r = &mut reader;
            Some(Self {
                image_index: read_field(r, SLICE_IMAGE_INDEX_OFFSET, 3),
                level_index: read_field(r, SLICE_LEVEL_INDEX_OFFSET, 1) as u8,
                flags: SliceFlags::from_bits_retain(read_field(r, SLICE_FLAGS_OFFSET, 1) as u8),
                orig_width: read_field(r, SLICE_ORIG_WIDTH_OFFSET, 2) as u16,
                orig_height: read_field(r, SLICE_ORIG_HEIGHT_OFFSET, 2) as u16,
                num_blocks_x: read_field(r, SLICE_NUM_BLOCKS_X_OFFSET, 2) as u16,
                num_blocks_y: read_field(r, SLICE_NUM_BLOCKS_Y_OFFSET, 2) as u16,
                file_ofs: read_field(r, SLICE_FILE_OFS_OFFSET, 4),
                file_size: read_field(r, SLICE_FILE_SIZE_OFFSET, 4),
                crc16: (read_field(r, SLICE_CRC16_OFFSET - 2, 4) >> 16) as u16,
            })
        }
    }

    /// Total 4x4 blocks in the slice.
    #[inline]
    pub fn total_blocks(&self) -> u32 {
        self.num_blocks_x as u32 * self.num_blocks_y as u32
    }

    /// Byte range of the slice data within the file.
    #[inline]
    pub fn data_range(&self) -> core::ops::Range<usize> {
        let start = self.file_ofs as usize;
        start..start + self.file_size as usize
    }

    /// Whether this is an alpha slice or carries alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.flags.contains(SliceFlags::HAS_ALPHA)
    }

    /// Whether this is a video I-frame.
    #[inline]
    pub fn is_iframe(&self) -> bool {
        self.flags.contains(SliceFlags::IFRAME)
    }
}
