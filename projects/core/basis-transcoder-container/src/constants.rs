//! Offsets and sizes of the on-disk `.basis` structures. All fields are little endian.

/// `'B' << 8 | 's'`
pub(crate) const BASIS_SIGNATURE: u32 = 0x4273;
pub(crate) const MIN_VERSION: u32 = 0x10;
pub(crate) const MAX_VERSION: u32 = 0x13;

pub(crate) const HEADER_SIZE: usize = 77;
/// The header CRC covers everything after the data size field.
pub(crate) const HEADER_CRC_START: usize = 8;

// Header fields.
pub(crate) const SIG_OFFSET: usize = 0;
pub(crate) const VER_OFFSET: usize = 2;
pub(crate) const HEADER_SIZE_OFFSET: usize = 4;
pub(crate) const HEADER_CRC16_OFFSET: usize = 6;
pub(crate) const DATA_SIZE_OFFSET: usize = 8;
pub(crate) const DATA_CRC16_OFFSET: usize = 12;
pub(crate) const TOTAL_SLICES_OFFSET: usize = 14;
pub(crate) const TOTAL_IMAGES_OFFSET: usize = 17;
pub(crate) const TEX_FORMAT_OFFSET: usize = 20;
pub(crate) const FLAGS_OFFSET: usize = 21;
pub(crate) const TEX_TYPE_OFFSET: usize = 23;
pub(crate) const US_PER_FRAME_OFFSET: usize = 24;
pub(crate) const USERDATA0_OFFSET: usize = 31;
pub(crate) const USERDATA1_OFFSET: usize = 35;
pub(crate) const TOTAL_ENDPOINTS_OFFSET: usize = 39;
pub(crate) const ENDPOINT_CB_FILE_OFS_OFFSET: usize = 41;
pub(crate) const ENDPOINT_CB_FILE_SIZE_OFFSET: usize = 45;
pub(crate) const TOTAL_SELECTORS_OFFSET: usize = 48;
pub(crate) const SELECTOR_CB_FILE_OFS_OFFSET: usize = 50;
pub(crate) const SELECTOR_CB_FILE_SIZE_OFFSET: usize = 54;
pub(crate) const TABLES_FILE_OFS_OFFSET: usize = 57;
pub(crate) const TABLES_FILE_SIZE_OFFSET: usize = 61;
pub(crate) const SLICE_DESC_FILE_OFS_OFFSET: usize = 65;
pub(crate) const EXTENDED_FILE_OFS_OFFSET: usize = 69;
pub(crate) const EXTENDED_FILE_SIZE_OFFSET: usize = 73;

pub(crate) const SLICE_DESC_SIZE: usize = 23;

// Slice descriptor fields, relative to the descriptor.
pub(crate) const SLICE_IMAGE_INDEX_OFFSET: usize = 0;
pub(crate) const SLICE_LEVEL_INDEX_OFFSET: usize = 3;
pub(crate) const SLICE_FLAGS_OFFSET: usize = 4;
pub(crate) const SLICE_ORIG_WIDTH_OFFSET: usize = 5;
pub(crate) const SLICE_ORIG_HEIGHT_OFFSET: usize = 7;
pub(crate) const SLICE_NUM_BLOCKS_X_OFFSET: usize = 9;
pub(crate) const SLICE_NUM_BLOCKS_Y_OFFSET: usize = 11;
pub(crate) const SLICE_FILE_OFS_OFFSET: usize = 13;
pub(crate) const SLICE_FILE_SIZE_OFFSET: usize = 17;
pub(crate) const SLICE_CRC16_OFFSET: usize = 21;

/// Bytes per UASTC block.
pub(crate) const UASTC_BLOCK_BYTES: usize = 16;
