//! C layouts of the query results.

use basis_transcoder_container::{FileInfo, ImageInfo, ImageLevelInfo};

/// Level 0 description of an image.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct BasisuImageInfo {
    pub image_index: u32,
    pub total_levels: u32,
    pub orig_width: u32,
    pub orig_height: u32,
    pub width: u32,
    pub height: u32,
    pub num_blocks_x: u32,
    pub num_blocks_y: u32,
    pub total_blocks: u32,
    pub first_slice_index: u32,
    pub alpha_flag: bool,
    pub iframe_flag: bool,
}

impl From<ImageInfo> for BasisuImageInfo {
    fn from(info: ImageInfo) -> Self {
        Self {
            image_index: info.image_index,
            total_levels: info.total_levels,
            orig_width: info.orig_width,
            orig_height: info.orig_height,
            width: info.width,
            height: info.height,
            num_blocks_x: info.num_blocks_x,
            num_blocks_y: info.num_blocks_y,
            total_blocks: info.total_blocks,
            first_slice_index: info.first_slice_index,
            alpha_flag: info.alpha_flag,
            iframe_flag: info.iframe_flag,
        }
    }
}

/// Description of one mip level.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct BasisuImageLevelInfo {
    pub image_index: u32,
    pub level_index: u32,
    pub orig_width: u32,
    pub orig_height: u32,
    pub width: u32,
    pub height: u32,
    pub num_blocks_x: u32,
    pub num_blocks_y: u32,
    pub total_blocks: u32,
    pub first_slice_index: u32,
    pub alpha_flag: bool,
    pub iframe_flag: bool,
}

impl From<ImageLevelInfo> for BasisuImageLevelInfo {
    fn from(info: ImageLevelInfo) -> Self {
        Self {
            image_index: info.image_index,
            level_index: info.level_index,
            orig_width: info.orig_width,
            orig_height: info.orig_height,
            width: info.width,
            height: info.height,
            num_blocks_x: info.num_blocks_x,
            num_blocks_y: info.num_blocks_y,
            total_blocks: info.total_blocks,
            first_slice_index: info.first_slice_index,
            alpha_flag: info.alpha_flag,
            iframe_flag: info.iframe_flag,
        }
    }
}

/// File wide information.
///
/// Per-image mip counts are available through `basisu_get_total_image_levels`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct BasisuFileInfo {
    pub version: u32,
    pub total_header_size: u32,
    pub total_selectors: u32,
    pub selector_codebook_size: u32,
    pub total_endpoints: u32,
    pub endpoint_codebook_size: u32,
    pub tables_size: u32,
    pub slices_size: u64,
    /// `TextureType` value.
    pub texture_type: u32,
    pub us_per_frame: u32,
    pub total_images: u32,
    pub total_slices: u32,
    /// 0 for ETC1S, 1 for UASTC 4x4.
    pub source_format: u32,
    pub userdata0: u32,
    pub userdata1: u32,
    pub has_alpha_slices: bool,
    pub y_flipped: bool,
    pub srgb: bool,
}

impl From<&FileInfo> for BasisuFileInfo {
    fn from(info: &FileInfo) -> Self {
        Self {
            version: info.version,
            total_header_size: info.total_header_size,
            total_selectors: info.total_selectors,
            selector_codebook_size: info.selector_codebook_size,
            total_endpoints: info.total_endpoints,
            endpoint_codebook_size: info.endpoint_codebook_size,
            tables_size: info.tables_size,
            slices_size: info.slices_size,
            texture_type: info.texture_type as u32,
            us_per_frame: info.us_per_frame,
            total_images: info.total_images,
            total_slices: info.total_slices,
            source_format: info.source_format as u32,
            userdata0: info.userdata0,
            userdata1: info.userdata1,
            has_alpha_slices: info.has_alpha_slices,
            y_flipped: info.y_flipped,
            srgb: info.srgb,
        }
    }
}
