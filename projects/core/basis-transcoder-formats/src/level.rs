use crate::format::TranscoderTextureFormat;

/// Dimensions of one mip level as stored in the source container.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LevelGeometry {
    /// Width in pixels before block padding.
    pub orig_width: u32,
    /// Height in pixels before block padding.
    pub orig_height: u32,
    /// Number of 4x4 source blocks per row.
    pub num_blocks_x: u32,
    /// Number of 4x4 source block rows.
    pub num_blocks_y: u32,
}

impl LevelGeometry {
    /// Total number of 4x4 source blocks.
    #[inline]
    pub const fn total_blocks(&self) -> u32 {
        self.num_blocks_x * self.num_blocks_y
    }

    /// Number of output units per row and column for `format`.
    ///
    /// For raster formats the units are pixels of the original image.
    pub fn output_units(&self, format: TranscoderTextureFormat) -> (usize, usize) {
        let info = format.info();
        if info.is_raster {
            return (self.orig_width as usize, self.orig_height as usize);
        }
        let width = self.num_blocks_x as usize * 4;
        let height = self.num_blocks_y as usize * 4;
        let bw = info.block_width as usize;
        let bh = info.block_height as usize;
        (width.div_ceil(bw), height.div_ceil(bh))
    }
}

/// Number of bytes a level occupies when transcoded to `format`.
///
/// For 4x4 block formats this is `total_blocks * bytes_per_block`. FXT1 covers
/// 8x4 texels per block. Raster formats need `orig_width * orig_height` pixels.
///
/// ```
/// use basis_transcoder_formats::{required_output_size, LevelGeometry, TranscoderTextureFormat};
///
/// let level = LevelGeometry { orig_width: 10, orig_height: 6, num_blocks_x: 3, num_blocks_y: 2 };
/// assert_eq!(required_output_size(TranscoderTextureFormat::Bc1Rgb, &level), 6 * 8);
/// assert_eq!(required_output_size(TranscoderTextureFormat::Rgba32, &level), 10 * 6 * 4);
/// ```
pub fn required_output_size(format: TranscoderTextureFormat, geometry: &LevelGeometry) -> usize {
    let (units_x, units_y) = geometry.output_units(format);
    units_x * units_y * format.info().bytes_per_unit as usize
}
