//! # Level Writer
//!
//! [`LevelWriter`] takes decoded source blocks in row-major order and places
//! the packed result in the caller's buffer:
//!
//! - 4x4 block formats: unit `y * num_blocks_x + x`.
//! - PVRTC1: unit [`morton_offset`](crate::packers::pvrtc::morton_offset).
//! - FXT1: one unit per horizontal pair; a trailing odd column is paired with itself.
//! - Raster formats: pixels clipped to the original dimensions.

use crate::{
    error::FormatError,
    format::{FormatInfo, TranscoderTextureFormat},
    level::{required_output_size, LevelGeometry},
    packers::{astc, atc, bc1, bc4, bc7, channel_values, eac, etc1, fxt1, pvrtc, raster},
    source::SourceBlock,
};
use basis_transcoder_common::decoded_4x4_block::Decoded4x4Block;
use likely_stable::unlikely;

/// Writes one transcoded level into a caller-provided buffer.
pub struct LevelWriter<'a> {
    format: TranscoderTextureFormat,
    info: FormatInfo,
    geometry: LevelGeometry,
    output: &'a mut [u8],
    pending_left: Option<Decoded4x4Block>,
}

impl<'a> LevelWriter<'a> {
    /// Creates a writer after checking that `format` can represent the level
    /// and that `output` is large enough.
    ///
    /// # Errors
    ///
    /// - [`FormatError::UnsupportedFormat`] for PVRTC1 with non power-of-two block counts.
    /// - [`FormatError::OutputBufferTooSmall`] if `output` is shorter than
    ///   [`required_output_size`].
    pub fn new(
        format: TranscoderTextureFormat,
        geometry: LevelGeometry,
        output: &'a mut [u8],
    ) -> Result<Self, FormatError> {
        let info = format.info();
        if info.requires_pow2
            && !(geometry.num_blocks_x.is_power_of_two() && geometry.num_blocks_y.is_power_of_two())
        {
            return Err(FormatError::UnsupportedFormat);
        }

        let needed = required_output_size(format, &geometry);
        if unlikely(output.len() < needed) {
            return Err(FormatError::OutputBufferTooSmall {
                needed,
                actual: output.len(),
            });
        }

        Ok(Self {
            format,
            info,
            geometry,
            output,
            pending_left: None,
        })
    }

    /// Output format.
    pub fn format(&self) -> TranscoderTextureFormat {
        self.format
    }

    #[inline]
    fn put_unit(&mut self, index: usize, bytes: &[u8]) {
        let size = self.info.bytes_per_unit as usize;
        self.output[index * size..(index + 1) * size].copy_from_slice(bytes);
    }

    /// Packs `block` at block position `(x, y)`.
    ///
    /// Blocks must arrive in row-major order for FXT1 pairing to work. The
    /// block's alpha must already reflect the caller's alpha policy.
    pub fn write_block<B: SourceBlock + ?Sized>(&mut self, x: u32, y: u32, block: &B) {
        let texels = block.decode();
        let linear = (y * self.geometry.num_blocks_x + x) as usize;

        use TranscoderTextureFormat as F;
        match self.format {
            F::Etc1Rgb => {
                let packed = block.to_etc1().unwrap_or_else(|| etc1::encode_etc1(&texels));
                self.put_unit(linear, &packed.bytes);
            }
            F::Etc2Rgba => {
                let exact = block.to_etc1();
                self.put_unit(linear, &etc1::encode_etc2_rgba(&texels, exact.as_ref()));
            }
            F::Bc1Rgb => self.put_unit(linear, &bc1::encode_bc1(&texels)),
            F::Bc3Rgba => self.put_unit(linear, &bc4::encode_bc3(&texels)),
            F::Bc4R => self.put_unit(linear, &bc4::encode_bc4(&channel_values(&texels, 0))),
            F::Bc5Rg => self.put_unit(linear, &bc4::encode_bc5(&texels)),
            F::Bc7Rgba => self.put_unit(linear, &bc7::encode_bc7(&texels)),
            F::Pvrtc1_4Rgb | F::Pvrtc1_4Rgba => {
                let packed = pvrtc::encode_pvrtc1_block(&texels, self.info.has_alpha);
                let index = pvrtc::morton_offset(
                    self.geometry.num_blocks_x,
                    self.geometry.num_blocks_y,
                    x,
                    y,
                );
                self.put_unit(index, &packed);
            }
            F::Astc4x4Rgba => self.put_unit(linear, &astc::encode_astc(&texels)),
            F::AtcRgb => self.put_unit(linear, &atc::encode_atc_rgb(&texels)),
            F::AtcRgba => self.put_unit(linear, &atc::encode_atc_rgba(&texels)),
            F::Rgba32 | F::Rgb565 | F::Bgr565 | F::Rgba4444 => {
                raster::write_block_pixels(self.format, &texels, x, y, &self.geometry, self.output);
            }
            F::Fxt1Rgb => self.write_fxt1(x, y, texels),
            F::Pvrtc2_4Rgb | F::Pvrtc2_4Rgba => {
                let packed = pvrtc::encode_pvrtc2_block(&texels, self.info.has_alpha);
                self.put_unit(linear, &packed);
            }
            F::Etc2EacR11 => self.put_unit(linear, &eac::encode_r11_block(&texels)),
            F::Etc2EacRg11 => self.put_unit(linear, &eac::encode_rg11_block(&texels)),
        }
    }

    fn write_fxt1(&mut self, x: u32, y: u32, texels: Decoded4x4Block) {
        let units_x = self.geometry.num_blocks_x.div_ceil(2);
        let index = (y * units_x + x / 2) as usize;
        if x % 2 == 0 {
            if x + 1 == self.geometry.num_blocks_x {
                self.put_unit(index, &fxt1::encode_fxt1(&texels, &texels));
            } else {
                self.pending_left = Some(texels);
            }
        } else {
            let left = self.pending_left.take().unwrap_or(texels);
            self.put_unit(index, &fxt1::encode_fxt1(&left, &texels));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_transcoder_common::color_8888::Color8888;
    use rstest::rstest;

    fn geometry(nbx: u32, nby: u32) -> LevelGeometry {
        LevelGeometry {
            orig_width: nbx * 4,
            orig_height: nby * 4,
            num_blocks_x: nbx,
            num_blocks_y: nby,
        }
    }

    #[rstest]
    #[case(3, 4)]
    #[case(4, 6)]
    fn pvrtc1_rejects_non_pow2(#[case] nbx: u32, #[case] nby: u32) {
        let mut out = vec![0u8; 1024];
        let result = LevelWriter::new(TranscoderTextureFormat::Pvrtc1_4Rgb, geometry(nbx, nby), &mut out);
        assert!(matches!(result, Err(FormatError::UnsupportedFormat)));
    }

    #[test]
    fn rejects_small_buffer() {
        let mut out = vec![0u8; 15];
        let result = LevelWriter::new(TranscoderTextureFormat::Bc1Rgb, geometry(1, 2), &mut out);
        assert!(matches!(
            result,
            Err(FormatError::OutputBufferTooSmall { needed: 16, actual: 15 })
        ));
    }

    #[test]
    fn writes_block_units_row_major() {
        let g = geometry(2, 2);
        let mut out = vec![0u8; 4 * 8];
        let mut writer = LevelWriter::new(TranscoderTextureFormat::Bc4R, g, &mut out).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                let v = (y * 2 + x) as u8 * 10 + 10;
                writer.write_block(x, y, &Decoded4x4Block::new(Color8888::new(v, 0, 0, 255)));
            }
        }
        assert_eq!([out[0], out[8], out[16], out[24]], [10, 20, 30, 40]);
    }

    #[test]
    fn pvrtc1_uses_morton_order() {
        let g = geometry(2, 2);
        let mut out = vec![0u8; 4 * 8];
        let mut writer = LevelWriter::new(TranscoderTextureFormat::Pvrtc1_4Rgb, g, &mut out).unwrap();
        let white = Decoded4x4Block::new(Color8888::new(255, 255, 255, 255));
        let black = Decoded4x4Block::new(Color8888::new(0, 0, 0, 255));
        writer.write_block(0, 0, &black);
        writer.write_block(1, 0, &white);
        writer.write_block(0, 1, &black);
        writer.write_block(1, 1, &black);
        // Block (1, 0) is unit 2 in Morton order.
        let white_packed = pvrtc::encode_pvrtc1_block(&white, false);
        assert_eq!(out[16..24], white_packed);
    }

    #[test]
    fn fxt1_pairs_blocks_and_pads_odd_column() {
        let g = geometry(3, 1);
        let mut out = vec![0u8; 2 * 16];
        let mut writer = LevelWriter::new(TranscoderTextureFormat::Fxt1Rgb, g, &mut out).unwrap();
        let red = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
        let blue = Decoded4x4Block::new(Color8888::new(0, 0, 255, 255));
        writer.write_block(0, 0, &red);
        writer.write_block(1, 0, &blue);
        writer.write_block(2, 0, &blue);
        assert_eq!(out[..16], fxt1::encode_fxt1(&red, &blue));
        assert_eq!(out[16..], fxt1::encode_fxt1(&blue, &blue));
    }
}
