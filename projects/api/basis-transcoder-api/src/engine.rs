//! # Transcode Engine
//!
//! Decodes one level of a validated container and hands every block to a
//! [`LevelWriter`] in row-major order.
//!
//! Alpha handling depends on the source and the output format:
//!
//! - source without alpha, format with alpha: alpha is written as 255;
//! - source with alpha, format without alpha: alpha is dropped, unless
//!   [`DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS`] asks for the alpha
//!   channel to be written into the colour channels instead;
//! - source and format with alpha: colour and alpha are both written.
//!
//! ETC1S files keep alpha in a separate slice that follows each colour
//! slice. UASTC blocks carry alpha themselves.

use crate::{codebook::Codebook, error::TranscoderError, flags::DecodeFlags};
use alloc::vec::Vec;
use basis_transcoder_common::{decoded_4x4_block::Decoded4x4Block, etc1::Etc1Block};
use basis_transcoder_container::{
    Container, ContainerError, LevelDescriptor, SourceFormat, TextureType,
};
use basis_transcoder_etc1s::{Etc1sBlock, Etc1sDecoder, Etc1sError, SliceGrid};
use basis_transcoder_formats::{
    LevelGeometry, LevelWriter, SourceBlock, TranscoderTextureFormat,
};
use basis_transcoder_uastc::{UastcBlock, UASTC_BLOCK_SIZE};
use tracing::{trace, warn};

/// Per-session decoder state.
#[derive(Debug, Default)]
pub(crate) struct SessionScratch {
    /// Palettes and tables of an ETC1S file.
    etc1s: Option<Etc1sDecoder>,
    /// Previous video frame block indices, `[colour, alpha][level]`.
    prev_frames: [Vec<Vec<u32>>; 2],
}

impl SessionScratch {
    /// Decodes the shared sections of `container`.
    pub(crate) fn new(container: &Container<'_>, codebook: &Codebook) -> Result<Self, TranscoderError> {
        let etc1s = container
            .etc1s_sections()
            .map(|sections| Etc1sDecoder::new(sections, codebook.table()))
            .transpose()?;
        Ok(Self {
            etc1s,
            prev_frames: Default::default(),
        })
    }
}

/// Returns the previous frame entries of `level_index`, zero filled on first use.
fn prev_frame(frames: &mut Vec<Vec<u32>>, level_index: u32, total_blocks: u32) -> &mut [u32] {
    let level = level_index as usize;
    if frames.len() <= level {
        frames.resize_with(level + 1, Vec::new);
    }
    let entries = &mut frames[level];
    entries.resize(total_blocks as usize, 0);
    entries
}

/// Previous frame entries for video files, `None` otherwise.
fn video_frame<'a>(
    is_video: bool,
    frames: &'a mut Vec<Vec<u32>>,
    level: &LevelDescriptor,
    level_index: u32,
) -> Option<&'a mut [u32]> {
    if is_video {
        Some(prev_frame(frames, level_index, level.total_blocks))
    } else {
        None
    }
}

fn slice_data<'a>(container: &Container<'a>, index: u32) -> Result<&'a [u8], TranscoderError> {
    container
        .slice_data(index)
        .ok_or(ContainerError::SliceOutOfBounds { index }.into())
}

/// An ETC1S colour block with alpha merged in from its alpha slice.
struct Etc1sWithAlpha<'a> {
    color: &'a Etc1sBlock,
    texels: Decoded4x4Block,
}

impl SourceBlock for Etc1sWithAlpha<'_> {
    #[inline]
    fn decode(&self) -> Decoded4x4Block {
        self.texels
    }

    #[inline]
    fn to_etc1(&self) -> Option<Etc1Block> {
        self.color.to_etc1()
    }
}

/// What the engine does with the source alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlphaMode {
    /// Colour only; alpha-bearing formats get 255.
    Opaque,
    /// Colour plus source alpha.
    Keep,
    /// Source alpha written into the colour channels.
    IntoColor,
}

impl AlphaMode {
    fn select(source_has_alpha: bool, format: TranscoderTextureFormat, flags: DecodeFlags) -> Self {
        match (source_has_alpha, format.info().has_alpha) {
            (false, _) => Self::Opaque,
            (true, true) => Self::Keep,
            (true, false) if flags.contains(DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS) => {
                Self::IntoColor
            }
            (true, false) => Self::Opaque,
        }
    }
}

/// Transcodes `(image_index, level_index)` of `container` into `output`.
///
/// Nothing is written if the indices, format or buffer size are rejected.
/// On [`TranscoderError::CorruptData`] the buffer may be partially written.
pub(crate) fn transcode_level(
    container: &Container<'_>,
    scratch: &mut SessionScratch,
    image_index: u32,
    level_index: u32,
    output: &mut [u8],
    format: TranscoderTextureFormat,
    flags: DecodeFlags,
) -> Result<(), TranscoderError> {
    let level = container.level_descriptor(image_index, level_index)?;
    let geometry = LevelGeometry {
        orig_width: level.orig_width,
        orig_height: level.orig_height,
        num_blocks_x: level.num_blocks_x,
        num_blocks_y: level.num_blocks_y,
    };
    let mut writer = LevelWriter::new(format, geometry, output)?;
    let alpha = AlphaMode::select(level.alpha_flag, format, flags);

    trace!(
        image_index,
        level_index,
        %format,
        num_blocks_x = level.num_blocks_x,
        num_blocks_y = level.num_blocks_y,
        ?alpha,
        "transcoding level"
    );

    let result = match container.source_format() {
        SourceFormat::Etc1s => {
            transcode_etc1s(container, scratch, &level, level_index, &mut writer, alpha)
        }
        SourceFormat::Uastc4x4 => transcode_uastc(container, &level, &mut writer, alpha),
    };
    if let Err(error) = &result {
        warn!(image_index, level_index, %error, "failed to transcode level");
    }
    result
}

fn transcode_etc1s(
    container: &Container<'_>,
    scratch: &mut SessionScratch,
    level: &LevelDescriptor,
    level_index: u32,
    writer: &mut LevelWriter<'_>,
    alpha: AlphaMode,
) -> Result<(), TranscoderError> {
    let SessionScratch {
        etc1s,
        prev_frames: [color_frames, alpha_frames],
    } = scratch;
    let decoder = etc1s
        .as_ref()
        .ok_or(Etc1sError::InvalidPalette("session has no ETC1S palettes"))?;

    let grid = SliceGrid {
        num_blocks_x: level.num_blocks_x,
        num_blocks_y: level.num_blocks_y,
    };
    let is_video = container.texture_type() == TextureType::VideoFrames;
    let color_index = level.first_slice_index;
    let alpha_index = container.alpha_slice_index(color_index);

    match (alpha, alpha_index) {
        (AlphaMode::IntoColor, Some(alpha_index)) => {
            let prev = video_frame(is_video, alpha_frames, level, level_index);
            decoder.decode_slice(slice_data(container, alpha_index)?, grid, prev, |x, y, block| {
                writer.write_block(x, y, block)
            })?;
        }
        (AlphaMode::Keep, Some(alpha_index)) => {
            let mut alpha_texels = Vec::with_capacity(level.total_blocks as usize);
            let prev = video_frame(is_video, alpha_frames, level, level_index);
            decoder.decode_slice(slice_data(container, alpha_index)?, grid, prev, |_, _, block| {
                alpha_texels.push(block.decode())
            })?;

            let prev = video_frame(is_video, color_frames, level, level_index);
            decoder.decode_slice(slice_data(container, color_index)?, grid, prev, |x, y, block| {
                let mut texels = block.decode();
                if let Some(alpha) = alpha_texels.get((y * grid.num_blocks_x + x) as usize) {
                    texels.merge_alpha_from(alpha);
                }
                writer.write_block(x, y, &Etc1sWithAlpha { color: block, texels });
            })?;
        }
        _ => {
            let prev = video_frame(is_video, color_frames, level, level_index);
            decoder.decode_slice(slice_data(container, color_index)?, grid, prev, |x, y, block| {
                writer.write_block(x, y, block)
            })?;
        }
    }
    Ok(())
}

fn transcode_uastc(
    container: &Container<'_>,
    level: &LevelDescriptor,
    writer: &mut LevelWriter<'_>,
    alpha: AlphaMode,
) -> Result<(), TranscoderError> {
    let data = slice_data(container, level.first_slice_index)?;
    let num_blocks_x = level.num_blocks_x as usize;

    let blocks = data.chunks_exact(UASTC_BLOCK_SIZE).take(level.total_blocks as usize);
    for (index, chunk) in blocks.enumerate() {
        let mut bytes = [0u8; UASTC_BLOCK_SIZE];
        bytes.copy_from_slice(chunk);
        let block = UastcBlock::new(bytes)?;
        let (x, y) = ((index % num_blocks_x) as u32, (index / num_blocks_x) as u32);
        match alpha {
            AlphaMode::Keep => writer.write_block(x, y, &block),
            AlphaMode::Opaque => {
                let mut texels = block.decode();
                texels.make_opaque();
                writer.write_block(x, y, &texels);
            }
            AlphaMode::IntoColor => {
                let mut texels = block.decode();
                texels.alpha_to_rgb();
                writer.write_block(x, y, &texels);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CorruptDataError, test_prelude::*};
    use basis_transcoder_uastc::UastcError;
    use TranscoderTextureFormat as F;

    fn run(
        bytes: &[u8],
        output: &mut [u8],
        format: TranscoderTextureFormat,
        flags: DecodeFlags,
    ) -> Result<SessionScratch, TranscoderError> {
        let container = Container::parse(bytes)?;
        let mut scratch = SessionScratch::new(&container, &Codebook::new())?;
        transcode_level(&container, &mut scratch, 0, 0, output, format, flags)?;
        Ok(scratch)
    }

    fn etc1s_block(file: &Etc1sFile, (endpoint, selector): (u32, u32)) -> Etc1sBlock {
        let endpoints = file.fixture.endpoints();
        let selectors = file.fixture.selectors();
        Etc1sBlock::new(endpoints[endpoint as usize], selectors[selector as usize])
    }

    fn rgba_pixels(output: &[u8]) -> Vec<[u8; 4]> {
        output.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]]).collect()
    }

    #[rstest]
    #[case(false, F::Rgba32, DecodeFlags::empty(), AlphaMode::Opaque)]
    #[case(false, F::Bc1Rgb, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS, AlphaMode::Opaque)]
    #[case(true, F::Bc3Rgba, DecodeFlags::empty(), AlphaMode::Keep)]
    #[case(true, F::Bc5Rg, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS, AlphaMode::Keep)]
    #[case(true, F::Bc1Rgb, DecodeFlags::empty(), AlphaMode::Opaque)]
    #[case(true, F::Etc1Rgb, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS, AlphaMode::IntoColor)]
    #[case(true, F::Rgb565, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS, AlphaMode::IntoColor)]
    fn selects_alpha_mode(
        #[case] source_has_alpha: bool,
        #[case] format: TranscoderTextureFormat,
        #[case] flags: DecodeFlags,
        #[case] expected: AlphaMode,
    ) {
        assert_eq!(AlphaMode::select(source_has_alpha, format, flags), expected);
    }

    #[test]
    fn prev_frame_grows_per_level() {
        let mut frames = Vec::new();
        prev_frame(&mut frames, 2, 6)[5] = 7;
        assert_eq!(frames.len(), 3);
        assert!(frames[0].is_empty());
        assert_eq!(prev_frame(&mut frames, 2, 6)[5], 7);
        assert_eq!(prev_frame(&mut frames, 0, 4), &[0; 4]);
    }

    #[test]
    fn etc1s_to_etc1_copies_blocks_exactly() {
        let indices = [(1, 2), (3, 0)];
        let file = Etc1sFile::new(TextureType::Texture2D).slice(0, 0, 8, 4, &indices);
        let bytes = file.build();

        let mut output = vec![0u8; 16];
        run(&bytes, &mut output, F::Etc1Rgb, DecodeFlags::empty()).unwrap();

        for (i, &pair) in indices.iter().enumerate() {
            let expected = etc1s_block(&file, pair).to_etc1().unwrap();
            assert_eq!(output[i * 8..i * 8 + 8], expected.bytes);
        }
    }

    #[test]
    fn etc1s_merges_alpha_slice() {
        let file = Etc1sFile::new(TextureType::Texture2D)
            .alpha_slices()
            .slice(0, 0, 4, 4, &[(0, 1)])
            .alpha_slice(0, 0, 4, 4, &[(2, 3)]);
        let bytes = file.build();

        let mut output = vec![0u8; 4 * 4 * 4];
        run(&bytes, &mut output, F::Rgba32, DecodeFlags::empty()).unwrap();

        let mut expected = etc1s_block(&file, (0, 1)).decode();
        expected.merge_alpha_from(&etc1s_block(&file, (2, 3)).decode());
        let pixels = rgba_pixels(&output);
        for (pixel, texel) in pixels.iter().zip(expected.pixels) {
            assert_eq!(*pixel, [texel.r, texel.g, texel.b, texel.a]);
        }
    }

    #[test]
    fn etc1s_alpha_into_opaque_format_uses_alpha_slice() {
        let file = Etc1sFile::new(TextureType::Texture2D)
            .alpha_slices()
            .slice(0, 0, 4, 4, &[(0, 1)])
            .alpha_slice(0, 0, 4, 4, &[(2, 3)]);
        let bytes = file.build();

        let mut with_flag = vec![0u8; 8];
        run(&bytes, &mut with_flag, F::Etc1Rgb, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS)
            .unwrap();
        assert_eq!(with_flag, etc1s_block(&file, (2, 3)).to_etc1().unwrap().bytes);

        let mut without_flag = vec![0u8; 8];
        run(&bytes, &mut without_flag, F::Etc1Rgb, DecodeFlags::empty()).unwrap();
        assert_eq!(without_flag, etc1s_block(&file, (0, 1)).to_etc1().unwrap().bytes);
    }

    #[test]
    fn video_levels_record_previous_frame() {
        let bytes = Etc1sFile::new(TextureType::VideoFrames)
            .slice(0, 0, 8, 4, &[(1, 2), (3, 1)])
            .build();

        let mut output = vec![0u8; 16];
        let scratch = run(&bytes, &mut output, F::Etc1Rgb, DecodeFlags::empty()).unwrap();
        assert_eq!(scratch.prev_frames[0][0], [1 | 2 << 16, 3 | 1 << 16]);
        assert!(scratch.prev_frames[1].is_empty());
    }

    #[test]
    fn still_images_keep_no_previous_frame() {
        let bytes = Etc1sFile::new(TextureType::Texture2D)
            .slice(0, 0, 4, 4, &[(1, 2)])
            .build();
        let mut output = vec![0u8; 8];
        let scratch = run(&bytes, &mut output, F::Etc1Rgb, DecodeFlags::empty()).unwrap();
        assert!(scratch.prev_frames[0].is_empty());
    }

    #[test]
    fn uastc_synthesizes_opaque_alpha() {
        let block = uastc_solid_block([10, 20, 30, 40]);
        let data = block.repeat(2);
        let bytes = ContainerBuilder::uastc(TextureType::Texture2D)
            .slice(SliceSpec::new(0, 0, 8, 4, data))
            .build();

        let mut output = vec![0u8; 8 * 4 * 4];
        run(&bytes, &mut output, F::Rgba32, DecodeFlags::empty()).unwrap();
        assert!(rgba_pixels(&output).iter().all(|&p| p == [10, 20, 30, 255]));
    }

    #[test]
    fn uastc_alpha_into_opaque_format() {
        let data = uastc_solid_block([10, 20, 30, 40]).to_vec();
        let bytes = ContainerBuilder::uastc(TextureType::Texture2D)
            .slice(SliceSpec::new(0, 0, 4, 4, data).flags(SliceFlags::HAS_ALPHA))
            .build();

        let mut output = vec![0u8; 4 * 4 * 2];
        run(&bytes, &mut output, F::Rgb565, DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS)
            .unwrap();
        // Grey 40 in RGB565 is (5, 10, 5).
        let expected = (5u16 << 11 | 10 << 5 | 5).to_le_bytes();
        assert!(output.chunks_exact(2).all(|p| p == expected));
    }

    #[test]
    fn rejects_small_buffer_without_writing() {
        let bytes = uastc_2d(8, 8);
        let mut output = vec![0xAAu8; 4 * 8 - 1];
        let result = run(&bytes, &mut output, F::Bc1Rgb, DecodeFlags::empty());
        assert_eq!(
            result.err(),
            Some(TranscoderError::BufferTooSmall { needed: 32, actual: 31 })
        );
        assert!(output.iter().all(|&b| b == 0xAA));
    }

    #[rstest]
    #[case(12, 4)]
    #[case(8, 12)]
    fn pvrtc1_rejects_non_pow2_levels(#[case] width: u16, #[case] height: u16) {
        let bytes = uastc_2d(width, height);
        let mut output = vec![0u8; 1024];
        let result = run(&bytes, &mut output, F::Pvrtc1_4Rgb, DecodeFlags::empty());
        assert_eq!(result.err(), Some(TranscoderError::UnsupportedFormat));
    }

    #[test]
    fn corrupt_uastc_block_is_reported() {
        let mut data = uastc_solid_block([1, 2, 3, 4]).to_vec();
        data.extend_from_slice(&[69, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let bytes = ContainerBuilder::uastc(TextureType::Texture2D)
            .slice(SliceSpec::new(0, 0, 8, 4, data))
            .build();

        let mut output = vec![0u8; 16];
        let result = run(&bytes, &mut output, F::Bc1Rgb, DecodeFlags::empty());
        assert_eq!(
            result.err(),
            Some(TranscoderError::CorruptData(CorruptDataError::Uastc(
                UastcError::InvalidMode(69)
            )))
        );
    }
}
