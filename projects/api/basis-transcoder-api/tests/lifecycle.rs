//! Metadata queries and the transcoding lifecycle through the public API.

mod common;

use basis_transcoder_api::{
    Codebook, DecodeFlags, IndexError, Transcoder, TranscoderError, TranscoderState,
    TranscoderTextureFormat,
};
use common::*;
use rstest::rstest;

fn transcoder() -> Transcoder {
    Transcoder::new(&Codebook::new())
}

#[rstest]
#[case(TextureType::Texture2D, 1)]
#[case(TextureType::Texture2DArray, 3)]
#[case(TextureType::CubemapArray, 6)]
#[case(TextureType::Volume, 4)]
fn level_counts_agree(#[case] tex_type: TextureType, #[case] images: u32) {
    let bytes = uastc_images(tex_type, images, 16, 8, 3);
    let t = transcoder();
    assert_eq!(t.texture_type(&bytes).unwrap(), tex_type);
    assert_eq!(t.total_images(&bytes).unwrap(), images);
    for image in 0..images {
        let levels = t.total_image_levels(&bytes, image).unwrap();
        assert_eq!(levels, 3);
        assert_eq!(levels, t.image_info(&bytes, image).unwrap().total_levels);
    }
}

#[test]
fn block_counts_and_output_sizes() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 20, 12, 3);
    let t = transcoder();
    for level in 0..3 {
        let info = t.image_level_info(&bytes, 0, level).unwrap();
        assert_eq!(info.total_blocks, info.num_blocks_x * info.num_blocks_y);
        assert_eq!(info.num_blocks_x, info.orig_width.div_ceil(4));
        assert_eq!(info.width, info.num_blocks_x * 4);

        for &format in TranscoderTextureFormat::all_values() {
            let format_info = format.info();
            let size = t.required_output_size(&bytes, 0, level, format).unwrap();
            if format_info.is_raster {
                let pixels = (info.orig_width * info.orig_height) as usize;
                assert_eq!(size, pixels * format_info.bytes_per_unit as usize, "{format}");
            } else if format_info.block_width == 4 {
                let blocks = info.total_blocks as usize;
                assert_eq!(size, blocks * format_info.bytes_per_unit as usize, "{format}");
            }
        }
    }
}

#[test]
fn level_info_is_idempotent() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 32, 32, 4);
    let t = transcoder();
    let first = t.image_level_info(&bytes, 0, 2).unwrap();
    assert_eq!(t.image_level_info(&bytes, 0, 2).unwrap(), first);
    assert_eq!(first.orig_width, 8);
}

#[test]
fn cubemap_faces_share_dimensions() {
    let bytes = uastc_images(TextureType::CubemapArray, 6, 16, 16, 1);
    let t = transcoder();
    let face0 = t.image_info(&bytes, 0).unwrap();
    let face5 = t.image_info(&bytes, 5).unwrap();
    assert_eq!(
        (face5.orig_width, face5.orig_height, face5.total_levels),
        (face0.orig_width, face0.orig_height, face0.total_levels)
    );
}

#[test]
fn image_index_past_end_is_index_error() {
    let bytes = uastc_images(TextureType::Texture2DArray, 2, 8, 8, 1);
    let t = transcoder();
    assert_eq!(
        t.image_info(&bytes, 2),
        Err(TranscoderError::IndexError(IndexError::ImageIndex { index: 2, total: 2 }))
    );
    assert!(matches!(
        t.image_level_info(&bytes, 0, 1),
        Err(TranscoderError::IndexError(IndexError::LevelIndex { .. }))
    ));
}

#[test]
fn empty_input_is_invalid_container() {
    let mut t = transcoder();
    assert!(matches!(
        t.start_transcoding(&[]),
        Err(TranscoderError::InvalidContainer(_))
    ));
    assert_eq!(t.state(), TranscoderState::Created);
}

#[test]
fn transcode_outside_session_is_invalid_state() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 8, 8, 1);
    let mut t = transcoder();
    let mut output = vec![0u8; 64];
    let format = TranscoderTextureFormat::Bc1Rgb;

    let before = t.transcode_image_level(&bytes, 0, 0, &mut output, format, DecodeFlags::empty());
    assert!(matches!(before, Err(TranscoderError::InvalidState { .. })));

    t.start_transcoding(&bytes).unwrap();
    t.transcode_image_level(&bytes, 0, 0, &mut output, format, DecodeFlags::empty())
        .unwrap();
    t.stop_transcoding().unwrap();

    let after = t.transcode_image_level(&bytes, 0, 0, &mut output, format, DecodeFlags::empty());
    assert!(matches!(
        after,
        Err(TranscoderError::InvalidState { state: TranscoderState::Stopped, .. })
    ));

    // Restarting from stopped is allowed.
    t.start_transcoding(&bytes).unwrap();
    assert_eq!(t.state(), TranscoderState::Started);
}

#[rstest]
#[case(TranscoderTextureFormat::Bc7Rgba)]
#[case(TranscoderTextureFormat::Rgba32)]
#[case(TranscoderTextureFormat::Fxt1Rgb)]
fn buffer_size_boundary(#[case] format: TranscoderTextureFormat) {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 12, 8, 1);
    let mut t = transcoder();
    t.start_transcoding(&bytes).unwrap();
    let needed = t.required_output_size(&bytes, 0, 0, format).unwrap();

    let mut short = vec![0x5Au8; needed - 1];
    let result = t.transcode_image_level(&bytes, 0, 0, &mut short, format, DecodeFlags::empty());
    assert_eq!(
        result,
        Err(TranscoderError::BufferTooSmall {
            needed,
            actual: needed - 1
        })
    );
    assert!(short.iter().all(|&b| b == 0x5A));

    let mut exact = vec![0u8; needed];
    t.transcode_image_level(&bytes, 0, 0, &mut exact, format, DecodeFlags::empty())
        .unwrap();
    assert_eq!(t.state(), TranscoderState::Started);
}

#[test]
fn every_format_transcodes_uastc() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 16, 16, 2);
    let mut t = transcoder();
    let mut session = t.begin(&bytes).unwrap();
    for &format in TranscoderTextureFormat::all_values() {
        for level in 0..2 {
            let output = session.transcode(0, level, format).unwrap();
            assert_eq!(output.len(), session.required_output_size(0, level, format).unwrap());
        }
    }
}

#[test]
fn every_format_transcodes_etc1s() {
    let bytes = etc1s_2d(16, 16);
    let mut t = transcoder();
    let mut session = t.begin(&bytes).unwrap();
    for &format in TranscoderTextureFormat::all_values() {
        let output = session.transcode(0, 0, format).unwrap();
        assert_eq!(output.len(), session.required_output_size(0, 0, format).unwrap(), "{format}");
    }
}

#[test]
fn corrupt_level_leaves_session_usable() {
    // Mode 69 is reserved.
    let mut corrupt = vec![0u8; 16];
    corrupt[0] = 69;
    let bytes = ContainerBuilder::uastc(TextureType::Texture2DArray)
        .slice(SliceSpec::uastc(0, 0, 8, 8))
        .slice(SliceSpec::new(1, 0, 4, 4, corrupt))
        .build();
    let format = TranscoderTextureFormat::Rgba32;
    let mut t = transcoder();
    t.start_transcoding(&bytes).unwrap();

    let mut output = vec![0u8; t.required_output_size(&bytes, 1, 0, format).unwrap()];
    let result = t.transcode_image_level(&bytes, 1, 0, &mut output, format, DecodeFlags::empty());
    assert!(matches!(result, Err(TranscoderError::CorruptData(_))));
    assert_eq!(t.state(), TranscoderState::Started);

    let mut output = vec![0u8; t.required_output_size(&bytes, 0, 0, format).unwrap()];
    t.transcode_image_level(&bytes, 0, 0, &mut output, format, DecodeFlags::empty())
        .unwrap();
    assert!(output.chunks_exact(4).all(|p| p == slice_color(0, 0)));
    assert_eq!(t.state(), TranscoderState::Started);
}

#[test]
fn solid_uastc_decodes_to_slice_colour() {
    let bytes = uastc_images(TextureType::Texture2DArray, 2, 8, 4, 1);
    let mut t = transcoder();
    let mut session = t.begin(&bytes).unwrap();
    let rgba = session.transcode(1, 0, TranscoderTextureFormat::Rgba32).unwrap();
    assert!(rgba.chunks_exact(4).all(|p| p == slice_color(1, 0)));
}

#[test]
fn file_info_reports_source_and_layout() {
    let bytes = ContainerBuilder::uastc(TextureType::VideoFrames)
        .us_per_frame(33_333)
        .userdata(7, 9)
        .slice(SliceSpec::uastc(0, 0, 8, 8))
        .slice(SliceSpec::uastc(1, 0, 8, 8))
        .build();
    let info = transcoder().file_info(&bytes).unwrap();
    assert_eq!(info.texture_type, TextureType::VideoFrames);
    assert_eq!(info.us_per_frame, 33_333);
    assert_eq!((info.userdata0, info.userdata1), (7, 9));
    assert_eq!(info.total_images, 2);
    assert_eq!(info.image_mipmap_levels, vec![1, 1]);
}
