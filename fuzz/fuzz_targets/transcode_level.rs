#![no_main]

// Transcoding arbitrary input to any format must return an error rather than panic,
// and must never write past the required size.

use basis_transcoder_api::{
    Codebook, DecodeFlags, ParseOptions, Transcoder, TranscoderTextureFormat,
};
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct TranscodeInput {
    pub image_index: u8,
    pub level_index: u8,
    pub format: u8,
    pub flags: u8,
    pub data: Vec<u8>,
}

fuzz_target!(|input: TranscodeInput| {
    let Ok(format) = TranscoderTextureFormat::try_from(input.format as u32 % 22) else {
        return;
    };
    let image = input.image_index as u32 % 4;
    let level = input.level_index as u32 % 4;
    let flags = DecodeFlags::from_bits_truncate(input.flags as u32);

    // Fuzzed files rarely carry valid CRCs.
    let mut transcoder = Transcoder::new(&Codebook::new())
        .with_parse_options(ParseOptions { skip_crc: true });
    if transcoder.start_transcoding(&input.data).is_err() {
        return;
    }
    let Ok(size) = transcoder.required_output_size(&input.data, image, level, format) else {
        return;
    };
    if size > 1 << 24 {
        return;
    }

    const GUARD: u8 = 0xCD;
    let mut output = vec![GUARD; size + 16];
    let _ = transcoder.transcode_image_level(
        &input.data,
        image,
        level,
        &mut output[..size],
        format,
        flags,
    );
    assert!(output[size..].iter().all(|&b| b == GUARD));
});
