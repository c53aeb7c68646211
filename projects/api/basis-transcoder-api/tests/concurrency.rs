//! Transcoders on different threads sharing one codebook.

mod common;

use basis_transcoder_api::{Codebook, Transcoder, TranscoderTextureFormat};
use common::*;
use std::thread;

fn transcode_all(codebook: &Codebook, bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut transcoder = Transcoder::new(codebook);
    let mut session = transcoder.begin(bytes).unwrap();
    TranscoderTextureFormat::all_values()
        .iter()
        .map(|&format| session.transcode(0, 0, format).unwrap())
        .collect()
}

#[test]
fn shared_codebook_gives_identical_output() {
    let codebook = Codebook::new();
    let files = [etc1s_2d(16, 16), uastc_mipmapped(TextureType::Texture2D, 16, 16, 1)];
    let sequential: Vec<_> = files.iter().map(|f| transcode_all(&codebook, f)).collect();

    let threaded: Vec<_> = thread::scope(|scope| {
        let codebook = &codebook;
        let mut handles = Vec::new();
        for file in &files {
            for _ in 0..2 {
                handles.push(scope.spawn(move || transcode_all(codebook, file)));
            }
        }
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (index, output) in threaded.iter().enumerate() {
        assert_eq!(output, &sequential[index / 2]);
    }
}

#[test]
fn transcoder_moves_between_threads() {
    let bytes = uastc_mipmapped(TextureType::Texture2D, 8, 8, 1);
    let mut transcoder = Transcoder::new(&Codebook::new());
    transcoder.start_transcoding(&bytes).unwrap();

    let transcoder = thread::spawn(move || {
        let mut output = vec![0u8; 8 * 8 * 4];
        transcoder
            .transcode_image_level(
                &bytes,
                0,
                0,
                &mut output,
                TranscoderTextureFormat::Rgba32,
                Default::default(),
            )
            .unwrap();
        assert_eq!(output[..4], slice_color(0, 0));
        transcoder
    })
    .join()
    .unwrap();
    assert_eq!(transcoder.codebook().handle_count(), 1);
}
