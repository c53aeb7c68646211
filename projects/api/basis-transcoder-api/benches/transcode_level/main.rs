use basis_transcoder_api::{Codebook, DecodeFlags, Transcoder, TranscoderTextureFormat};
use basis_transcoder_container::test_prelude::{
    ContainerBuilder, Etc1sPayload, SliceSpec, TextureType,
};
use basis_transcoder_etc1s::{test_utils::Etc1sFixture, SliceGrid};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

const SIZE: u16 = 512;

fn uastc_file() -> Vec<u8> {
    ContainerBuilder::uastc(TextureType::Texture2D)
        .slice(SliceSpec::uastc(0, 0, SIZE, SIZE))
        .build()
}

fn etc1s_file() -> Vec<u8> {
    let fixture = Etc1sFixture::new(64, 64, 0);
    let blocks = SIZE as u32 / 4;
    let grid = SliceGrid {
        num_blocks_x: blocks,
        num_blocks_y: blocks,
    };
    // Spread the indices so neighbouring blocks rarely share an endpoint.
    let indices: Vec<(u32, u32)> = (0..grid.total_blocks())
        .map(|i| ((i * 7) % fixture.num_endpoints, (i * 13) % fixture.num_selectors))
        .collect();
    let payload = Etc1sPayload::new(
        fixture.endpoint_palette(),
        fixture.num_endpoints as u16,
        fixture.selector_palette(),
        fixture.num_selectors as u16,
        fixture.tables(),
    );
    ContainerBuilder::etc1s(TextureType::Texture2D, payload)
        .slice(SliceSpec::new(
            0,
            0,
            SIZE,
            SIZE,
            fixture.explicit_slice(grid, &indices),
        ))
        .build()
}

fn bench_file(c: &mut Criterion, name: &str, bytes: &[u8]) {
    let mut group = c.benchmark_group(name);
    let mut transcoder = Transcoder::new(&Codebook::new());
    transcoder.start_transcoding(bytes).unwrap();

    let pixels = SIZE as u64 * SIZE as u64;
    group.throughput(Throughput::Elements(pixels));

    for format in [
        TranscoderTextureFormat::Etc1Rgb,
        TranscoderTextureFormat::Bc1Rgb,
        TranscoderTextureFormat::Bc7Rgba,
        TranscoderTextureFormat::Astc4x4Rgba,
        TranscoderTextureFormat::Rgba32,
    ] {
        let size = transcoder.required_output_size(bytes, 0, 0, format).unwrap();
        let mut output = vec![0u8; size];
        group.bench_with_input(BenchmarkId::new("format", format), &format, |b, &format| {
            b.iter(|| {
                transcoder
                    .transcode_image_level(bytes, 0, 0, &mut output, format, DecodeFlags::empty())
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_file(c, "UASTC Transcode Level", &uastc_file());
    bench_file(c, "ETC1S Transcode Level", &etc1s_file());
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
