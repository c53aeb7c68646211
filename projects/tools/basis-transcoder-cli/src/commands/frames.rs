use crate::error::CliError;
use crate::util::{canonicalize_cli_dir, with_mapped_input, write_png};
use argh::FromArgs;
use basis_transcoder_api::{Codebook, TextureType, Transcoder, TranscoderTextureFormat};
use std::{path::PathBuf, time::Duration, time::Instant};
use tracing::{debug, info};

#[derive(FromArgs, Debug)]
/// Decode every image of a file, in order, to numbered PNG files
#[argh(subcommand, name = "frames")]
pub struct FramesCmd {
    /// input .basis file
    #[argh(option)]
    pub input: PathBuf,

    /// output directory, created if missing
    #[argh(option, from_str_fn(canonicalize_cli_dir))]
    pub output_dir: PathBuf,
}

pub fn handle_frames_command(cmd: FramesCmd) -> Result<(), CliError> {
    let mut transcoder = Transcoder::new(&Codebook::new());
    with_mapped_input(&cmd.input, |bytes| {
        let start = Instant::now();
        let mut session = transcoder.begin(bytes)?;
        let file_info = session.file_info();
        let total = session.total_images();

        // Video frames are predicted from the previous frame, so images are decoded in order.
        for image in 0..total {
            let level = session.image_level_info(image, 0)?;
            let pixels = session.transcode(image, 0, TranscoderTextureFormat::Rgba32)?;
            let path = cmd.output_dir.join(frame_file_name(image, total));
            write_png(&path, pixels, level.orig_width, level.orig_height)?;
            debug!(image, iframe = level.iframe_flag, "wrote {}", path.display());
        }

        let elapsed = start.elapsed();
        info!(frames = total, elapsed = ?elapsed, "decoded all images");
        if file_info.texture_type == TextureType::VideoFrames && file_info.us_per_frame != 0 {
            let playback = Duration::from_micros(file_info.us_per_frame as u64 * total as u64);
            let fps = 1_000_000.0 / file_info.us_per_frame as f64;
            info!(
                us_per_frame = file_info.us_per_frame,
                fps,
                playback = ?playback,
                realtime = elapsed <= playback,
                "video pacing"
            );
        }
        Ok(())
    })
}

/// Zero padded so the files sort in frame order.
fn frame_file_name(image: u32, total: u32) -> String {
    let digits = total.max(1).ilog10() as usize + 1;
    format!("frame_{image:0digits$}.png")
}
