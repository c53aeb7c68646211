use crate::error::CliError;
use crate::util::{parse_format, with_mapped_input, with_mapped_output, write_png};
use argh::FromArgs;
use basis_transcoder_api::{Codebook, DecodeFlags, Transcoder, TranscoderTextureFormat};
use std::{path::PathBuf, time::Instant};
use tracing::info;

#[derive(FromArgs, Debug)]
/// Transcode one mip level to a GPU format, or to PNG for rgba32
#[argh(subcommand, name = "transcode")]
pub struct TranscodeCmd {
    /// input .basis file
    #[argh(option)]
    pub input: PathBuf,

    /// output file
    #[argh(option)]
    pub output: PathBuf,

    /// image index [default: 0]
    #[argh(option, default = "0")]
    pub image: u32,

    /// mip level index [default: 0]
    #[argh(option, default = "0")]
    pub level: u32,

    /// output format, e.g. bc1, bc7, astc, rgba32 [default: rgba32]
    #[argh(
        option,
        from_str_fn(parse_format),
        default = "TranscoderTextureFormat::Rgba32"
    )]
    pub format: TranscoderTextureFormat,

    /// write a source alpha channel as colour when the format has no alpha
    #[argh(switch)]
    pub alpha_to_opaque: bool,
}

pub fn handle_transcode_command(cmd: TranscodeCmd) -> Result<(), CliError> {
    let flags = if cmd.alpha_to_opaque {
        DecodeFlags::TRANSCODE_ALPHA_TO_OPAQUE_FORMATS
    } else {
        DecodeFlags::empty()
    };

    let mut transcoder = Transcoder::new(&Codebook::new());
    with_mapped_input(&cmd.input, |bytes| {
        let start = Instant::now();
        let mut session = transcoder.begin(bytes)?;
        let level = session.image_level_info(cmd.image, cmd.level)?;

        if cmd.format == TranscoderTextureFormat::Rgba32 {
            let pixels = session.transcode_with_flags(cmd.image, cmd.level, cmd.format, flags)?;
            write_png(&cmd.output, pixels, level.orig_width, level.orig_height)?;
        } else {
            let size = session.required_output_size(cmd.image, cmd.level, cmd.format)?;
            with_mapped_output(&cmd.output, size, |output| {
                Ok(session.transcode_into(cmd.image, cmd.level, output, cmd.format, flags)?)
            })?;
        }

        info!(
            image = cmd.image,
            level = cmd.level,
            format = %cmd.format,
            width = level.orig_width,
            height = level.orig_height,
            elapsed = ?start.elapsed(),
            "wrote {}",
            cmd.output.display()
        );
        Ok(())
    })
}
