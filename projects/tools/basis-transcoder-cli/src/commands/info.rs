use crate::error::CliError;
use crate::util::with_mapped_input;
use argh::FromArgs;
use basis_transcoder_api::{Codebook, FileInfo, Transcoder};
use bytesize::ByteSize;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Print the header, images and mip levels of a .basis file
#[argh(subcommand, name = "info")]
pub struct InfoCmd {
    /// input .basis file
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_info_command(cmd: InfoCmd) -> Result<(), CliError> {
    let transcoder = Transcoder::new(&Codebook::new());
    with_mapped_input(&cmd.input, |bytes| {
        let info = transcoder.file_info(bytes)?;
        print_file_info(&cmd.input, bytes.len(), &info);

        println!();
        println!("image level   orig size    padded     blocks  alpha iframe");
        for image in 0..info.total_images {
            for level in 0..transcoder.total_image_levels(bytes, image)? {
                let l = transcoder.image_level_info(bytes, image, level)?;
                println!(
                    "{image:>5} {level:>5} {:>5}x{:<5} {:>5}x{:<5} {:>6}  {:<5} {}",
                    l.orig_width,
                    l.orig_height,
                    l.width,
                    l.height,
                    l.total_blocks,
                    l.alpha_flag,
                    l.iframe_flag,
                );
            }
        }
        Ok(())
    })
}

fn print_file_info(path: &std::path::Path, len: usize, info: &FileInfo) {
    println!("File: {} ({})", path.display(), ByteSize(len as u64));
    println!("Version: 0x{:X}", info.version);
    println!("Source format: {:?}", info.source_format);
    println!("Texture type: {:?}", info.texture_type);
    println!("Images: {}", info.total_images);
    println!("Slices: {}", info.total_slices);
    println!("Alpha slices: {}", info.has_alpha_slices);
    println!("Y flipped: {}", info.y_flipped);
    println!("sRGB: {}", info.srgb);
    if info.us_per_frame != 0 {
        println!("Frame time: {} us", info.us_per_frame);
    }
    println!(
        "Endpoints: {} ({})",
        info.total_endpoints,
        ByteSize(info.endpoint_codebook_size as u64)
    );
    println!(
        "Selectors: {} ({})",
        info.total_selectors,
        ByteSize(info.selector_codebook_size as u64)
    );
    println!("Tables: {}", ByteSize(info.tables_size as u64));
    println!("Slice data: {}", ByteSize(info.slices_size));
    println!("User data: 0x{:08X} 0x{:08X}", info.userdata0, info.userdata1);
}
