#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod logging;
mod util;
use argh::FromArgs;
use core::error::Error;

#[derive(FromArgs, Debug)]
/// Inspect and transcode Basis Universal .basis files
struct TopLevel {
    /// log at debug level unless RUST_LOG says otherwise
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Info(commands::info::InfoCmd),
    Transcode(commands::transcode::TranscodeCmd),
    Frames(commands::frames::FramesCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Info(cmd) => {
            commands::info::handle_info_command(cmd)?;
        }
        Commands::Transcode(cmd) => {
            commands::transcode::handle_transcode_command(cmd)?;
        }
        Commands::Frames(cmd) => {
            commands::frames::handle_frames_command(cmd)?;
        }
    }

    Ok(())
}
