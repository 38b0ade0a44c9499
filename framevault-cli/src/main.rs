use anyhow::Result;
use clap::{error::ErrorKind, Parser, Subcommand};
use framevault_cli::commands::{
    self,
    decode::DecodeOptions,
    encode::EncodeOptions,
};
use framevault_core::constants::{
    DEFAULT_DECODE_WORK_DIR, DEFAULT_ENCODE_WORK_DIR, DEFAULT_FRAMERATE, DEFAULT_FRAME_HEIGHT,
    DEFAULT_FRAME_WIDTH,
};
use framevault_core::types::FrameDimensions;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "framevault")]
#[command(about = "Framevault - Store any file as a lossless grayscale video", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file into a lossless video
    Encode {
        /// The input file to encode into video
        input_file: PathBuf,

        /// Directory where the video is saved
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Keep the intermediate frame images
        #[arg(long)]
        save_artifacts: bool,

        /// Directory for intermediate frame images (cleared before use)
        #[arg(long, default_value = DEFAULT_ENCODE_WORK_DIR)]
        work_dir: PathBuf,

        /// Frame width in pixels
        #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
        height: u32,

        /// Frame rate of the video
        #[arg(long, default_value_t = DEFAULT_FRAMERATE)]
        framerate: u32,

        /// Also write a JSON metadata sidecar mapping file name to size
        #[arg(long)]
        meta: Option<PathBuf>,
    },

    /// Recover the original file from a video
    Decode {
        /// The video file to decode
        video_file: PathBuf,

        /// The original file size in bytes
        #[arg(long)]
        file_size: Option<u64>,

        /// The original file format (e.g. zip, pdf)
        #[arg(long)]
        file_format: Option<String>,

        /// Keep the extracted frame images
        #[arg(long)]
        save_artifacts: bool,

        /// Directory where the recovered file is saved
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Directory for extracted frame images (cleared before use)
        #[arg(long, default_value = DEFAULT_DECODE_WORK_DIR)]
        work_dir: PathBuf,

        /// Frame width in pixels
        #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = DEFAULT_FRAME_HEIGHT)]
        height: u32,
    },
}

fn main() -> Result<()> {
    // Usage errors exit with 1 like every other fatal error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Encode {
            input_file,
            output_dir,
            save_artifacts,
            work_dir,
            width,
            height,
            framerate,
            meta,
        } => {
            let opts = EncodeOptions {
                input: input_file,
                output_dir,
                work_dir,
                dimensions: FrameDimensions::new(width, height),
                save_artifacts,
                meta,
            };
            commands::encode::execute(&opts, framerate).map(|_| ())
        }

        Commands::Decode {
            video_file,
            file_size,
            file_format,
            save_artifacts,
            output_dir,
            work_dir,
            width,
            height,
        } => {
            let opts = DecodeOptions {
                video: video_file,
                output_dir,
                work_dir,
                dimensions: FrameDimensions::new(width, height),
                file_size,
                file_format,
                save_artifacts,
            };
            commands::decode::execute(&opts).map(|_| ())
        }
    }
}
