use anyhow::Result;
use colored::*;
use framevault_core::{
    ffmpeg::FfmpegTransport,
    pipeline::{DecodeReport, DescriptorOverride, Pipeline, PipelineConfig},
    png::PngPersistence,
    transport::VideoTransport,
    types::FrameDimensions,
    CodecError,
};
use std::path::PathBuf;
use tracing::info;

/// Options of the `decode` command
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub video: PathBuf,
    pub output_dir: PathBuf,
    pub work_dir: PathBuf,
    pub dimensions: FrameDimensions,
    pub file_size: Option<u64>,
    pub file_format: Option<String>,
    pub save_artifacts: bool,
}

pub fn execute(opts: &DecodeOptions) -> Result<DecodeReport> {
    execute_with(opts, FfmpegTransport::new())
}

pub fn execute_with<T: VideoTransport>(opts: &DecodeOptions, transport: T) -> Result<DecodeReport> {
    info!("Decoding {}", opts.video.display());

    let overrides = DescriptorOverride {
        file_size: opts.file_size,
        file_format: opts.file_format.clone(),
    };
    if overrides.file_size.is_some() && overrides.file_format.is_some() {
        info!("Using provided size and format");
    }

    let config = PipelineConfig::default()
        .with_dimensions(opts.dimensions)
        .with_decode_work_dir(&opts.work_dir)
        .with_keep_artifacts(opts.save_artifacts);

    let pipeline = Pipeline::new(config, PngPersistence, transport);
    let report = match pipeline.decode_file(&opts.video, &overrides, &opts.output_dir) {
        Ok(report) => report,
        Err(
            e @ (CodecError::MalformedContainerName(_)
            | CodecError::MalformedSizeToken { .. }
            | CodecError::UnexpectedContainerExtension { .. }),
        ) => {
            return Err(anyhow::Error::new(e).context(format!(
                "Cannot infer size and format of {}; pass --file-size and --file-format or rename it to '<name>-<extension>-<size>.mkv'",
                opts.video.display()
            )))
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to decode {}", opts.video.display())))
        }
    };

    println!(
        "{} {} -> {} ({} bytes)",
        "✓".green(),
        opts.video.display(),
        report.output.display(),
        report.descriptor.original_length
    );

    Ok(report)
}
