use anyhow::{Context, Result};
use colored::*;
use framevault_core::{
    ffmpeg::FfmpegTransport,
    pipeline::{EncodeReport, Pipeline, PipelineConfig},
    png::PngPersistence,
    transport::VideoTransport,
    types::{ContainerDescriptor, FrameDimensions},
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options of the `encode` command
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub work_dir: PathBuf,
    pub dimensions: FrameDimensions,
    pub save_artifacts: bool,
    pub meta: Option<PathBuf>,
}

pub fn execute(opts: &EncodeOptions, framerate: u32) -> Result<EncodeReport> {
    execute_with(opts, FfmpegTransport::new().with_framerate(framerate))
}

pub fn execute_with<T: VideoTransport>(opts: &EncodeOptions, transport: T) -> Result<EncodeReport> {
    info!("Encoding {} into {}", opts.input.display(), opts.output_dir.display());

    let config = PipelineConfig::default()
        .with_dimensions(opts.dimensions)
        .with_encode_work_dir(&opts.work_dir)
        .with_keep_artifacts(opts.save_artifacts);

    let pipeline = Pipeline::new(config, PngPersistence, transport);
    let report = pipeline
        .encode_file(&opts.input, &opts.output_dir)
        .with_context(|| format!("Failed to encode {}", opts.input.display()))?;

    if let Some(meta) = &opts.meta {
        write_sidecar(meta, &report.descriptor)?;
        info!("Metadata saved to {}", meta.display());
    }

    println!(
        "{} {} -> {} ({} frames)",
        "✓".green(),
        opts.input.display(),
        report.container.display(),
        report.frame_count
    );
    if opts.save_artifacts {
        println!("Frames kept in {}", opts.work_dir.display());
    }

    Ok(report)
}

/// Write the `{"<base>.<ext>": <length>}` sidecar record
pub fn write_sidecar(path: &Path, descriptor: &ContainerDescriptor) -> Result<()> {
    let json = serde_json::to_string(descriptor).with_context(|| "Failed to serialize metadata")?;
    fs::write(path, json).with_context(|| format!("Failed to write metadata file: {}", path.display()))?;

    Ok(())
}
