//! End-to-end encode/decode orchestration
//!
//! The pipeline resolves the descriptor, drives the frame encoder/decoder
//! and hands frame images to the persistence and transport seams. Frame
//! images live in a [`WorkDir`] that is purged afterwards unless artifacts
//! are kept.

use crate::constants::{DEFAULT_CONTAINER_EXTENSION, DEFAULT_DECODE_WORK_DIR, DEFAULT_ENCODE_WORK_DIR};
use crate::decoder::decode_frames;
use crate::encoder::FrameEncoder;
use crate::error::CodecError;
use crate::name::{decode_name, encode_name};
use crate::transport::{FramePersistence, VideoTransport};
use crate::types::{ContainerDescriptor, FrameDimensions, FrameGrid};
use crate::workdir::WorkDir;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::{info, warn};

/// Settings shared by encode and decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Frame dimensions agreed by both sides
    pub dimensions: FrameDimensions,

    /// Extension of container files, without the dot
    pub container_extension: String,

    /// Directory for frame images written while encoding
    pub encode_work_dir: PathBuf,

    /// Directory for frame images extracted while decoding
    pub decode_work_dir: PathBuf,

    /// Keep the frame images after the operation
    pub keep_artifacts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dimensions: FrameDimensions::default(),
            container_extension: DEFAULT_CONTAINER_EXTENSION.to_string(),
            encode_work_dir: PathBuf::from(DEFAULT_ENCODE_WORK_DIR),
            decode_work_dir: PathBuf::from(DEFAULT_DECODE_WORK_DIR),
            keep_artifacts: false,
        }
    }
}

impl PipelineConfig {
    /// Set the frame dimensions
    pub fn with_dimensions(mut self, dimensions: FrameDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Set the container extension
    pub fn with_container_extension(mut self, extension: impl Into<String>) -> Self {
        self.container_extension = extension.into();
        self
    }

    /// Use one working directory for both encode and decode
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        self.decode_work_dir = work_dir.clone();
        self.encode_work_dir = work_dir;
        self
    }

    /// Set the working directory used while encoding
    pub fn with_encode_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.encode_work_dir = work_dir.into();
        self
    }

    /// Set the working directory used while decoding
    pub fn with_decode_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.decode_work_dir = work_dir.into();
        self
    }

    /// Keep or purge frame images after the operation
    pub fn with_keep_artifacts(mut self, keep: bool) -> Self {
        self.keep_artifacts = keep;
        self
    }
}

/// Explicit size and format supplied by the caller
///
/// When both are present the container name is not parsed at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorOverride {
    /// Original byte length
    pub file_size: Option<u64>,

    /// Original extension, without the dot
    pub file_format: Option<String>,
}

impl DescriptorOverride {
    /// Override with both size and format
    pub fn new(file_size: u64, file_format: impl Into<String>) -> Self {
        Self {
            file_size: Some(file_size),
            file_format: Some(file_format.into()),
        }
    }
}

/// Determine the descriptor of a container
///
/// The override is used only when both fields are given. Otherwise the
/// container's file name is parsed; a half-specified override is ignored.
pub fn resolve_descriptor(
    container: &Path,
    overrides: &DescriptorOverride,
    container_extension: &str,
) -> Result<ContainerDescriptor> {
    match (overrides.file_size, overrides.file_format.as_deref()) {
        (Some(size), Some(format)) => return Ok(ContainerDescriptor::explicit(format, size)),
        (None, None) => {}
        _ => {
            #[cfg(feature = "logging")]
            warn!("Ignoring partial override: file size and file format must be given together, inferring both from the file name");
        }
    }

    let name = container
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CodecError::MalformedContainerName(container.display().to_string()))?;
    decode_name(name, container_extension)
}

/// Outcome of a successful encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeReport {
    /// Descriptor embedded in the container name
    pub descriptor: ContainerDescriptor,

    /// Path of the container written
    pub container: PathBuf,

    /// Number of frames muxed
    pub frame_count: usize,

    /// Filler bytes in the last frame
    pub pad_length: usize,
}

/// Outcome of a successful decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Descriptor the payload was trimmed with
    pub descriptor: ContainerDescriptor,

    /// Path of the recovered file
    pub output: PathBuf,

    /// Number of frames read from the container
    pub frame_count: usize,
}

/// Encoder/decoder wired to a frame persistence and a video transport
#[derive(Debug)]
pub struct Pipeline<P, T> {
    config: PipelineConfig,
    persistence: P,
    transport: T,
}

impl<P: FramePersistence, T: VideoTransport> Pipeline<P, T> {
    /// Create a new pipeline
    pub fn new(config: PipelineConfig, persistence: P, transport: T) -> Self {
        Self {
            config,
            persistence,
            transport,
        }
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The video transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Encode `input` into a container inside `output_dir`
    ///
    /// The container is named `<base>-<ext>-<length>.<container_ext>`.
    /// `output_dir` is created if missing.
    pub fn encode_file(&self, input: &Path, output_dir: &Path) -> Result<EncodeReport> {
        let payload = fs::read(input).map_err(|e| io_error(input, e))?;
        let descriptor = ContainerDescriptor::from_path(input, payload.len() as u64)?;

        if !descriptor.is_name_safe() {
            #[cfg(feature = "logging")]
            warn!(
                "Extension {:?} contains '-'; the container name will not decode, supply size and format explicitly",
                descriptor.extension
            );
        }

        let frames = FrameEncoder::new(self.config.dimensions).frames(&payload)?;
        let padding = frames.padding();
        let frames: Vec<FrameGrid> = frames.collect();

        let work = WorkDir::acquire(&self.config.encode_work_dir, self.config.keep_artifacts)?;
        self.persistence.write_frames(work.path(), &frames)?;

        #[cfg(feature = "logging")]
        info!(
            "Frames saved to {} ({} frames of {})",
            work.path().display(),
            frames.len(),
            self.config.dimensions
        );

        fs::create_dir_all(output_dir).map_err(|e| io_error(output_dir, e))?;
        let container = output_dir.join(encode_name(&descriptor, &self.config.container_extension));
        self.transport.mux(work.path(), frames.len(), &container)?;

        #[cfg(feature = "logging")]
        info!(
            "Encoded {} ({} bytes) into {}",
            input.display(),
            descriptor.original_length,
            container.display()
        );

        Ok(EncodeReport {
            descriptor,
            container,
            frame_count: frames.len(),
            pad_length: padding.pad_length,
        })
    }

    /// Decode `container` into `output_dir/recovered_<base>.<ext>`
    pub fn decode_file(
        &self,
        container: &Path,
        overrides: &DescriptorOverride,
        output_dir: &Path,
    ) -> Result<DecodeReport> {
        let descriptor = resolve_descriptor(container, overrides, &self.config.container_extension)?;

        #[cfg(feature = "logging")]
        info!(
            "Original file: {}, size: {} bytes",
            descriptor.recovered_file_name(),
            descriptor.original_length
        );

        if !container.is_file() {
            return Err(CodecError::Io(format!(
                "{}: container file not found",
                container.display()
            )));
        }

        let work = WorkDir::acquire(&self.config.decode_work_dir, self.config.keep_artifacts)?;
        self.transport.demux(container, work.path())?;

        let frames = self.persistence.read_frames(work.path(), self.config.dimensions)?;
        let payload = decode_frames(&frames, descriptor.original_length, self.config.dimensions)?;

        fs::create_dir_all(output_dir).map_err(|e| io_error(output_dir, e))?;
        let output = output_dir.join(descriptor.recovered_file_name());
        fs::write(&output, &payload).map_err(|e| io_error(&output, e))?;

        #[cfg(feature = "logging")]
        info!("Recovered file saved as {}", output.display());

        Ok(DecodeReport {
            descriptor,
            output,
            frame_count: frames.len(),
        })
    }
}

fn io_error(path: &Path, err: std::io::Error) -> CodecError {
    CodecError::Io(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_name() {
        let d = resolve_descriptor(
            Path::new("/videos/movie-txt-12345.mkv"),
            &DescriptorOverride::default(),
            "mkv",
        )
        .unwrap();
        assert_eq!(d, ContainerDescriptor::new("movie", "txt", 12345));
    }

    #[test]
    fn test_resolve_override_skips_parsing() {
        let d = resolve_descriptor(
            Path::new("holiday.mkv"),
            &DescriptorOverride::new(42, "zip"),
            "mkv",
        )
        .unwrap();
        assert_eq!(d, ContainerDescriptor::explicit("zip", 42));
        assert_eq!(d.recovered_file_name(), "recovered_file.zip");
    }

    #[test]
    fn test_resolve_half_override_falls_back_to_name() {
        let size_only = DescriptorOverride {
            file_size: Some(5),
            file_format: None,
        };
        let d = resolve_descriptor(Path::new("movie-txt-12.mkv"), &size_only, "mkv").unwrap();
        assert_eq!(d, ContainerDescriptor::new("movie", "txt", 12));

        let format_only = DescriptorOverride {
            file_size: None,
            file_format: Some("zip".to_string()),
        };
        assert!(matches!(
            resolve_descriptor(Path::new("holiday.mkv"), &format_only, "mkv"),
            Err(CodecError::MalformedContainerName(_))
        ));
    }

    #[test]
    fn test_resolve_unparsable_name() {
        assert!(matches!(
            resolve_descriptor(Path::new("video.mkv"), &DescriptorOverride::default(), "mkv"),
            Err(CodecError::MalformedContainerName(_))
        ));
    }

    #[test]
    fn test_default_work_dirs_are_separate() {
        let config = PipelineConfig::default();
        assert_eq!(config.encode_work_dir, PathBuf::from("output_images"));
        assert_eq!(config.decode_work_dir, PathBuf::from("decoded_images"));
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::default()
            .with_dimensions(FrameDimensions::new(4, 4))
            .with_container_extension("avi")
            .with_work_dir("frames")
            .with_keep_artifacts(true);

        assert_eq!(config.dimensions, FrameDimensions::new(4, 4));
        assert_eq!(config.container_extension, "avi");
        assert_eq!(config.encode_work_dir, PathBuf::from("frames"));
        assert_eq!(config.decode_work_dir, PathBuf::from("frames"));
        assert!(config.keep_artifacts);

        let config = config.with_decode_work_dir("extracted");
        assert_eq!(config.encode_work_dir, PathBuf::from("frames"));
        assert_eq!(config.decode_work_dir, PathBuf::from("extracted"));
    }
}
