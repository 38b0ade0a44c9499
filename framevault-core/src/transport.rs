//! Frame persistence and video transport traits
//!
//! The pipeline never touches image codecs or video tools directly; it goes
//! through these two seams so tests can swap in [`MemoryTransport`].

use crate::constants::parse_frame_index;
use crate::error::CodecError;
use crate::types::{FrameDimensions, FrameGrid};
use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[cfg(feature = "logging")]
use tracing::debug;

/// Writes frames to durable raster images and reads them back
pub trait FramePersistence {
    /// Persist one frame into `dir`, returning the path written
    fn write_frame(&self, dir: &Path, frame: &FrameGrid) -> Result<PathBuf>;

    /// Read every persisted frame in `dir`, ordered by numeric index
    ///
    /// Returned frames are re-indexed from 0.
    fn read_frames(&self, dir: &Path, dimensions: FrameDimensions) -> Result<Vec<FrameGrid>>;

    /// Persist a whole frame sequence
    fn write_frames(&self, dir: &Path, frames: &[FrameGrid]) -> Result<Vec<PathBuf>> {
        frames.iter().map(|f| self.write_frame(dir, f)).collect()
    }
}

/// Muxes persisted frames into one container and back
pub trait VideoTransport {
    /// Combine the `frame_count` frame images in `frames_dir` into `output`
    fn mux(&self, frames_dir: &Path, frame_count: usize, output: &Path) -> Result<()>;

    /// Extract the frames of `container` as images into `frames_dir`
    fn demux(&self, container: &Path, frames_dir: &Path) -> Result<()>;
}

impl<T: FramePersistence + ?Sized> FramePersistence for &T {
    fn write_frame(&self, dir: &Path, frame: &FrameGrid) -> Result<PathBuf> {
        (**self).write_frame(dir, frame)
    }

    fn read_frames(&self, dir: &Path, dimensions: FrameDimensions) -> Result<Vec<FrameGrid>> {
        (**self).read_frames(dir, dimensions)
    }

    fn write_frames(&self, dir: &Path, frames: &[FrameGrid]) -> Result<Vec<PathBuf>> {
        (**self).write_frames(dir, frames)
    }
}

impl<T: VideoTransport + ?Sized> VideoTransport for &T {
    fn mux(&self, frames_dir: &Path, frame_count: usize, output: &Path) -> Result<()> {
        (**self).mux(frames_dir, frame_count, output)
    }

    fn demux(&self, container: &Path, frames_dir: &Path) -> Result<()> {
        (**self).demux(container, frames_dir)
    }
}

/// List the frame files in `dir` in numeric index order
///
/// Files that do not follow the frame naming scheme are ignored. Indices must
/// be consecutive and start at 0 or 1 (ffmpeg numbers extracted frames from
/// 1); a gap fails with [`CodecError::FrameSequenceGap`].
pub fn enumerate_frame_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut indexed = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(index) = name.to_str().and_then(parse_frame_index) {
            indexed.push((index, entry.path()));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);

    if let Some(&(first, _)) = indexed.first() {
        if first > 1 {
            return Err(CodecError::FrameSequenceGap {
                expected: 0,
                found: first,
            });
        }
    }

    for pair in indexed.windows(2) {
        let (prev, next) = (pair[0].0, pair[1].0);
        if next != prev + 1 {
            return Err(CodecError::FrameSequenceGap {
                expected: prev + 1,
                found: next,
            });
        }
    }

    #[cfg(feature = "logging")]
    debug!("Found {} frame files in {}", indexed.len(), dir.display());

    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}

/// In-memory video transport for tests
///
/// `mux` keeps the frame files' bytes in memory and writes a small token to
/// the container path; `demux` reads the token back, so a container can be
/// renamed or copied between the two calls.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    containers: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    fail_with: Option<String>,
}

const MEMORY_TOKEN_PREFIX: &str = "framevault-memory-container:";

impl MemoryTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose every call fails with [`CodecError::ExternalToolFailure`]
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            containers: Mutex::default(),
            fail_with: Some(detail.into()),
        }
    }

    /// Number of containers muxed so far
    pub fn container_count(&self) -> usize {
        self.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<Vec<u8>>>>> {
        self.containers
            .lock()
            .map_err(|_| failure("container store poisoned"))
    }

    fn check_failure(&self) -> Result<()> {
        match &self.fail_with {
            Some(detail) => Err(failure(detail)),
            None => Ok(()),
        }
    }
}

fn failure(detail: &str) -> CodecError {
    CodecError::ExternalToolFailure {
        tool: "memory transport".to_string(),
        detail: detail.to_string(),
    }
}

impl VideoTransport for MemoryTransport {
    fn mux(&self, frames_dir: &Path, frame_count: usize, output: &Path) -> Result<()> {
        self.check_failure()?;

        let files = enumerate_frame_files(frames_dir)?;
        if files.len() != frame_count {
            return Err(failure(&format!(
                "expected {} frames in {}, found {}",
                frame_count,
                frames_dir.display(),
                files.len()
            )));
        }

        let frames = files.iter().map(fs::read).collect::<std::io::Result<Vec<_>>>()?;

        let mut containers = self.lock()?;
        let token = format!("{}{}", MEMORY_TOKEN_PREFIX, containers.len());
        fs::write(output, token.as_bytes())?;
        containers.insert(token, frames);
        Ok(())
    }

    fn demux(&self, container: &Path, frames_dir: &Path) -> Result<()> {
        self.check_failure()?;

        let token = fs::read_to_string(container)?;
        let containers = self.lock()?;
        let frames = containers
            .get(token.trim())
            .ok_or_else(|| failure(&format!("{} is not a known container", container.display())))?;

        // Number from 1, as ffmpeg does when extracting.
        for (i, bytes) in frames.iter().enumerate() {
            fs::write(frames_dir.join(crate::constants::frame_file_name(i + 1)), bytes)?;
        }
        Ok(())
    }
}
