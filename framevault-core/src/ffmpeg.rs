//! ffmpeg subprocess video transport
//!
//! Frames are muxed with the lossless ffv1 codec in gray pixel format, so
//! every intensity survives the container bit for bit.

use crate::constants::{frame_file_pattern, DEFAULT_FRAMERATE};
use crate::error::CodecError;
use crate::transport::VideoTransport;
use crate::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(feature = "logging")]
use tracing::{debug, info};

/// Lines of stderr kept in a failure report
const STDERR_TAIL_LINES: usize = 20;

/// Video transport that shells out to `ffmpeg`
#[derive(Debug, Clone)]
pub struct FfmpegTransport {
    program: PathBuf,
    framerate: u32,
}

impl Default for FfmpegTransport {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            framerate: DEFAULT_FRAMERATE,
        }
    }
}

impl FfmpegTransport {
    /// Transport using `ffmpeg` from `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific ffmpeg executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Frame rate recorded in the container
    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    /// Arguments for muxing `frames_dir` into `output`
    pub fn mux_args(&self, frames_dir: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push("-framerate".into());
        args.push(self.framerate.to_string().into());
        args.push("-start_number".into());
        args.push("0".into());
        args.push("-i".into());
        args.push(frames_dir.join(frame_file_pattern()).into_os_string());
        for arg in ["-c:v", "ffv1", "-level", "3", "-pix_fmt", "gray"] {
            args.push(arg.into());
        }
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Arguments for extracting the frames of `container` into `frames_dir`
    pub fn demux_args(&self, container: &Path, frames_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(container.as_os_str().to_owned());
        for arg in ["-vsync", "0", "-pix_fmt", "gray"] {
            args.push(arg.into());
        }
        args.push(frames_dir.join(frame_file_pattern()).into_os_string());
        args
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        #[cfg(feature = "logging")]
        debug!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CodecError::ExternalToolFailure {
                tool: self.program.display().to_string(),
                detail: format!("failed to start: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            return Err(CodecError::ExternalToolFailure {
                tool: self.program.display().to_string(),
                detail: format!("exited with {}: {}", output.status, tail),
            });
        }

        Ok(())
    }
}

impl VideoTransport for FfmpegTransport {
    fn mux(&self, frames_dir: &Path, _frame_count: usize, output: &Path) -> Result<()> {
        self.run(self.mux_args(frames_dir, output))?;

        #[cfg(feature = "logging")]
        info!("Lossless video created: {} ({} frames)", output.display(), _frame_count);

        Ok(())
    }

    fn demux(&self, container: &Path, frames_dir: &Path) -> Result<()> {
        self.run(self.demux_args(container, frames_dir))?;

        #[cfg(feature = "logging")]
        info!("Frames extracted to: {}", frames_dir.display());

        Ok(())
    }
}
