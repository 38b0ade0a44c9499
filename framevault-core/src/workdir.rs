//! Scoped working directory for intermediate frame images

use crate::error::CodecError;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Directory holding the frames of one encode or decode operation
///
/// Acquiring clears whatever a previous run left behind. Dropping purges the
/// directory unless artifacts are kept, on success and error paths alike.
/// Two live handles on the same path are unsupported.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    /// Clear (or create) `path` and take ownership of it
    pub fn acquire(path: impl Into<PathBuf>, keep: bool) -> Result<Self> {
        let path = path.into();

        // Refuse paths like "", "." or "/" that would clear more than a frame directory.
        if path.file_name().is_none() {
            return Err(CodecError::Configuration(format!(
                "Refusing to use {:?} as a working directory",
                path
            )));
        }

        if path.exists() {
            #[cfg(feature = "logging")]
            debug!("Clearing stale working directory {}", path.display());

            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;

        Ok(Self { path, keep })
    }

    /// Path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory survives this handle
    pub fn keeps_artifacts(&self) -> bool {
        self.keep
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.keep {
            return;
        }

        match fs::remove_dir_all(&self.path) {
            Ok(()) => {
                #[cfg(feature = "logging")]
                debug!("Purged working directory {}", self.path.display());
            }
            Err(_e) => {
                #[cfg(feature = "logging")]
                warn!(
                    "Failed to purge working directory {}: {}",
                    self.path.display(),
                    _e
                );
            }
        }
    }
}
