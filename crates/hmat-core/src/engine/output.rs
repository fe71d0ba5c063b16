use super::error::EngineError;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Decides up front whether the outputs of a run may be written, so a run
/// that would clobber an existing file is refused before any work is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputGuard {
    pub overwrite: bool,
}

impl OutputGuard {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Fails with `OutputExists` for an existing file unless overwriting is
    /// enabled, and with `OutputWrite` when the parent directory is missing.
    pub fn check(&self, path: &Path) -> Result<(), EngineError> {
        if path.is_dir() {
            return Err(EngineError::OutputWrite {
                path: path.to_path_buf(),
                reason: "path is a directory".into(),
            });
        }
        if path.exists() {
            if !self.overwrite {
                return Err(EngineError::OutputExists {
                    path: path.to_path_buf(),
                });
            }
            warn!("Existing output {:?} will be overwritten.", path);
        }

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if !parent.is_dir() {
            return Err(EngineError::OutputWrite {
                path: path.to_path_buf(),
                reason: io::Error::from(io::ErrorKind::NotFound).to_string(),
            });
        }

        debug!("Output {:?} is writable.", path);
        Ok(())
    }

    pub fn check_all<'a>(&self, paths: impl IntoIterator<Item = &'a Path>) -> Result<(), EngineError> {
        paths.into_iter().try_for_each(|p| self.check(p))
    }
}
