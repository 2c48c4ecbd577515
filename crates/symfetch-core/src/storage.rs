//! Local artifact storage.
//!
//! Received bytes go to `<name>.part`; only a completed transfer is synced
//! and atomically renamed to the final name. A `PartFile` dropped without
//! `finalize` removes its temp file, so a failed transfer never leaves a
//! truncated artifact behind.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `otherlisted.txt` → `otherlisted.txt.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// True if the final artifact exists. A leftover `.part` file does not count.
pub fn is_present(final_path: &Path) -> bool {
    final_path.exists()
}

/// Staging file for one artifact. Sequential writes via `io::Write`.
#[derive(Debug)]
pub struct PartFile {
    file: Option<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    /// Create `<final_path>.part`, truncating any leftover from an earlier run.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(PartFile {
            file: Some(file),
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("part file already closed"))
    }

    /// Sync and rename to the final path. Fails if the final path is on a different filesystem.
    pub fn finalize(mut self) -> io::Result<PathBuf> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
            drop(file);
        }
        std::fs::rename(&self.temp_path, &self.final_path)?;
        // Renamed away; nothing left for Drop to clean up.
        self.temp_path = PathBuf::new();
        Ok(self.final_path.clone())
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.temp_path.as_os_str().is_empty() {
            return;
        }
        self.file.take();
        if let Err(e) = std::fs::remove_file(&self.temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.temp_path.display(), "failed to remove part file: {}", e);
            }
        }
    }
}
