use discount_core::store::{Result, SnapshotStore};
use discount_core::{CodeSet, StorageError};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Stores the snapshot as a flat JSON array of code strings in one file.
///
/// Writes go to a sibling `<name>.tmp` file which is flushed to disk and then
/// renamed over the target, so neither readers nor a restart after a crash
/// observe a half-written snapshot. The file holds no ordering, metadata or
/// version information.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("snapshot"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let written = write_synced(&temp, bytes).and_then(|()| fs::rename(&temp, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        // the rename itself is only durable once the directory entry is
        sync_dir(parent.unwrap_or_else(|| Path::new(".")))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn map_io_error(path: &Path, err: io::Error) -> StorageError {
    match err.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(format!("{}: {err}", path.display())),
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<CodeSet> {
        trace!(path = %self.path.display(), "reading code snapshot");

        let bytes = fs::read(&self.path).map_err(|e| map_io_error(&self.path, e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            StorageError::Malformed(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, codes: &CodeSet) -> Result<()> {
        let bytes = serde_json::to_vec(codes).map_err(|e| {
            StorageError::Malformed(format!("failed to encode snapshot: {e}"))
        })?;

        self.write_atomically(&bytes).map_err(|e| {
            // a missing parent is an i/o fault here, not an absent snapshot
            StorageError::Io(format!("{}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), codes = codes.len(), "wrote code snapshot");
        Ok(())
    }
}
