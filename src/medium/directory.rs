//! Directory-backed key-value medium.

use super::{check_quota, Medium};
use crate::config::TaskListConfig;
use crate::error::{Result, TaskError};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const MANIFEST_FILE: &str = "MANIFEST.json";
const LOCK_FILE: &str = "LOCK";

/// Written once per directory; identifies the layout of the key files.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Manifest {
    format: String,
    version: u32,
}

impl Manifest {
    const FORMAT: &'static str = "tasklist";
    const VERSION: u32 = 1;

    fn current() -> Self {
        Self {
            format: Self::FORMAT.to_string(),
            version: Self::VERSION,
        }
    }
}

/// Stores each key as `<key>.json` under a directory.
///
/// Writes go to a temp file in the same directory and are renamed over the
/// target, so a crash mid-write leaves the previous value intact.
#[derive(Debug)]
pub struct DirectoryMedium {
    /// Base directory.
    path: PathBuf,

    /// Max bytes for a single value (None = unlimited).
    quota: Option<usize>,

    /// Held only when opened exclusively.
    _lock_file: Option<File>,
}

impl DirectoryMedium {
    /// Open an existing medium or create a new one, per `config`.
    pub fn open_or_create(config: &TaskListConfig) -> Result<Self> {
        if config.path.exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create(config)
        } else {
            Err(TaskError::NotInitialized)
        }
    }

    /// Create the medium directory and its manifest.
    pub fn create(config: &TaskListConfig) -> Result<Self> {
        fs::create_dir_all(&config.path)?;
        store_manifest(&config.path)?;
        Self::from_config(config)
    }

    /// Open an existing directory.
    ///
    /// A directory without a manifest (fresh, or made by someone else) is
    /// adopted and stamped; one whose manifest names another format or
    /// version is refused.
    pub fn open(config: &TaskListConfig) -> Result<Self> {
        match read_manifest(&config.path)? {
            None => {
                debug!(path = %config.path.display(), "adopting directory without manifest");
                store_manifest(&config.path)?;
            }
            Some(manifest) if manifest == Manifest::current() => {}
            Some(manifest) => {
                return Err(TaskError::InvalidFormat(format!(
                    "Unsupported medium: {} v{}",
                    manifest.format, manifest.version
                )));
            }
        }
        Self::from_config(config)
    }

    fn from_config(config: &TaskListConfig) -> Result<Self> {
        let lock_file = if config.exclusive {
            Some(lock_directory(&config.path)?)
        } else {
            None
        };

        Ok(Self {
            path: config.path.clone(),
            quota: config.quota_bytes,
            _lock_file: lock_file,
        })
    }

    /// Base directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(TaskError::InvalidFormat(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.path.join(format!("{key}.json")))
    }
}

/// Read the manifest, `None` if the directory has none.
fn read_manifest(dir: &Path) -> Result<Option<Manifest>> {
    let raw = match fs::read(dir.join(MANIFEST_FILE)) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|e| TaskError::InvalidFormat(format!("Unreadable manifest: {e}")))
}

fn store_manifest(dir: &Path) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer(&mut tmp, &Manifest::current())?;
    tmp.as_file().sync_all()?;
    tmp.persist(dir.join(MANIFEST_FILE))
        .map_err(|e| TaskError::Io(e.error))?;
    Ok(())
}

/// Take the advisory lock on `dir`, failing fast if another session holds it.
fn lock_directory(dir: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(dir.join(LOCK_FILE))?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(file),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(TaskError::Locked),
        Err(e) => Err(e.into()),
    }
}

impl Medium for DirectoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        check_quota(self.quota, value.len())?;

        let mut tmp = NamedTempFile::new_in(&self.path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| TaskError::Io(e.error))?;

        Ok(())
    }
}
