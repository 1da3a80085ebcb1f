// SPDX-License-Identifier: MPL-2.0
//! One-shot registry: which `unique_id`s have already been shown.
//!
//! Two stores are provided:
//! - [`MemoryRegistry`] forgets everything when the process exits.
//! - [`PersistentRegistry`] keeps the set in a CBOR file under the app data
//!   directory so one-shot toasts stay suppressed across restarts.
//!
//! # Path Resolution
//!
//! The registry file location can be customized for tests or portable deployments:
//! 1. Use [`PersistentRegistry::open_in`] with an explicit directory
//! 2. Set `ICED_TOAST_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Registry file name within the app data directory.
pub const REGISTRY_FILE: &str = "one_shot.cbor";

/// "Has this id ever been shown" store.
pub trait OneShotRegistry {
    /// Returns whether `id` was already reserved.
    fn contains(&self, id: &str) -> bool;

    /// Reserves `id`. Returns `true` if it was not reserved before.
    fn mark_seen(&mut self, id: &str) -> bool;
}

/// Per-process registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    seen: HashSet<String>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl OneShotRegistry for MemoryRegistry {
    fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    fn mark_seen(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_string())
    }
}

/// On-disk layout of the registry file.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
struct RegistryFile {
    #[serde(default)]
    seen: BTreeSet<String>,
}

/// Registry persisted to a CBOR file.
///
/// Every newly reserved id is written through immediately. I/O failures
/// never surface to `show`: they are logged and the in-memory set stays
/// authoritative for the rest of the process.
#[derive(Debug)]
pub struct PersistentRegistry {
    path: Option<PathBuf>,
    seen: BTreeSet<String>,
}

impl PersistentRegistry {
    /// Opens the registry at the default location.
    #[must_use]
    pub fn open() -> Self {
        Self::open_in(None)
    }

    /// Opens the registry in `base_dir`, or the default data directory.
    ///
    /// A missing file yields an empty registry. An unreadable or corrupted
    /// file also yields an empty registry, with a logged warning.
    #[must_use]
    pub fn open_in(base_dir: Option<PathBuf>) -> Self {
        let path = paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(REGISTRY_FILE);
            path
        });

        let seen = match path.as_deref() {
            Some(path) => match load(path) {
                Ok(file) => file.seen,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "one-shot registry unreadable, starting empty");
                    BTreeSet::new()
                }
            },
            None => {
                tracing::warn!("no data directory available, one-shot registry is in-memory only");
                BTreeSet::new()
            }
        };

        Self { path, seen }
    }

    /// Returns the backing file path, if one could be resolved.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Writes the current set to disk.
    pub fn save(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Err(Error::Registry("no data directory available".to_string()));
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = RegistryFile {
            seen: self.seen.clone(),
        };
        let mut writer = BufWriter::new(fs::File::create(path)?);
        ciborium::into_writer(&file, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn load(path: &Path) -> Result<RegistryFile> {
    if !path.exists() {
        return Ok(RegistryFile::default());
    }
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(ciborium::from_reader(reader)?)
}

impl OneShotRegistry for PersistentRegistry {
    fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    fn mark_seen(&mut self, id: &str) -> bool {
        if !self.seen.insert(id.to_string()) {
            return false;
        }
        if let Err(err) = self.save() {
            tracing::warn!(unique_id = id, error = %err, "failed to persist one-shot registry");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_registry_reserves_once() {
        let mut registry = MemoryRegistry::new();
        assert!(!registry.contains("sync-err"));
        assert!(registry.mark_seen("sync-err"));
        assert!(registry.contains("sync-err"));
        assert!(!registry.mark_seen("sync-err"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn persistent_registry_survives_reopen() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut registry = PersistentRegistry::open_in(Some(base_dir.clone()));
        assert!(registry.is_empty());
        assert!(registry.mark_seen("welcome"));
        assert!(base_dir.join(REGISTRY_FILE).exists());

        let reopened = PersistentRegistry::open_in(Some(base_dir));
        assert!(reopened.contains("welcome"));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn persistent_registry_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested = temp_dir.path().join("nested").join("deeply");

        let mut registry = PersistentRegistry::open_in(Some(nested.clone()));
        registry.mark_seen("tip-1");
        assert!(nested.join(REGISTRY_FILE).exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn save_reports_failed_write() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        std::os::unix::fs::symlink("/dev/full", base_dir.join(REGISTRY_FILE))
            .expect("symlink registry file");

        let mut registry = PersistentRegistry::open_in(Some(base_dir));
        assert!(registry.mark_seen("x"));
        assert!(matches!(registry.save(), Err(Error::Io(_))));
    }

    #[test]
    fn corrupted_file_starts_empty() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join(REGISTRY_FILE), "not valid cbor data").expect("write file");

        let registry = PersistentRegistry::open_in(Some(base_dir));
        assert!(registry.is_empty());
    }

    #[test]
    fn corrupted_file_is_overwritten_on_next_reservation() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join(REGISTRY_FILE), "not valid cbor data").expect("write file");

        let mut registry = PersistentRegistry::open_in(Some(base_dir.clone()));
        registry.mark_seen("fresh");

        let reopened = PersistentRegistry::open_in(Some(base_dir));
        assert!(reopened.contains("fresh"));
    }

    #[test]
    fn duplicate_reservation_does_not_rewrite() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut registry = PersistentRegistry::open_in(Some(base_dir));
        assert!(registry.mark_seen("once"));
        assert!(!registry.mark_seen("once"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn separate_directories_are_independent() {
        let dir_a = tempdir().expect("create temp dir A");
        let dir_b = tempdir().expect("create temp dir B");

        let mut a = PersistentRegistry::open_in(Some(dir_a.path().to_path_buf()));
        a.mark_seen("only-in-a");

        let b = PersistentRegistry::open_in(Some(dir_b.path().to_path_buf()));
        assert!(!b.contains("only-in-a"));
    }
}
