//! File backend: every entry lives in one JSON document on disk.
//!
//! Writes replace the document atomically through a temporary file in the
//! same directory. A missing or unreadable document opens as an empty store.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::kv::{KeyValueStore, SetOptions, StoredEntry};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredEntry>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if it cannot be read
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "store unreadable, starting empty");
                }
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &self.entries)?;
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, StoredEntry>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .and_then(|entry| entry.live_value())
            .map(str::to_string)
    }

    fn set_raw(&mut self, name: &str, raw: String, options: &SetOptions) -> Result<(), StoreError> {
        self.entries.insert(
            name.to_string(),
            StoredEntry {
                value: raw,
                options: options.clone(),
            },
        );
        self.flush()
    }

    fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        if self.entries.remove(name).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
