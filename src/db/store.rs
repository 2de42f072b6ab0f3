// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Save file on disk.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::db::codec;
use crate::db::RunCollection;
use crate::error::Result;

/// Whole-file load/save of the master collection.
#[derive(Debug, Clone)]
pub struct DiaryStore {
    path: PathBuf,
}

impl DiaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the collection content with the save file.
    ///
    /// A missing file loads as an empty diary. On any decode or read error
    /// the collection is left as it was.
    pub fn load_into(&self, collection: &mut RunCollection) -> Result<usize> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Save file not found, starting empty");
                collection.replace_all(Vec::new());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let runs = codec::decode(BufReader::new(file)).inspect_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to load save file");
        })?;

        let count = runs.len();
        collection.replace_all(runs);
        tracing::info!(path = %self.path.display(), count, "Diary loaded");
        Ok(count)
    }

    /// Write the whole collection, replacing the save file only once the
    /// new content is on disk.
    pub fn save(&self, collection: &RunCollection) -> Result<()> {
        let (temp, file) = TempFile::create(self.temp_path())?;
        {
            let mut writer = BufWriter::new(file);
            codec::encode(collection.iter(), &mut writer)?;
            writer.get_ref().sync_all()?;
        }
        temp.persist(&self.path)?;

        tracing::info!(path = %self.path.display(), count = collection.len(), "Diary saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Temporary sibling of the save file, removed on drop unless persisted.
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    fn create(path: PathBuf) -> Result<(Self, File)> {
        let file = File::create(&path)?;
        let temp = Self {
            path,
            persisted: false,
        };
        Ok((temp, file))
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target)?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove temporary save file");
        }
    }
}
