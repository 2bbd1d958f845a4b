//! JSON storage for the tag database
//!
//! The whole database lives in one pretty-printed JSON document. Every
//! invocation reads it in full and, if it changed anything, writes it back
//! in full through a temp file and a rename.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::{Database, SCHEMA_VERSION};

/// File name of the database, in the home directory or a project directory
pub const DB_FILENAME: &str = ".pricetagdb.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read database {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed database {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write database {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Database {path} uses schema version {found}, newer than supported version {supported}")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}

/// Store for the tag database at a single file location
pub struct DatabaseStore {
    path: PathBuf,
}

impl DatabaseStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the store for the default database in a directory
    #[cfg(test)]
    fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DB_FILENAME))
    }

    /// Returns the path to the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty database if the file does not exist yet.
    ///
    /// Returns true if a file was created.
    pub fn ensure_exists(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }

        self.save(&Database::new())?;
        Ok(true)
    }

    /// Reads the database.
    ///
    /// A missing file yields an empty database without creating anything.
    pub fn load(&self) -> Result<Database, StoreError> {
        if !self.path.exists() {
            return Ok(Database::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let db: Database = serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;

        if db.version > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: db.version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(db)
    }

    /// Writes the full database, replacing the file atomically
    pub fn save(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error(parent))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_error(&temp_path))?;

            // Two writers must not interleave inside the temp file
            file.lock_exclusive().map_err(write_error(&temp_path))?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, db)
                .map_err(|e| StoreError::Write {
                    path: temp_path.clone(),
                    source: e.into(),
                })?;
            writeln!(writer).map_err(write_error(&temp_path))?;
            writer.flush().map_err(write_error(&temp_path))?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_error(&self.path))?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Write { path, source }
}
