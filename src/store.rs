use log::debug;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maps bookmark names to the raw command lines saved under them.
pub type BookmarkContainer = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read bookmarks from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} does not contain a JSON object of bookmark names and commands", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write bookmarks to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read access to the saved bookmarks.
pub trait BookmarkLoader {
    fn load(&self) -> Result<BookmarkContainer, StoreError>;
}

/// Write access to the saved bookmarks. `update` always replaces the
/// whole collection.
pub trait BookmarkUpdater {
    fn update(&self, bookmarks: &BookmarkContainer) -> Result<(), StoreError>;
}

/// Anything that can both load and update bookmarks.
pub trait BookmarkStore: BookmarkLoader + BookmarkUpdater {}

impl<T: BookmarkLoader + BookmarkUpdater + ?Sized> BookmarkStore for T {}

/// Keeps the bookmarks as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl BookmarkLoader for FileStore {
    fn load(&self) -> Result<BookmarkContainer, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no store at {:?} yet, starting empty", self.path);
                return Ok(BookmarkContainer::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let bookmarks: BookmarkContainer =
            serde_json::from_slice(&raw).map_err(|source| StoreError::Format {
                path: self.path.clone(),
                source,
            })?;
        debug!("loaded {} bookmarks from {:?}", bookmarks.len(), self.path);
        Ok(bookmarks)
    }
}

impl BookmarkUpdater for FileStore {
    fn update(&self, bookmarks: &BookmarkContainer) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(bookmarks)
            .map_err(|e| self.write_error(e.into()))?;

        // write next to the target and swap it in, so readers never see a
        // half written store
        let temp_path = self.temp_path();
        // a leftover from an interrupted write keeps its old mode, start fresh
        match fs::remove_file(&temp_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(self.write_error(e)),
            _ => {}
        }
        let mut file = owner_only(OpenOptions::new().write(true).create_new(true))
            .open(&temp_path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(&payload)
            .and_then(|_| file.sync_all())
            .map_err(|e| self.write_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.write_error(e)
        })?;
        debug!("wrote {} bookmarks to {:?}", bookmarks.len(), self.path);
        Ok(())
    }
}

#[cfg(unix)]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600)
}

#[cfg(not(unix))]
fn owner_only(options: &mut OpenOptions) -> &mut OpenOptions {
    options
}
