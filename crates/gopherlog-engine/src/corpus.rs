use crate::entry::{Entry, EntryError};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level directory holding attachment files rather than entries.
pub const MEDIA_DIR: &str = "media";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Log directory not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid entry {path}: {source}")]
    Entry { path: PathBuf, source: EntryError },
}

/// Read and parse a single entry file
pub fn read_entry(path: &Path) -> Result<Entry, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Entry::parse(&content).map_err(|source| CorpusError::Entry {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every entry under `root/<year>/<month>/`.
///
/// The `media` directory at the root is skipped, as are plain files at the
/// year and month levels. The first entry that fails to parse aborts the load.
pub fn load_entries(root: &Path) -> Result<Vec<Entry>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotFound(root.to_path_buf()));
    }

    let mut entries = Vec::new();
    for year in list_dir(root)? {
        if year.path.file_name().is_some_and(|name| name == MEDIA_DIR) || !year.is_dir {
            continue;
        }
        for month in list_dir(&year.path)? {
            if !month.is_dir {
                continue;
            }
            for day in list_dir(&month.path)? {
                if day.is_dir {
                    continue;
                }
                log::debug!("Parsing {}", day.path.display());
                entries.push(read_entry(&day.path)?);
            }
        }
    }

    log::info!("Loaded {} entries from {}", entries.len(), root.display());
    Ok(entries)
}

/// Sort entries by start date; entries starting on the same day keep their order.
pub fn sort_chronologically(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.begin);
}

struct Listed {
    path: PathBuf,
    /// From the listing itself, so symlinks are never followed into.
    is_dir: bool,
}

/// Directory listing sorted by name, so traversal order does not depend on the filesystem.
fn list_dir(dir: &Path) -> Result<Vec<Listed>, CorpusError> {
    let io_err = |source: std::io::Error| CorpusError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut listed = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let is_dir = entry.file_type().map_err(io_err)?.is_dir();
        listed.push(Listed {
            path: entry.path(),
            is_dir,
        });
    }
    listed.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(listed)
}
