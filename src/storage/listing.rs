//! Directory listing
//!
//! Produces point-in-time snapshots of the sandbox tree. Nothing is cached;
//! every call walks the disk again.

use log::{debug, error};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::StorageError;
use crate::storage::results::{Entry, ListingMode};
use crate::storage::validation::SandboxRoot;

/// Lists `directory`, an already-resolved path inside `root`.
///
/// Entries come back sorted by file name within each directory, so the
/// order is stable for a fixed filesystem state. Any unreadable entry
/// aborts the walk and the partial result is dropped.
pub fn list(
    root: &SandboxRoot,
    directory: &Path,
    mode: ListingMode,
) -> Result<Vec<Entry>, StorageError> {
    let display = root
        .relative_path(directory)
        .unwrap_or_else(|| directory.display().to_string());

    match fs::metadata(directory) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => return Err(StorageError::DirectoryNotFound(display)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::DirectoryNotFound(display));
        }
        Err(e) => return Err(StorageError::from(e)),
    }

    let entries = match mode {
        ListingMode::Shallow => list_shallow(directory),
        ListingMode::Recursive => list_recursive(root, directory),
    }
    .inspect_err(|e| error!("Failed to list directory /{}: {}", display, e))?;

    debug!(
        "Listed directory /{} ({}) - {} entries",
        display,
        mode.as_str(),
        entries.len()
    );

    Ok(entries)
}

fn list_shallow(directory: &Path) -> Result<Vec<Entry>, StorageError> {
    let mut children = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        children.push((entry.file_name(), file_type.is_dir()));
    }
    children.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(children
        .into_iter()
        .map(|(name, is_dir)| Entry {
            name: name.to_string_lossy().into_owned(),
            path: None,
            is_dir,
        })
        .collect())
}

fn list_recursive(root: &SandboxRoot, directory: &Path) -> Result<Vec<Entry>, StorageError> {
    let mut entries = Vec::new();
    let walker = WalkDir::new(directory)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let path = root.relative_path(entry.path()).ok_or_else(|| {
            StorageError::PathEscape(entry.path().display().to_string())
        })?;
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: Some(path),
            is_dir: entry.file_type().is_dir(),
        });
    }

    Ok(entries)
}
