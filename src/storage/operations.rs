//! Storage operations
//!
//! Applies folder creation, rename, delete and upload to paths that have
//! already been resolved inside the sandbox. Nothing is rolled back: a
//! recursive delete that fails halfway leaves whatever it did not reach.

use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::Builder;

use crate::error::StorageError;
use crate::storage::results::StoreResult;
use crate::storage::validation::SandboxRoot;

fn display(root: &SandboxRoot, path: &Path) -> String {
    root.relative_path(path)
        .unwrap_or_else(|| path.display().to_string())
}

/// Creates `path` and any missing ancestors. An existing directory is left
/// untouched and counts as success.
pub fn create_folder(root: &SandboxRoot, path: &Path) -> Result<(), StorageError> {
    if path.is_dir() {
        debug!("Folder /{} already exists", display(root, path));
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => StorageError::DestinationExists(display(root, path)),
        _ => StorageError::from(e),
    })?;

    info!("Created folder /{}", display(root, path));
    Ok(())
}

/// Moves a file or directory from `from` to `to`.
///
/// An existing destination is refused rather than overwritten or merged,
/// whatever the platform's `rename` would have done.
pub fn rename(root: &SandboxRoot, from: &Path, to: &Path) -> Result<(), StorageError> {
    if root.is_root(from) || root.is_root(to) {
        return Err(StorageError::RootNotModifiable);
    }

    match fs::symlink_metadata(from) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound(display(root, from)));
        }
        Err(e) => return Err(StorageError::from(e)),
    }

    if fs::symlink_metadata(to).is_ok() {
        return Err(StorageError::DestinationExists(display(root, to)));
    }

    fs::rename(from, to)?;

    info!(
        "Renamed /{} to /{}",
        display(root, from),
        display(root, to)
    );
    Ok(())
}

/// Removes `path`, recursively if it is a directory. A missing path is
/// already deleted and counts as success.
pub fn delete(root: &SandboxRoot, path: &Path) -> Result<(), StorageError> {
    if root.is_root(path) {
        return Err(StorageError::RootNotModifiable);
    }

    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Nothing to delete at /{}", display(root, path));
            return Ok(());
        }
        Err(e) => return Err(StorageError::from(e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => {}
        // Lost a race with another delete
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(StorageError::from(e)),
    }

    info!("Deleted /{}", display(root, path));
    Ok(())
}

/// Reduces a client-supplied upload name to a single path segment.
pub fn sanitize_file_name(file_name: &str) -> Result<String, StorageError> {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut components = Path::new(base).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !base.contains('\0') => Ok(base.to_string()),
        _ => Err(StorageError::InvalidPath(format!(
            "unusable file name: {:?}",
            file_name
        ))),
    }
}

/// Writes an uploaded file into `directory`, replacing any existing file of
/// the same name.
///
/// The bytes go to a uniquely named temporary sibling first and are
/// persisted into place, so a reader never sees a half-written file.
pub fn store_file(
    root: &SandboxRoot,
    directory: &Path,
    file_name: &str,
    contents: &[u8],
) -> Result<StoreResult, StorageError> {
    let file_name = sanitize_file_name(file_name)?;

    if !directory.is_dir() {
        return Err(StorageError::DirectoryNotFound(display(root, directory)));
    }

    let file_path = directory.join(&file_name);
    if file_path.is_dir() {
        return Err(StorageError::NotAFile(display(root, &file_path)));
    }

    // Unique per upload, so concurrent uploads of one name never share it
    let mut temp_file = Builder::new()
        .prefix(".filewm-upload")
        .tempfile_in(directory)?;
    temp_file.write_all(contents)?;
    temp_file.as_file_mut().sync_all()?;
    temp_file
        .persist(&file_path)
        .map_err(|error| StorageError::from(error.error))?;

    let relative_path = display(root, &file_path);
    info!("Stored /{} ({} bytes)", relative_path, contents.len());

    Ok(StoreResult {
        file_path,
        relative_path,
        bytes_written: contents.len() as u64,
    })
}

/// Checks that `path` names an existing regular file ready to be served
pub fn prepare_file_retrieval(root: &SandboxRoot, path: &Path) -> Result<PathBuf, StorageError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(path.to_path_buf()),
        Ok(_) => Err(StorageError::NotAFile(display(root, path))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(StorageError::NotFound(display(root, path)))
        }
        Err(e) => Err(StorageError::from(e)),
    }
}
