//! Path validation
//!
//! Translates untrusted, client-supplied relative paths into absolute paths
//! that are guaranteed to stay inside the sandbox root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// The single directory every operation is confined to.
///
/// Holds the canonical form of the root so containment checks compare
/// like with like.
#[derive(Debug, Clone)]
pub struct SandboxRoot {
    path: PathBuf,
}

impl SandboxRoot {
    /// Creates the directory if it is missing and canonicalizes it
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let path = path.canonicalize()?;
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("sandbox root is not a directory: {}", path.display()),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forward-slash path of `absolute` relative to the root, if it is inside it
    pub fn relative_path(&self, absolute: &Path) -> Option<String> {
        let relative = absolute.strip_prefix(&self.path).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }

    pub fn is_root(&self, absolute: &Path) -> bool {
        absolute == self.path
    }
}

/// Lexically cleans a forward-slash relative path.
///
/// Empty and `.` segments and duplicate separators are dropped, `..` pops
/// the previous segment. Popping past the start, absolute paths and
/// segments that the platform would split further are all escapes.
/// No filesystem access happens here.
pub fn clean_relative(relative: &str) -> Result<PathBuf, StorageError> {
    if relative.contains('\0') {
        return Err(StorageError::InvalidPath(relative.escape_default().to_string()));
    }

    if relative.starts_with('/') {
        return Err(StorageError::PathEscape(relative.to_string()));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(StorageError::PathEscape(relative.to_string()));
                }
            }
            name => {
                // e.g. `C:` or `a\..\..` on Windows
                let mut components = Path::new(name).components();
                match (components.next(), components.next()) {
                    (Some(Component::Normal(_)), None) => segments.push(name),
                    _ => return Err(StorageError::PathEscape(relative.to_string())),
                }
            }
        }
    }

    Ok(segments.iter().collect())
}

/// Resolves `relative` against the sandbox root.
///
/// The returned path is the lexical join of the root and the cleaned
/// relative path. Before it is returned, the deepest existing ancestor of
/// that path is canonicalized and must still lie inside the root, which
/// closes escapes through symlinks. An empty path resolves to the root.
pub fn resolve(root: &SandboxRoot, relative: &str) -> Result<PathBuf, StorageError> {
    let cleaned = clean_relative(relative)?;
    if cleaned.as_os_str().is_empty() {
        return Ok(root.path().to_path_buf());
    }
    let joined = root.path().join(&cleaned);
    verify_containment(root, &joined, relative)?;
    Ok(joined)
}

fn verify_containment(root: &SandboxRoot, joined: &Path, relative: &str) -> Result<(), StorageError> {
    let mut candidate = joined;
    loop {
        match candidate.canonicalize() {
            Ok(canonical) => {
                return if canonical.starts_with(root.path()) {
                    Ok(())
                } else {
                    Err(StorageError::PathEscape(relative.to_string()))
                };
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                match candidate.parent() {
                    Some(parent) if parent.starts_with(root.path()) => candidate = parent,
                    _ => return Err(StorageError::PathEscape(relative.to_string())),
                }
            }
            Err(_) => return Err(StorageError::PathEscape(relative.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, SandboxRoot) {
        let dir = TempDir::new().unwrap();
        let root = SandboxRoot::open(dir.path()).unwrap();
        (dir, root)
    }

    #[test]
    fn empty_path_is_the_root() {
        let (_dir, root) = sandbox();
        assert_eq!(resolve(&root, "").unwrap(), root.path());
    }

    #[test]
    fn collapses_dots_and_duplicate_separators() {
        let (_dir, root) = sandbox();
        assert_eq!(
            resolve(&root, "a/./b//c/").unwrap(),
            root.path().join("a").join("b").join("c")
        );
        assert_eq!(resolve(&root, "a/../b").unwrap(), root.path().join("b"));
        assert_eq!(resolve(&root, "a/..").unwrap(), root.path());
    }

    #[test]
    fn rejects_parent_escapes() {
        let (_dir, root) = sandbox();
        for path in ["..", "../../etc/passwd", "a/../../x", "a/b/../../../c"] {
            assert!(
                matches!(resolve(&root, path), Err(StorageError::PathEscape(_))),
                "{path} should escape"
            );
        }
    }

    #[test]
    fn rejects_absolute_paths() {
        let (_dir, root) = sandbox();
        assert!(matches!(
            resolve(&root, "/etc/passwd"),
            Err(StorageError::PathEscape(_))
        ));
    }

    #[test]
    fn rejects_nul_bytes() {
        assert!(matches!(
            clean_relative("a\0b"),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn missing_descendants_resolve_inside_root() {
        let (_dir, root) = sandbox();
        fs::create_dir(root.path().join("docs")).unwrap();
        assert_eq!(
            resolve(&root, "docs/new/deeper").unwrap(),
            root.path().join("docs/new/deeper")
        );
    }

    #[test]
    fn paths_below_a_file_are_not_escapes() {
        let (_dir, root) = sandbox();
        fs::write(root.path().join("note.txt"), b"x").unwrap();
        assert!(resolve(&root, "note.txt/child").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn rejects_symlink_escapes() {
        let (_dir, root) = sandbox();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("link")).unwrap();

        assert!(matches!(
            resolve(&root, "link"),
            Err(StorageError::PathEscape(_))
        ));
        assert!(matches!(
            resolve(&root, "link/secret.txt"),
            Err(StorageError::PathEscape(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn allows_symlinks_that_stay_inside() {
        let (_dir, root) = sandbox();
        fs::create_dir(root.path().join("real")).unwrap();
        std::os::unix::fs::symlink(root.path().join("real"), root.path().join("alias")).unwrap();
        assert_eq!(
            resolve(&root, "alias/file").unwrap(),
            root.path().join("alias/file")
        );
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let (_dir, root) = sandbox();
        let absolute = root.path().join("a").join("b.txt");
        assert_eq!(root.relative_path(&absolute).unwrap(), "a/b.txt");
        assert_eq!(root.relative_path(root.path()).unwrap(), "");
    }
}
