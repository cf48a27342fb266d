//! Storage result types
//!
//! Defines value types returned by storage operations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shape of a directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// Immediate children only, without paths
    Shallow,
    /// Every descendant, with paths relative to the sandbox root
    Recursive,
}

impl ListingMode {
    pub fn from_recursive_flag(recursive: bool) -> Self {
        if recursive {
            ListingMode::Recursive
        } else {
            ListingMode::Shallow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingMode::Shallow => "shallow",
            ListingMode::Recursive => "recursive",
        }
    }
}

/// A single file or directory in a listing.
///
/// Entries are snapshots of the disk at listing time and are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "isDir")]
    pub is_dir: bool,
}

/// Result of a file upload
#[derive(Debug, Clone)]
pub struct StoreResult {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub bytes_written: u64,
}
