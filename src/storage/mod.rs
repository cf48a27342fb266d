//! File system storage management
//!
//! Resolves client paths inside the sandbox, lists the tree and applies
//! mutations to it.

pub mod listing;
pub mod operations;
pub mod results;
pub mod validation;

pub use listing::list;
pub use operations::{create_folder, delete, prepare_file_retrieval, rename, store_file};
pub use results::{Entry, ListingMode, StoreResult};
pub use validation::{SandboxRoot, clean_relative, resolve};
