//! Scratch files for in-flight downloads
//!
//! Each download lands in its own temporary directory so concurrent
//! requests for the same key never share a file. The directory and its
//! contents are removed when the handle drops.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use bucketview_core::{keys, BrowseError};

/// A downloaded object on local disk, deleted on drop.
#[derive(Debug)]
pub struct ScratchObject {
    dir: TempDir,
    path: PathBuf,
    file_name: String,
}

impl ScratchObject {
    /// Reserve a scratch file for `key` under `scratch_dir`. The file
    /// itself is not created; callers write to [`ScratchObject::path`].
    pub fn new(scratch_dir: &Path, key: &str) -> Result<Self, BrowseError> {
        let dir = TempDir::new_in(scratch_dir)?;
        let file_name = keys::file_name(key).to_string();
        let path = dir.path().join(&file_name);
        Ok(Self {
            dir,
            path,
            file_name,
        })
    }

    /// Location the object's bytes are (to be) stored at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name the object should be served as, the last segment of
    /// the original key.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The private directory holding the scratch file.
    pub fn scratch_dir(&self) -> &Path {
        self.dir.path()
    }
}
