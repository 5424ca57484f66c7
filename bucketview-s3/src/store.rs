//! Provider-agnostic object store trait
//!
//! The HTTP layer and the listing/download services depend on this trait
//! rather than on a concrete SDK client, so tests can run against an
//! in-memory implementation.

use std::path::Path;

use async_trait::async_trait;

use bucketview_core::BrowseError;

use crate::scratch::ScratchObject;

/// One page of a delimited listing: object keys and common prefixes,
/// both sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Full object keys directly under the listed path.
    pub keys: Vec<String>,
    /// Sub-prefixes directly under the listed path, each ending in `/`
    /// as the provider reports them.
    pub prefixes: Vec<String>,
}

impl Listing {
    /// True when the listed path contains neither objects nor prefixes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.prefixes.is_empty()
    }
}

/// Read-only view over an object storage provider.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// All bucket names visible to the configured credentials, sorted
    /// ascending.
    async fn list_buckets(&self) -> Result<Vec<String>, BrowseError>;

    /// Objects and sub-prefixes directly under `path` in `bucket`.
    ///
    /// An empty `path` lists the bucket root; a non-empty `path` is
    /// interpreted as a directory, so the provider query uses `path/` as
    /// the prefix. Results come back sorted.
    async fn list_objects(&self, bucket: &str, path: &str) -> Result<Listing, BrowseError>;

    /// Download `bucket`/`key` into a fresh scratch file under
    /// `scratch_dir` and return the handle. The file is removed when the
    /// returned [`ScratchObject`] drops.
    async fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        scratch_dir: &Path,
    ) -> Result<ScratchObject, BrowseError>;
}
