//! Browse and download orchestration
//!
//! [`Browser`] sits between the HTTP handlers and the [`ObjectStore`]
//! trait. It owns the scratch directory for downloads and applies the
//! display-key decoding so handlers only deal with URL-level values.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use bucketview_core::{keys, BrowseError};

use crate::scratch::ScratchObject;
use crate::store::{Listing, ObjectStore};

/// Shared application service for listing and fetching objects.
#[derive(Clone)]
pub struct Browser {
    store: Arc<dyn ObjectStore>,
    scratch_dir: PathBuf,
}

impl Browser {
    pub fn new(store: Arc<dyn ObjectStore>, scratch_dir: PathBuf) -> Self {
        Self { store, scratch_dir }
    }

    /// All visible bucket names, sorted.
    pub async fn buckets(&self) -> Result<Vec<String>, BrowseError> {
        self.store.list_buckets().await
    }

    /// Objects and sub-prefixes directly under `path` in `bucket`.
    pub async fn browse(&self, bucket: &str, path: &str) -> Result<Listing, BrowseError> {
        self.store.list_objects(bucket, path).await
    }

    /// Decode `display_key` back to an object key and download it to a
    /// scratch file.
    pub async fn download(
        &self,
        bucket: &str,
        display_key: &str,
    ) -> Result<ScratchObject, BrowseError> {
        let key = keys::rebuild_key(display_key);
        debug!(bucket, display_key, key, "resolved download key");
        self.store
            .fetch_object(bucket, &key, &self.scratch_dir)
            .await
    }
}
