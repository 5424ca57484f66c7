//! In-memory `ObjectStore` implementation

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use bucketview_core::BrowseError;
use bucketview_s3::{Listing, ObjectStore, ScratchObject};

/// In-memory object store keyed by bucket name then object key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: DashMap<String, DashMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_bucket(&self, name: &str) {
        self.buckets.entry(name.to_string()).or_default();
    }

    /// Store an object, creating the bucket if needed.
    pub fn put_object(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), body.into());
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_buckets(&self) -> Result<Vec<String>, BrowseError> {
        let mut names: Vec<String> = self.buckets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn list_objects(&self, bucket: &str, path: &str) -> Result<Listing, BrowseError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| BrowseError::Provider(format!("bucket not found: {bucket}")))?;

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut keys = Vec::new();
        let mut prefix_set = HashSet::new();

        for entry in objects.iter() {
            let key = entry.key();
            if !key.starts_with(&prefix) {
                continue;
            }

            let suffix = &key[prefix.len()..];
            if let Some(pos) = suffix.find('/') {
                prefix_set.insert(format!("{prefix}{}", &suffix[..=pos]));
                continue;
            }

            keys.push(key.clone());
        }

        keys.sort();
        let mut prefixes: Vec<String> = prefix_set.into_iter().collect();
        prefixes.sort();

        Ok(Listing { keys, prefixes })
    }

    async fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        scratch_dir: &Path,
    ) -> Result<ScratchObject, BrowseError> {
        let not_found = || BrowseError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };

        let body = self
            .buckets
            .get(bucket)
            .ok_or_else(not_found)?
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(not_found)?;

        let scratch = ScratchObject::new(scratch_dir, key)?;
        tokio::fs::write(scratch.path(), &body).await?;
        Ok(scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.create_bucket("empty");
        store.put_object("docs", "readme.txt", "top-level");
        store.put_object("docs", "reports/q1.csv", "a,b");
        store.put_object("docs", "reports/q2.csv", "c,d");
        store.put_object("docs", "reports/2024/summary.txt", "deep");
        store
    }

    #[tokio::test]
    async fn test_buckets_sorted() {
        let store = seeded();
        let names = store.list_buckets().await.unwrap();
        assert_eq!(names, vec!["docs", "empty"]);
    }

    #[tokio::test]
    async fn test_root_listing_groups_prefixes() {
        let store = seeded();
        let listing = store.list_objects("docs", "").await.unwrap();
        assert_eq!(listing.keys, vec!["readme.txt"]);
        assert_eq!(listing.prefixes, vec!["reports/"]);
    }

    #[tokio::test]
    async fn test_nested_listing_keeps_full_keys() {
        let store = seeded();
        let listing = store.list_objects("docs", "reports").await.unwrap();
        assert_eq!(listing.keys, vec!["reports/q1.csv", "reports/q2.csv"]);
        assert_eq!(listing.prefixes, vec!["reports/2024/"]);
    }

    #[tokio::test]
    async fn test_empty_bucket_listing() {
        let store = seeded();
        let listing = store.list_objects("empty", "").await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_writes_body_to_scratch() {
        let store = seeded();
        let root = TempDir::new().unwrap();
        let scratch = store
            .fetch_object("docs", "reports/q1.csv", root.path())
            .await
            .unwrap();
        assert_eq!(scratch.file_name(), "q1.csv");
        let body = tokio::fs::read_to_string(scratch.path()).await.unwrap();
        assert_eq!(body, "a,b");
    }

    #[tokio::test]
    async fn test_fetch_missing_key_is_not_found() {
        let store = seeded();
        let root = TempDir::new().unwrap();
        let err = store
            .fetch_object("docs", "nope.txt", root.path())
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }
}
