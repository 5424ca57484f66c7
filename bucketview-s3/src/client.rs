//! AWS SDK implementation of [`ObjectStore`]
//!
//! Talks to any S3-compatible endpoint. When a custom endpoint is
//! configured (LocalStack, MinIO, on-cluster gateways) the client
//! switches to path-style addressing, since virtual-hosted style needs
//! DNS support those endpoints usually lack.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use serde::Deserialize;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use bucketview_core::BrowseError;

use crate::scratch::ScratchObject;
use crate::store::{Listing, ObjectStore};

/// Connection settings for the storage provider.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub access_key: String,
    pub secret_key: String,
    /// Custom endpoint URL; `None` means the public AWS endpoint.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

/// S3 client wrapper implementing [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "bucketview",
        );
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
        }
    }
}

/// Prefix for a delimited listing query: bucket root for an empty path,
/// otherwise the path with a trailing `/` so only its children match.
fn listing_prefix(path: &str) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(format!("{path}/"))
    }
}

/// Flatten an SDK error into the provider variant, keeping the source
/// chain in the message since the SDK's top-level Display is often just
/// "service error".
fn provider_error(err: impl std::error::Error) -> BrowseError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    BrowseError::Provider(message)
}

/// Whether a GetObject failure means the object or bucket does not exist.
fn is_not_found<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ServiceError(service_err) => matches!(
            service_err.err().code(),
            Some("NoSuchKey" | "NoSuchBucket")
        ),
        _ => false,
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<String>, BrowseError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(provider_error)?;

        let mut names: Vec<String> = output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(ToString::to_string))
            .collect();
        names.sort();
        debug!(count = names.len(), "listed buckets");
        Ok(names)
    }

    async fn list_objects(&self, bucket: &str, path: &str) -> Result<Listing, BrowseError> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .delimiter("/");
        if let Some(prefix) = listing_prefix(path) {
            request = request.prefix(prefix);
        }
        let output = request.send().await.map_err(provider_error)?;

        let mut keys: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(ToString::to_string))
            .collect();
        keys.sort();

        let mut prefixes: Vec<String> = output
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(ToString::to_string))
            .collect();
        prefixes.sort();

        debug!(
            bucket,
            path,
            keys = keys.len(),
            prefixes = prefixes.len(),
            "listed objects"
        );
        Ok(Listing { keys, prefixes })
    }

    async fn fetch_object(
        &self,
        bucket: &str,
        key: &str,
        scratch_dir: &Path,
    ) -> Result<ScratchObject, BrowseError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if is_not_found(&err) {
                    BrowseError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    provider_error(err)
                }
            })?;

        let scratch = ScratchObject::new(scratch_dir, key)?;
        let mut file = File::create(scratch.path()).await?;
        let mut body = output.body;
        let mut written: u64 = 0;
        while let Some(chunk) = body.try_next().await.map_err(provider_error)? {
            written += chunk.len() as u64;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!(bucket, key, bytes = written, "downloaded object to scratch");
        Ok(scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_prefix_empty_path_is_bucket_root() {
        assert_eq!(listing_prefix(""), None);
    }

    #[test]
    fn test_listing_prefix_appends_delimiter() {
        assert_eq!(listing_prefix("a/b"), Some("a/b/".to_string()));
        assert_eq!(listing_prefix("docs"), Some("docs/".to_string()));
    }

    #[test]
    fn test_provider_error_keeps_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = provider_error(inner);
        assert!(err.to_string().contains("refused"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_store_builds_with_custom_endpoint() {
        let config = StoreConfig {
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            endpoint_url: Some("http://localhost:4566".to_string()),
            region: default_region(),
        };
        let _store = S3Store::new(&config);
    }
}
