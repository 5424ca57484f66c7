//! Minimal S3-compatible HTTP endpoint
//!
//! Serves just enough of the S3 wire protocol for the SDK-backed client:
//! ListBuckets, ListObjectsV2 with a `/` delimiter, and GetObject.
//! Listings are returned in map iteration order, deliberately unsorted,
//! so adapter-side sorting is actually exercised.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use dashmap::DashMap;
use md5::{Digest, Md5};
use tracing::info;

use crate::xml;

/// Shared fake S3 state; cloning shares the same buckets.
#[derive(Debug, Clone, Default)]
pub struct FakeS3 {
    buckets: Arc<DashMap<String, DashMap<String, Bytes>>>,
}

impl FakeS3 {
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

    /// Bind to an ephemeral localhost port and serve in the background.
    pub async fn serve(&self) -> std::io::Result<SocketAddr> {
        let app = Router::new()
            .route("/", get(list_buckets))
            .route("/:bucket", get(list_objects))
            .route("/:bucket/", get(list_objects))
            .route("/:bucket/*key", get(get_object))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        info!(%addr, "fake S3 listening");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(addr)
    }
}

fn etag(body: &Bytes) -> String {
    let mut hasher = Md5::new();
    hasher.update(body);
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

async fn list_buckets(State(fake): State<FakeS3>) -> Response {
    let names: Vec<String> = fake.buckets.iter().map(|e| e.key().clone()).collect();
    xml_response(StatusCode::OK, xml::format_list_buckets(&names))
}

async fn list_objects(
    State(fake): State<FakeS3>,
    Path(bucket): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(objects) = fake.buckets.get(&bucket) else {
        return xml_response(
            StatusCode::NOT_FOUND,
            xml::format_error(
                "NoSuchBucket",
                "The specified bucket does not exist",
                &bucket,
            ),
        );
    };

    let prefix = params.get("prefix").cloned().unwrap_or_default();
    let delimiter = params.get("delimiter").cloned();

    let mut entries = Vec::new();
    let mut common_prefixes = Vec::new();

    for entry in objects.iter() {
        let key = entry.key();
        if !key.starts_with(&prefix) {
            continue;
        }

        let suffix = &key[prefix.len()..];
        if let Some(delim) = &delimiter {
            if let Some(pos) = suffix.find(delim.as_str()) {
                let common = format!("{prefix}{}", &suffix[..pos + delim.len()]);
                if !common_prefixes.contains(&common) {
                    common_prefixes.push(common);
                }
                continue;
            }
        }

        entries.push(xml::ObjectEntry {
            key: key.clone(),
            size: entry.value().len(),
            etag: etag(entry.value()),
        });
    }

    xml_response(
        StatusCode::OK,
        xml::format_list_objects(&bucket, &prefix, &entries, &common_prefixes),
    )
}

async fn get_object(
    State(fake): State<FakeS3>,
    Path((bucket, key)): Path<(String, String)>,
) -> Response {
    let body = fake
        .buckets
        .get(&bucket)
        .and_then(|objects| objects.get(&key).map(|entry| entry.value().clone()));

    match body {
        Some(body) => {
            let etag = etag(&body);
            (
                StatusCode::OK,
                [
                    (header::ETAG, etag),
                    (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                ],
                body,
            )
                .into_response()
        }
        None => xml_response(
            StatusCode::NOT_FOUND,
            xml::format_error(
                "NoSuchKey",
                "The specified key does not exist.",
                &format!("/{bucket}/{key}"),
            ),
        ),
    }
}
