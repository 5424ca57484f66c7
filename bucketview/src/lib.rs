//! bucketview - browse S3-compatible object storage from a web browser
//!
//! Lists buckets, lists objects and common prefixes under a bucket/path
//! (directory emulation over a flat key space), and serves individual
//! objects back as file downloads.

pub mod config;
pub mod handlers;
pub mod router;
pub mod views;
