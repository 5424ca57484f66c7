//! Core types for bucketview
//!
//! This crate provides the object-key codec and the error taxonomy shared
//! by the storage adapter and the HTTP front-end.

pub mod error;
pub mod keys;

pub use error::BrowseError;
