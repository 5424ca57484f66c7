//! Test doubles for bucketview
//!
//! Two substitutes for real object storage:
//! - [`MemoryStore`] implements the `ObjectStore` trait directly, for
//!   exercising services and HTTP handlers without any network I/O.
//! - [`FakeS3`] is a minimal S3-compatible HTTP endpoint, for
//!   exercising the real SDK-backed client end to end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bucketview_test::FakeS3;
//!
//! #[tokio::test]
//! async fn test_against_fake_endpoint() {
//!     let fake = FakeS3::new();
//!     fake.create_bucket("docs");
//!     fake.put_object("docs", "a/b.txt", "hello");
//!
//!     let addr = fake.serve().await.unwrap();
//!     println!("fake S3 at http://{addr}");
//! }
//! ```

pub mod fake;
pub mod store;
pub mod xml;

pub use fake::FakeS3;
pub use store::MemoryStore;
