//! Storage module for local persistence
//!
//! Provides the key-value blob store the report collection, notification
//! log, saved views, and user roster are snapshotted into.

mod blob_store;

pub use blob_store::{BlobStore, FileBlobStore, MemoryBlobStore};
