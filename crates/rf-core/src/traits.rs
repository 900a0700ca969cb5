//! # Core Traits (Ports)
//!
//! Any persistence plugin must implement these traits to back a [`crate::Forum`].

use crate::error::Result;

/// Named-blob persistence contract (browser local storage, a directory of
/// files, an in-memory map).
///
/// Writes replace the whole blob; there are no partial updates.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait BlobStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if nothing was ever written.
    fn read_blob(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn write_blob(&self, key: &str, blob: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        (**self).read_blob(key)
    }

    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write_blob(key, blob)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        (**self).read_blob(key)
    }

    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write_blob(key, blob)
    }
}
