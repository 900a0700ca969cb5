//! # rf-store-local
//! rusty-forum/crates/rf-plugins/rf-store-local/src/lib.rs
//! Local implementations of `BlobStore`.
//! Features: hash-sharded file layout, atomic replace on write, and an in-memory map.

use dashmap::DashMap;
use rf_core::error::{AppError, Result};
use rf_core::traits::BlobStore;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Stores each blob as a file under `root_path`.
pub struct LocalBlobStore {
    /// Root directory for all blobs (e.g., "./data/forum")
    root_path: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root_path: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Generates a sharded path: "ab/abcdef...hash.json"
    ///
    /// Keys are hashed so any key string maps to a safe file name.
    fn get_sharded_path(&self, key: &str) -> PathBuf {
        let hash = hex::encode(Sha256::digest(key.as_bytes()));
        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(format!("{hash}.json"));
        path
    }
}

fn storage_err(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Storage(format!("{context}: {err}"))
}

impl BlobStore for LocalBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        let path = self.get_sharded_path(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_err(&format!("reading {}", path.display()), err)),
        }
    }

    /// Writes to a temp file beside the target, then renames it into place,
    /// so a crash mid-write never leaves a truncated snapshot behind.
    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        let target_path = self.get_sharded_path(key);
        let parent = target_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root_path.clone());

        fs::create_dir_all(&parent).map_err(|e| storage_err("creating shard directory", e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| storage_err("creating temp file", e))?;
        tmp.write_all(blob.as_bytes())
            .map_err(|e| storage_err("writing temp file", e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| storage_err("syncing temp file", e))?;
        tmp.persist(&target_path)
            .map_err(|e| storage_err(&format!("replacing {}", target_path.display()), e))?;

        tracing::trace!(key, path = %target_path.display(), "blob written");
        Ok(())
    }
}

/// Process-local store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).map(|entry| entry.value().clone()))
    }

    fn write_blob(&self, key: &str, blob: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
