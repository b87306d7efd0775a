//! Blob storage seam for transfer images.
//!
//! The hosted blob service is consumed as an opaque interface; the local
//! filesystem implementation covers single-node deployments and tests.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result};

/// Opaque blob storage used for transfer images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores a blob under `name` and returns the URL recorded on the
    /// transfer record.
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String>;

    /// Deletes the blob addressed by a previously returned URL.
    async fn delete(&self, url: &str) -> Result<()>;
}

/// Filesystem-backed blob store rooted at one uploads directory.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, url: &str) -> Result<PathBuf> {
        let relative = url.strip_prefix("file://").unwrap_or(url);
        let name = Path::new(relative)
            .file_name()
            .ok_or_else(|| Error::Storage(format!("Invalid blob url: {}", url)))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let path = self.path_for(name)?;
        fs::write(&path, bytes)?;
        debug!("Stored blob {} ({} bytes)", path.display(), bytes.len());
        Ok(format!("file://{}", path.display()))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let path = self.path_for(url)?;
        fs::remove_file(&path)?;
        debug!("Deleted blob {}", path.display());
        Ok(())
    }
}
