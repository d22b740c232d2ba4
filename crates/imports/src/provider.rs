use crate::error::Result;
use crate::identity::ImportIdentity;
use crate::staleness::StalenessToken;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of raw file content for import resolution.
///
/// The core never performs raw filesystem calls; everything goes through
/// this trait so hosts can virtualize the file tree (editor buffers,
/// archives, tests).
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Check whether `identity` currently exists
    async fn exists(&self, identity: &ImportIdentity) -> Result<bool>;

    /// Current staleness token for `identity` (`Missing` if absent)
    async fn staleness_token(&self, identity: &ImportIdentity) -> Result<StalenessToken>;

    /// Read the full content of `identity`
    async fn read(&self, identity: &ImportIdentity) -> Result<Vec<u8>>;
}

/// Provider backed by a directory on disk.
///
/// Identities map to paths below `base`; staleness tokens come from file
/// metadata (length + mtime).
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    base: PathBuf,
}

impl FsContentProvider {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn disk_path(&self, identity: &ImportIdentity) -> PathBuf {
        self.base.join(identity.relative_str())
    }
}

#[async_trait]
impl ContentProvider for FsContentProvider {
    async fn exists(&self, identity: &ImportIdentity) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.disk_path(identity)).await?)
    }

    async fn staleness_token(&self, identity: &ImportIdentity) -> Result<StalenessToken> {
        match tokio::fs::metadata(self.disk_path(identity)).await {
            Ok(meta) => Ok(StalenessToken::Metadata {
                len: meta.len(),
                mtime_ms: mtime_ms(meta.modified().ok()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StalenessToken::Missing),
            Err(e) => Err(e.into()),
        }
    }

    async fn read(&self, identity: &ImportIdentity) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.disk_path(identity)).await?)
    }
}

fn mtime_ms(modified: Option<SystemTime>) -> u64 {
    modified
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// In-memory provider with mutable content.
///
/// Used by hosts that compile from virtual trees and by tests that need to
/// simulate file edits between compiles. Staleness tokens are content
/// fingerprints, so any write with different bytes invalidates cached
/// parses.
#[derive(Debug, Default)]
pub struct MemoryContentProvider {
    files: RwLock<HashMap<ImportIdentity, Vec<u8>>>,
}

impl MemoryContentProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file
    pub fn write(&self, identity: &ImportIdentity, content: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(identity.clone(), content.into());
    }

    /// Remove a file; subsequent lookups observe `Missing`
    pub fn remove(&self, identity: &ImportIdentity) {
        self.files
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(identity);
    }

    fn with_file<T>(&self, identity: &ImportIdentity, f: impl FnOnce(Option<&Vec<u8>>) -> T) -> T {
        let files = self
            .files
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(files.get(identity))
    }
}

#[async_trait]
impl ContentProvider for MemoryContentProvider {
    async fn exists(&self, identity: &ImportIdentity) -> Result<bool> {
        Ok(self.with_file(identity, |f| f.is_some()))
    }

    async fn staleness_token(&self, identity: &ImportIdentity) -> Result<StalenessToken> {
        Ok(self.with_file(identity, |f| {
            f.map_or(StalenessToken::Missing, |bytes| {
                StalenessToken::for_content(bytes)
            })
        }))
    }

    async fn read(&self, identity: &ImportIdentity) -> Result<Vec<u8>> {
        self.with_file(identity, |f| {
            f.cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, identity.to_string()).into()
            })
        })
    }
}
