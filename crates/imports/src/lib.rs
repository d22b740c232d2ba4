//! # Pagegen Imports
//!
//! Ancestor import-file resolution for page compilation.
//!
//! ## Pipeline
//!
//! ```text
//! Page identity
//!     │
//!     ├──> Ancestor chain (pure directory walk, root → page)
//!     │      └─> one probe identity per directory level
//!     │
//!     ├──> Chunk tree cache (shared across concurrent compiles)
//!     │      ├─> staleness revalidation per request
//!     │      └─> at-most-one in-flight parse per identity
//!     │
//!     └──> Resolved chain (trees in root-to-page order + failures)
//! ```
//!
//! The cache never touches the filesystem directly; all access goes through
//! the [`ContentProvider`] trait.

mod cache;
mod chain;
mod error;
mod identity;
mod provider;
mod staleness;
mod stats;

pub use cache::{ChunkTreeCache, Resolved};
pub use chain::{ancestor_import_identities, ChainFailure, ChainResolver, ResolvedChain};
pub use error::{ImportError, Result};
pub use identity::ImportIdentity;
pub use provider::{ContentProvider, FsContentProvider, MemoryContentProvider};
pub use staleness::{content_fingerprint, StalenessToken};
pub use stats::CacheStats;
