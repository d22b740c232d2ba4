use crate::chunk::Chunk;
use serde::{Deserialize, Serialize};

/// Where a chunk tree's directives came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeOrigin {
    /// Parsed from a file, identified by its normalized path
    File { path: String },

    /// Synthetic tree (built-in defaults), identified by a label
    Builtin { label: String },
}

impl TreeOrigin {
    /// Origin for a parsed file
    pub fn file(path: impl Into<String>) -> Self {
        Self::File { path: path.into() }
    }

    /// Origin for a synthetic built-in tree
    pub fn builtin(label: impl Into<String>) -> Self {
        Self::Builtin {
            label: label.into(),
        }
    }

    /// Display form used in diagnostics
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::File { path } => path,
            Self::Builtin { label } => label,
        }
    }
}

/// Ordered sequence of chunks parsed from one source.
///
/// Ordering is significant and preserved through caching and merging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkTree {
    origin: TreeOrigin,
    chunks: Vec<Chunk>,
}

impl ChunkTree {
    /// Create a tree from parsed chunks
    #[must_use]
    pub const fn new(origin: TreeOrigin, chunks: Vec<Chunk>) -> Self {
        Self { origin, chunks }
    }

    /// Create an empty tree for a source that contributes nothing
    #[must_use]
    pub const fn empty(origin: TreeOrigin) -> Self {
        Self {
            origin,
            chunks: Vec::new(),
        }
    }

    /// The source this tree was parsed from
    #[must_use]
    pub const fn origin(&self) -> &TreeOrigin {
        &self.origin
    }

    /// The chunks in declaration order
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check whether the tree holds no chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate the chunks in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }
}

impl<'a> IntoIterator for &'a ChunkTree {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
