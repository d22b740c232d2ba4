use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque marker used to decide whether a cached parse must be redone.
///
/// Tokens are only ever compared for equality; any observable difference
/// (including a file appearing or disappearing) invalidates the cached
/// entry. Providers choose the cheapest variant they can compute reliably.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StalenessToken {
    /// The file does not exist
    Missing,

    /// Filesystem metadata fingerprint
    Metadata { len: u64, mtime_ms: u64 },

    /// Content fingerprint, for providers without stable metadata
    Content { fingerprint: u64, len: u64 },
}

impl StalenessToken {
    /// Token for in-memory or metadata-less content
    #[must_use]
    pub fn for_content(bytes: &[u8]) -> Self {
        Self::Content {
            fingerprint: content_fingerprint(bytes),
            len: bytes.len() as u64,
        }
    }

    /// Check whether this token marks a missing file
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Stable 64-bit fingerprint of raw content
#[must_use]
pub fn content_fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ])
}
