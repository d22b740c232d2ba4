use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, comparable file or directory identity.
///
/// Identities are rooted slash-separated paths with no `.`/`..` segments, no
/// empty segments, and no trailing slash (except the root `/` itself). They
/// are pure keys: nothing here touches the filesystem. Passing an
/// unnormalized path to [`ImportIdentity::new`] is a caller error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportIdentity(String);

impl ImportIdentity {
    /// Validate and wrap a normalized path
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if !is_normalized(&raw) {
            return Err(ImportError::UnnormalizedIdentity(raw));
        }
        Ok(Self(raw))
    }

    /// The identity as a normalized path string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity of the containing directory, or `None` at the root
    #[must_use]
    pub fn parent_dir(&self) -> Option<Self> {
        if self.0 == "/" {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self("/".to_string())),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Append a single file name to a directory identity.
    ///
    /// `name` must be a bare segment (no slashes); the probe file name used
    /// by the ancestor resolver always is.
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        debug_assert!(!name.is_empty() && !name.contains('/'));
        if self.0 == "/" {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// Check whether this identity lies within directory `dir` (inclusive)
    #[must_use]
    pub fn is_within(&self, dir: &Self) -> bool {
        if dir.0 == "/" {
            return true;
        }
        self.0 == dir.0 || self.0.starts_with(&format!("{}/", dir.0))
    }

    /// Relative path below `base`, used by filesystem-backed providers
    #[must_use]
    pub(crate) fn relative_str(&self) -> &str {
        self.0.trim_start_matches('/')
    }
}

impl fmt::Display for ImportIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_normalized(raw: &str) -> bool {
    if raw == "/" {
        return true;
    }
    if !raw.starts_with('/') || raw.ends_with('/') || raw.contains('\\') {
        return false;
    }
    raw.split('/')
        .skip(1)
        .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
