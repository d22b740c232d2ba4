use serde::{Deserialize, Serialize};

/// Position of a directive within its source file.
///
/// Built-in default chunks do not exist in any file; they carry
/// [`SourceLocation::Undefined`], which suppresses line mapping in
/// diagnostics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceLocation {
    /// No source position (synthetic chunk)
    #[default]
    Undefined,

    /// Line/column within the originating file (both 1-indexed)
    At { line: usize, column: usize },
}

impl SourceLocation {
    /// Location at the start of a 1-indexed line
    #[must_use]
    pub const fn line(line: usize) -> Self {
        Self::At { line, column: 1 }
    }

    /// Check whether this is the synthetic sentinel
    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}
