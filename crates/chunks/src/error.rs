use thiserror::Error;

/// Result type for chunk parsing operations
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors produced while turning raw template content into chunks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A directive line was recognized but its arguments are malformed
    #[error("malformed directive at line {line}: {message}")]
    MalformedDirective { line: usize, message: String },

    /// Content is not valid UTF-8
    #[error("invalid UTF-8 in template content")]
    InvalidEncoding,

    /// The source exists but could not be read
    #[error("unreadable source: {0}")]
    UnreadableSource(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ChunkError {
    /// Create a malformed-directive error
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedDirective {
            line,
            message: message.into(),
        }
    }

    /// Create an unreadable-source error
    pub fn unreadable(msg: impl Into<String>) -> Self {
        Self::UnreadableSource(msg.into())
    }
}
