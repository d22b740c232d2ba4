use thiserror::Error;

/// Result type for import resolution operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors surfaced by import resolution.
///
/// `UnnormalizedIdentity` and `OutsideRoot` signal caller contract
/// violations and are always fatal. Ancestor parse failures are not errors
/// at this level; they travel as [`crate::ChainFailure`] diagnostics.
#[derive(Error, Debug)]
pub enum ImportError {
    /// IO error from the content provider
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The supplied identity is not a normalized path
    #[error("identity is not normalized: {0}")]
    UnnormalizedIdentity(String),

    /// The page lies outside the configured application root
    #[error("page {page} is outside the application root {root}")]
    OutsideRoot { page: String, root: String },
}
