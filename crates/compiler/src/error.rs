use pagegen_chunks::ChunkError;
use pagegen_imports::ImportError;
use thiserror::Error;

/// Result type for page compilation
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors that abort a page's compilation.
///
/// Ancestor parse failures never appear here; they ride along as
/// diagnostics on a successful outcome. A parse error in the page's own
/// content is fatal to that page, as are caller contract violations
/// surfaced by import resolution.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The page's own content failed to parse
    #[error("page failed to parse: {0}")]
    PageParse(#[source] ChunkError),

    /// Import resolution failed (contract violation or provider IO)
    #[error("import resolution failed: {0}")]
    Imports(#[from] ImportError),
}
