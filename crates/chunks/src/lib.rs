//! # Pagegen Chunks
//!
//! Typed configuration directives ("chunks") for page compilation.
//!
//! A page's effective configuration is assembled from directive chunks that
//! come from three places: built-in defaults, ancestor import files, and the
//! page's own content. This crate owns the chunk model itself:
//!
//! ```text
//! Template / import file text
//!     │
//!     ├──> TemplateParser (trait; DirectiveParser is the built-in one)
//!     │
//!     └──> ChunkTree
//!          ├─> ordered Chunk sequence
//!          └─> TreeOrigin (which file the chunks came from)
//! ```
//!
//! Chunks are immutable once produced. Built-in defaults carry
//! [`SourceLocation::Undefined`] so diagnostics never point at a file that
//! does not exist.

mod chunk;
mod directive_parser;
mod error;
mod location;
mod parser;
mod tree;

pub use chunk::{Chunk, ChunkKind};
pub use directive_parser::DirectiveParser;
pub use error::{ChunkError, Result};
pub use location::SourceLocation;
pub use parser::TemplateParser;
pub use tree::{ChunkTree, TreeOrigin};
