use crate::error::Result;
use crate::tree::{ChunkTree, TreeOrigin};

/// Parses raw template or import-file content into a chunk tree.
///
/// The same parser is used for page content and ancestor import files. Parsing
/// is CPU-bound and synchronous; callers that need it off a latency-sensitive
/// thread run it on a worker task.
pub trait TemplateParser: Send + Sync {
    /// Parse `content` originating from `origin` into an ordered chunk tree.
    fn parse(&self, origin: TreeOrigin, content: &[u8]) -> Result<ChunkTree>;
}
