use pagegen_chunks::{Chunk, ChunkTree, SourceLocation, TreeOrigin};

/// Stock built-in default chunk set.
///
/// Hosts pass their own defaults to [`crate::PageCompiler`]; this is the
/// set a plain host starts from. Defaults are the lowest-precedence layer
/// and carry no source locations.
#[must_use]
pub fn standard_defaults() -> ChunkTree {
    ChunkTree::new(
        TreeOrigin::builtin("<defaults>"),
        vec![
            Chunk::namespace("System"),
            Chunk::namespace("System.Collections.Generic"),
            Chunk::base_type("Page<TModel>", SourceLocation::Undefined),
            Chunk::inject("IHtmlHelper", "Html"),
            Chunk::add_tag_helper("*, Pagegen.TagHelpers"),
        ],
    )
}
