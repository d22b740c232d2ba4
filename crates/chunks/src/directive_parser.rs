use crate::chunk::Chunk;
use crate::error::{ChunkError, Result};
use crate::location::SourceLocation;
use crate::parser::TemplateParser;
use crate::tree::{ChunkTree, TreeOrigin};

/// Line-oriented directive parser.
///
/// Recognizes one directive per line:
///
/// ```text
/// @using App.Models
/// @inherits Page<TModel>
/// @inject IHtmlHelper Html
/// @addTagHelper *, App.TagHelpers
/// @removeTagHelper *, Legacy.TagHelpers
/// ```
///
/// Blank lines and `@* ... *@` comment lines are skipped. Any other non-empty
/// line becomes an [`Chunk::Opaque`] chunk so page-local content survives into
/// the page's own tree. A recognized directive with missing or malformed
/// arguments is a parse error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveParser;

impl DirectiveParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Option<Chunk>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.starts_with("@*") && trimmed.ends_with("*@") {
            return Ok(None);
        }

        if let Some(rest) = strip_directive(trimmed, "@using") {
            let name = require_single_token(rest, line_no, "@using expects a namespace name")?;
            return Ok(Some(Chunk::namespace(name)));
        }
        if let Some(rest) = strip_directive(trimmed, "@inherits") {
            let rest = rest.trim();
            if rest.is_empty() {
                return Err(ChunkError::malformed(
                    line_no,
                    "@inherits expects a type name",
                ));
            }
            return Ok(Some(Chunk::base_type(rest, SourceLocation::line(line_no))));
        }
        if let Some(rest) = strip_directive(trimmed, "@inject") {
            let mut parts = rest.trim().split_whitespace();
            let (Some(type_name), Some(property_name), None) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ChunkError::malformed(
                    line_no,
                    "@inject expects a type name and a property name",
                ));
            };
            return Ok(Some(Chunk::inject(type_name, property_name)));
        }
        if let Some(rest) = strip_directive(trimmed, "@addTagHelper") {
            let lookup = require_lookup(rest, line_no, "@addTagHelper")?;
            return Ok(Some(Chunk::add_tag_helper(lookup)));
        }
        if let Some(rest) = strip_directive(trimmed, "@removeTagHelper") {
            let lookup = require_lookup(rest, line_no, "@removeTagHelper")?;
            return Ok(Some(Chunk::remove_tag_helper(lookup)));
        }

        Ok(Some(Chunk::opaque(trimmed)))
    }
}

impl TemplateParser for DirectiveParser {
    fn parse(&self, origin: TreeOrigin, content: &[u8]) -> Result<ChunkTree> {
        let text = std::str::from_utf8(content).map_err(|_| ChunkError::InvalidEncoding)?;

        let mut chunks = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some(chunk) = Self::parse_line(line, idx + 1)? {
                chunks.push(chunk);
            }
        }
        log::trace!(
            "parsed {} chunks from {}",
            chunks.len(),
            origin.display()
        );
        Ok(ChunkTree::new(origin, chunks))
    }
}

/// Match a directive keyword at a token boundary; `@usingFoo` is not a
/// `@using` directive.
fn strip_directive<'a>(line: &'a str, directive: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(directive)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

fn require_single_token(rest: &str, line_no: usize, message: &str) -> Result<String> {
    let mut parts = rest.trim().split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token.to_string()),
        _ => Err(ChunkError::malformed(line_no, message)),
    }
}

fn require_lookup(rest: &str, line_no: usize, directive: &str) -> Result<String> {
    let lookup = rest.trim();
    if lookup.is_empty() {
        return Err(ChunkError::malformed(
            line_no,
            format!("{directive} expects a lookup expression"),
        ));
    }
    Ok(lookup.to_string())
}
