use pagegen_chunks::{Chunk, ChunkKind, ChunkTree, SourceLocation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How chunks of one kind combine across layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Accumulate, de-duplicated by value; first occurrence keeps its
    /// position
    Accumulate,

    /// Each later layer's declaration replaces the prior one in full
    LastWins,

    /// Last-wins per key; a replaced entry keeps its original position and
    /// substitutes its value
    KeyedLastWins,

    /// Accumulate as an ordered log, preserved across layers, handed to
    /// code generation unresolved
    OrderedLog,

    /// Never contributed by ancestor layers or defaults
    PageOnly,
}

/// The merge-policy table. Adding a directive kind means adding one entry
/// here and one arm in [`fold_layer`].
#[must_use]
pub const fn merge_policy(kind: ChunkKind) -> MergePolicy {
    match kind {
        ChunkKind::NamespaceImport => MergePolicy::Accumulate,
        ChunkKind::SetBaseType => MergePolicy::LastWins,
        ChunkKind::Inject => MergePolicy::KeyedLastWins,
        ChunkKind::AddTagHelper | ChunkKind::RemoveTagHelper => MergePolicy::OrderedLog,
        ChunkKind::Opaque => MergePolicy::PageOnly,
    }
}

/// Effective base-type declaration after merging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseType {
    /// Type name, possibly containing the model placeholder
    pub type_name_template: String,

    /// Where the winning declaration came from
    pub location: SourceLocation,
}

/// Effective injected property after merging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InjectedProperty {
    pub property_name: String,
    pub type_name: String,
}

/// Direction of a tag-helper directive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagHelperAction {
    Add,
    Remove,
}

/// One entry in the unresolved tag-helper log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagHelperDirective {
    pub action: TagHelperAction,
    pub lookup: String,
}

/// The fully merged configuration for one page.
///
/// Never cached; rebuilt per compilation and consumed exactly once by the
/// code generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectiveChunkTree {
    /// Namespaces in first-occurrence order, duplicates removed
    pub namespaces: Vec<String>,

    /// Winning base-type declaration, if any layer set one
    pub base_type: Option<BaseType>,

    /// Injected properties in first-introduction order
    pub injected_properties: Vec<InjectedProperty>,

    /// Tag-helper directives in declaration order across all layers; add
    /// versus remove resolution belongs to the tag-helper catalog
    pub tag_helper_log: Vec<TagHelperDirective>,

    /// Opaque directive payloads from the page's own tree, in order
    pub opaque: Vec<String>,
}

/// Fold defaults, ancestor trees (root-to-page order), and the page's own
/// tree into one effective tree. The page layer always applies last.
#[must_use]
pub fn merge(
    defaults: &ChunkTree,
    ancestors: &[Arc<ChunkTree>],
    page: &ChunkTree,
) -> EffectiveChunkTree {
    let mut effective = EffectiveChunkTree::default();
    fold_layer(&mut effective, defaults, false);
    for tree in ancestors {
        fold_layer(&mut effective, tree, false);
    }
    fold_layer(&mut effective, page, true);
    log::trace!(
        "merged {} ancestor layer(s): {} namespace(s), {} injection(s), {} tag-helper entr(ies)",
        ancestors.len(),
        effective.namespaces.len(),
        effective.injected_properties.len(),
        effective.tag_helper_log.len()
    );
    effective
}

// Each arm implements the policy `merge_policy` declares for that kind.
fn fold_layer(effective: &mut EffectiveChunkTree, tree: &ChunkTree, is_page_layer: bool) {
    for chunk in tree {
        match chunk {
            Chunk::NamespaceImport { name } => {
                if !effective.namespaces.iter().any(|n| n == name) {
                    effective.namespaces.push(name.clone());
                }
            }
            Chunk::SetBaseType {
                type_name_template,
                location,
            } => {
                effective.base_type = Some(BaseType {
                    type_name_template: type_name_template.clone(),
                    location: *location,
                });
            }
            Chunk::Inject {
                type_name,
                property_name,
            } => {
                match effective
                    .injected_properties
                    .iter_mut()
                    .find(|p| p.property_name == *property_name)
                {
                    Some(existing) => existing.type_name = type_name.clone(),
                    None => effective.injected_properties.push(InjectedProperty {
                        property_name: property_name.clone(),
                        type_name: type_name.clone(),
                    }),
                }
            }
            Chunk::AddTagHelper { lookup } => {
                effective.tag_helper_log.push(TagHelperDirective {
                    action: TagHelperAction::Add,
                    lookup: lookup.clone(),
                });
            }
            Chunk::RemoveTagHelper { lookup } => {
                effective.tag_helper_log.push(TagHelperDirective {
                    action: TagHelperAction::Remove,
                    lookup: lookup.clone(),
                });
            }
            Chunk::Opaque { payload } => {
                if is_page_layer {
                    effective.opaque.push(payload.clone());
                }
            }
        }
    }
}
