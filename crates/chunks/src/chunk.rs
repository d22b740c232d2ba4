use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

/// One parsed configuration directive.
///
/// Chunks are immutable once produced; merging builds new collections rather
/// than mutating existing chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chunk {
    /// Namespace made available to generated code
    NamespaceImport { name: String },

    /// Base type of the generated class; the template may contain the
    /// model-type placeholder (`TModel`)
    SetBaseType {
        type_name_template: String,
        location: SourceLocation,
    },

    /// Property activated/injected on the generated class; identity key is
    /// the property name
    Inject {
        type_name: String,
        property_name: String,
    },

    /// Tag-helper availability directive, applied in declaration order
    AddTagHelper { lookup: String },

    /// Tag-helper removal directive, applied in declaration order
    RemoveTagHelper { lookup: String },

    /// Any other directive; never inherited from ancestor files
    Opaque { payload: String },
}

impl Chunk {
    /// Create a namespace import chunk
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::NamespaceImport { name: name.into() }
    }

    /// Create a base-type chunk with a known source location
    pub fn base_type(template: impl Into<String>, location: SourceLocation) -> Self {
        Self::SetBaseType {
            type_name_template: template.into(),
            location,
        }
    }

    /// Create a property-injection chunk
    pub fn inject(type_name: impl Into<String>, property_name: impl Into<String>) -> Self {
        Self::Inject {
            type_name: type_name.into(),
            property_name: property_name.into(),
        }
    }

    /// Create a tag-helper add chunk
    pub fn add_tag_helper(lookup: impl Into<String>) -> Self {
        Self::AddTagHelper {
            lookup: lookup.into(),
        }
    }

    /// Create a tag-helper remove chunk
    pub fn remove_tag_helper(lookup: impl Into<String>) -> Self {
        Self::RemoveTagHelper {
            lookup: lookup.into(),
        }
    }

    /// Create an opaque chunk
    pub fn opaque(payload: impl Into<String>) -> Self {
        Self::Opaque {
            payload: payload.into(),
        }
    }

    /// The kind tag of this chunk
    #[must_use]
    pub const fn kind(&self) -> ChunkKind {
        match self {
            Self::NamespaceImport { .. } => ChunkKind::NamespaceImport,
            Self::SetBaseType { .. } => ChunkKind::SetBaseType,
            Self::Inject { .. } => ChunkKind::Inject,
            Self::AddTagHelper { .. } => ChunkKind::AddTagHelper,
            Self::RemoveTagHelper { .. } => ChunkKind::RemoveTagHelper,
            Self::Opaque { .. } => ChunkKind::Opaque,
        }
    }
}

/// Kind of configuration directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    NamespaceImport,
    SetBaseType,
    Inject,
    AddTagHelper,
    RemoveTagHelper,
    Opaque,
}

impl ChunkKind {
    /// Check whether chunks of this kind flow down from ancestor files and
    /// defaults. Opaque chunks only survive from the page's own tree.
    #[must_use]
    pub const fn inherits(self) -> bool {
        !matches!(self, Self::Opaque)
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NamespaceImport => "namespace_import",
            Self::SetBaseType => "set_base_type",
            Self::Inject => "inject",
            Self::AddTagHelper => "add_tag_helper",
            Self::RemoveTagHelper => "remove_tag_helper",
            Self::Opaque => "opaque",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Chunk::namespace("System").kind(), ChunkKind::NamespaceImport);
        assert_eq!(
            Chunk::base_type("Page<TModel>", SourceLocation::Undefined).kind(),
            ChunkKind::SetBaseType
        );
        assert_eq!(
            Chunk::inject("IHtmlHelper", "Html").kind(),
            ChunkKind::Inject
        );
        assert_eq!(Chunk::add_tag_helper("*, App").kind(), ChunkKind::AddTagHelper);
        assert_eq!(
            Chunk::remove_tag_helper("*, App").kind(),
            ChunkKind::RemoveTagHelper
        );
        assert_eq!(Chunk::opaque("@page").kind(), ChunkKind::Opaque);
    }

    #[test]
    fn only_opaque_is_non_inheriting() {
        assert!(ChunkKind::NamespaceImport.inherits());
        assert!(ChunkKind::SetBaseType.inherits());
        assert!(ChunkKind::Inject.inherits());
        assert!(ChunkKind::AddTagHelper.inherits());
        assert!(ChunkKind::RemoveTagHelper.inherits());
        assert!(!ChunkKind::Opaque.inherits());
    }

    #[test]
    fn default_base_type_suppresses_line_mapping() {
        let chunk = Chunk::base_type("Page<TModel>", SourceLocation::Undefined);
        let Chunk::SetBaseType { location, .. } = chunk else {
            panic!("expected SetBaseType");
        };
        assert!(location.is_undefined());
    }
}
