use crate::merge::{EffectiveChunkTree, TagHelperAction};
use crate::naming::{resolve_base_type, NamingContext};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Emits target-language source for one merged page configuration
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, tree: &EffectiveChunkTree, naming: &NamingContext) -> GeneratedOutput;
}

/// Result of code generation for one page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Name of the generated class
    pub class_name: String,

    /// Generated source text
    pub source_text: String,
}

/// Reference generator that renders the effective configuration as a class
/// skeleton.
///
/// The rendering is deterministic: the same effective tree and naming
/// context always produce byte-identical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryGenerator;

impl SummaryGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SummaryGenerator {
    fn generate(&self, tree: &EffectiveChunkTree, naming: &NamingContext) -> GeneratedOutput {
        let mut out = String::new();

        let _ = writeln!(out, "namespace {};", naming.namespace);
        out.push('\n');

        for namespace in &tree.namespaces {
            let _ = writeln!(out, "using {namespace};");
        }
        if !tree.namespaces.is_empty() {
            out.push('\n');
        }

        match &tree.base_type {
            Some(base) => {
                let resolved =
                    resolve_base_type(&base.type_name_template, naming.model_type.as_deref());
                let _ = writeln!(out, "class {} : {resolved}", naming.class_name);
            }
            None => {
                let _ = writeln!(out, "class {}", naming.class_name);
            }
        }
        out.push_str("{\n");
        for property in &tree.injected_properties {
            let _ = writeln!(
                out,
                "    [Inject] public {} {} {{ get; set; }}",
                property.type_name, property.property_name
            );
        }
        out.push_str("}\n");

        if !tree.tag_helper_log.is_empty() {
            out.push('\n');
            out.push_str("// tag helpers:\n");
            for entry in &tree.tag_helper_log {
                let sign = match entry.action {
                    TagHelperAction::Add => '+',
                    TagHelperAction::Remove => '-',
                };
                let _ = writeln!(out, "// {sign} {}", entry.lookup);
            }
        }

        GeneratedOutput {
            class_name: naming.class_name.clone(),
            source_text: out,
        }
    }
}
