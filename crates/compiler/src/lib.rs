//! # Pagegen Compiler
//!
//! Inheritance merge and compilation driving for page templates.
//!
//! ## Pipeline
//!
//! ```text
//! (page identity, raw content)
//!     │
//!     ├──> TemplateParser → page chunk tree (parse errors are fatal)
//!     │
//!     ├──> ChainResolver → ancestor trees, root-to-page order
//!     │
//!     ├──> merge(defaults, ancestors, page) → EffectiveChunkTree
//!     │
//!     └──> CodeGenerator(effective tree, naming context)
//!            └─> GeneratedOutput + diagnostics
//! ```
//!
//! The merge is a pure fold with per-kind policy: namespaces accumulate
//! (de-duplicated, first occurrence wins the position), base type and keyed
//! injections are last-wins (closer layers beat farther ones), tag-helper
//! directives accumulate as an ordered log, and opaque chunks survive only
//! from the page's own tree. For a fixed filesystem state the result is
//! byte-identical across compiles.

mod compiler;
mod defaults;
mod diagnostics;
mod error;
mod generate;
mod merge;
mod naming;

pub use compiler::{CompileOutcome, PageCompiler, SessionOptions};
pub use defaults::standard_defaults;
pub use diagnostics::{Diagnostic, Severity};
pub use error::{CompileError, Result};
pub use generate::{CodeGenerator, GeneratedOutput, SummaryGenerator};
pub use merge::{
    merge, merge_policy, BaseType, EffectiveChunkTree, InjectedProperty, MergePolicy,
    TagHelperAction, TagHelperDirective,
};
pub use naming::{resolve_base_type, sanitize_class_name, NamingContext, MODEL_PLACEHOLDER};
