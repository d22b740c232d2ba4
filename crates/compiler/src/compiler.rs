use crate::diagnostics::Diagnostic;
use crate::error::{CompileError, Result};
use crate::generate::{CodeGenerator, GeneratedOutput};
use crate::merge::merge;
use crate::naming::NamingContext;
use pagegen_chunks::{ChunkTree, TemplateParser, TreeOrigin};
use pagegen_imports::{
    CacheStats, ChainResolver, ChunkTreeCache, ContentProvider, ImportIdentity,
};
use std::sync::Arc;

/// Session-wide compilation settings, fixed at construction
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Application root directory; ancestors above it are never probed
    pub root_dir: ImportIdentity,

    /// Fixed import-file name probed at every directory level
    pub import_file_name: String,

    /// Namespace of generated classes
    pub target_namespace: String,

    /// Model type substituted into base-type templates, if known
    pub model_type: Option<String>,
}

impl SessionOptions {
    pub fn new(root_dir: ImportIdentity, target_namespace: impl Into<String>) -> Self {
        Self {
            root_dir,
            import_file_name: "_imports.pg".to_string(),
            target_namespace: target_namespace.into(),
            model_type: None,
        }
    }

    #[must_use]
    pub fn import_file_name(mut self, name: impl Into<String>) -> Self {
        self.import_file_name = name.into();
        self
    }

    #[must_use]
    pub fn model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }
}

/// Result of compiling one page
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutcome {
    pub output: GeneratedOutput,

    /// Non-fatal findings (ancestor parse failures, in chain order)
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-session compilation facade.
///
/// Constructed once with all collaborators injected explicitly, then shared
/// across concurrent page compilations; the chunk tree cache inside is the
/// only shared mutable state.
pub struct PageCompiler {
    resolver: ChainResolver,
    parser: Arc<dyn TemplateParser>,
    generator: Arc<dyn CodeGenerator>,
    defaults: ChunkTree,
    options: SessionOptions,
}

impl PageCompiler {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        parser: Arc<dyn TemplateParser>,
        generator: Arc<dyn CodeGenerator>,
        defaults: ChunkTree,
        options: SessionOptions,
    ) -> Self {
        let cache = ChunkTreeCache::new(provider, parser.clone());
        let resolver = ChainResolver::new(
            cache,
            options.root_dir.clone(),
            options.import_file_name.clone(),
        );
        Self {
            resolver,
            parser,
            generator,
            defaults,
            options,
        }
    }

    /// Compile one page from raw content.
    ///
    /// A parse error in the page's own content is fatal and becomes the sole
    /// result. Ancestor parse failures are reported as diagnostics alongside
    /// the generated output. The effective tree is rebuilt per call and
    /// consumed exactly once by the generator.
    pub async fn compile(&self, page: &ImportIdentity, content: &[u8]) -> Result<CompileOutcome> {
        let page_tree = self
            .parser
            .parse(TreeOrigin::file(page.as_str()), content)
            .map_err(CompileError::PageParse)?;

        let chain = self.resolver.resolve(page).await?;
        let effective = merge(&self.defaults, &chain.trees, &page_tree);

        let naming = NamingContext::for_page(
            page,
            &self.options.target_namespace,
            self.options.model_type.clone(),
        );
        let output = self.generator.generate(&effective, &naming);

        let diagnostics: Vec<Diagnostic> = chain.failures.iter().map(Diagnostic::from).collect();
        log::debug!(
            "compiled {page}: {} byte(s) generated, {} diagnostic(s)",
            output.source_text.len(),
            diagnostics.len()
        );
        Ok(CompileOutcome {
            output,
            diagnostics,
        })
    }

    /// Snapshot of the shared import cache's activity
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.resolver.cache().stats()
    }
}
