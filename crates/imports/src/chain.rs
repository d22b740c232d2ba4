use crate::cache::{ChunkTreeCache, Resolved};
use crate::error::{ImportError, Result};
use crate::identity::ImportIdentity;
use pagegen_chunks::{ChunkError, ChunkTree};
use std::sync::Arc;

/// Probe identities for a page, in root-to-page order.
///
/// Pure path computation: walks from the page's containing directory up to
/// `root_dir` (inclusive) and emits one `import_file_name` identity per
/// level, outermost first. A page outside `root_dir` is a caller contract
/// error; directories above the root are never probed.
pub fn ancestor_import_identities(
    page: &ImportIdentity,
    root_dir: &ImportIdentity,
    import_file_name: &str,
) -> Result<Vec<ImportIdentity>> {
    if !page.is_within(root_dir) {
        return Err(ImportError::OutsideRoot {
            page: page.to_string(),
            root: root_dir.to_string(),
        });
    }

    let mut dirs = Vec::new();
    let mut dir = page.parent_dir();
    while let Some(current) = dir {
        if !current.is_within(root_dir) {
            break;
        }
        let at_root = current == *root_dir;
        dirs.push(current.clone());
        if at_root {
            break;
        }
        dir = current.parent_dir();
    }
    dirs.reverse();

    Ok(dirs
        .into_iter()
        .map(|d| d.join(import_file_name))
        .collect())
}

/// An ancestor import file that exists but contributed zero chunks
#[derive(Debug, Clone, PartialEq)]
pub struct ChainFailure {
    /// Identity of the file that failed
    pub source: ImportIdentity,

    /// Why it failed
    pub error: ChunkError,
}

/// Ancestor chain resolution result: trees in root-to-page order plus
/// non-fatal failures in the same order
#[derive(Debug, Clone, Default)]
pub struct ResolvedChain {
    pub trees: Vec<Arc<ChunkTree>>,
    pub failures: Vec<ChainFailure>,
}

/// Resolves a page's ancestor chain through the shared chunk tree cache
pub struct ChainResolver {
    cache: ChunkTreeCache,
    root_dir: ImportIdentity,
    import_file_name: String,
}

impl ChainResolver {
    pub fn new(
        cache: ChunkTreeCache,
        root_dir: ImportIdentity,
        import_file_name: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            root_dir,
            import_file_name: import_file_name.into(),
        }
    }

    /// The shared cache backing this resolver
    #[must_use]
    pub fn cache(&self) -> &ChunkTreeCache {
        &self.cache
    }

    /// Resolve the chain for `page`.
    ///
    /// Absent entries are dropped; parse failures are surfaced as
    /// [`ChainFailure`] diagnostics and contribute zero chunks.
    pub async fn resolve(&self, page: &ImportIdentity) -> Result<ResolvedChain> {
        let probes =
            ancestor_import_identities(page, &self.root_dir, &self.import_file_name)?;
        log::debug!(
            "resolving {} ancestor level(s) for {page}",
            probes.len()
        );

        let mut chain = ResolvedChain::default();
        for probe in probes {
            match self.cache.get(&probe).await {
                Resolved::Tree(tree) => chain.trees.push(tree),
                Resolved::Absent => {}
                Resolved::ParseFailed(error) => chain.failures.push(ChainFailure {
                    source: probe,
                    error,
                }),
            }
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> ImportIdentity {
        ImportIdentity::new(raw).unwrap()
    }

    fn probes(page: &str, root: &str) -> Vec<String> {
        ancestor_import_identities(&id(page), &id(root), "_imports.pg")
            .unwrap()
            .into_iter()
            .map(|i| i.to_string())
            .collect()
    }

    #[test]
    fn chain_is_root_to_page_order() {
        assert_eq!(
            probes("/app/areas/admin/index.pg", "/app"),
            vec![
                "/app/_imports.pg",
                "/app/areas/_imports.pg",
                "/app/areas/admin/_imports.pg",
            ]
        );
    }

    #[test]
    fn page_directly_in_root_probes_one_level() {
        assert_eq!(probes("/app/index.pg", "/app"), vec!["/app/_imports.pg"]);
    }

    #[test]
    fn root_directory_is_supported() {
        assert_eq!(
            probes("/pages/index.pg", "/"),
            vec!["/_imports.pg", "/pages/_imports.pg"]
        );
    }

    #[test]
    fn directories_above_root_are_never_probed() {
        let chain = probes("/app/sub/deep/index.pg", "/app/sub");
        assert_eq!(
            chain,
            vec!["/app/sub/_imports.pg", "/app/sub/deep/_imports.pg"]
        );
        assert!(!chain.iter().any(|p| p == "/app/_imports.pg"));
    }

    #[test]
    fn page_outside_root_is_a_contract_error() {
        let err =
            ancestor_import_identities(&id("/other/index.pg"), &id("/app"), "_imports.pg")
                .unwrap_err();
        assert!(matches!(err, ImportError::OutsideRoot { .. }));
    }
}
