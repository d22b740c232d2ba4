use pagegen_chunks::{Chunk, ChunkTree, DirectiveParser, SourceLocation, TreeOrigin};
use pagegen_compiler::{
    merge, standard_defaults, CompileError, PageCompiler, SessionOptions, Severity,
    SummaryGenerator,
};
use pagegen_imports::{FsContentProvider, ImportError, ImportIdentity, MemoryContentProvider};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn id(raw: &str) -> ImportIdentity {
    ImportIdentity::new(raw).unwrap()
}

fn compiler_over(
    provider: Arc<MemoryContentProvider>,
    defaults: ChunkTree,
    options: SessionOptions,
) -> PageCompiler {
    PageCompiler::new(
        provider,
        Arc::new(DirectiveParser::new()),
        Arc::new(SummaryGenerator::new()),
        defaults,
        options,
    )
}

#[tokio::test]
async fn scenario_defaults_page_directory_and_page_content() -> anyhow::Result<()> {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    // root has no import file; the page's directory adds a tag helper
    provider.write(&id("/app/pages/_imports.pg"), "@addTagHelper Foo\n");

    let defaults = ChunkTree::new(
        TreeOrigin::builtin("<defaults>"),
        vec![
            Chunk::namespace("System"),
            Chunk::base_type("Page<T>", SourceLocation::Undefined),
        ],
    );
    let compiler = compiler_over(
        provider,
        defaults,
        SessionOptions::new(id("/app"), "App.Pages"),
    );

    let outcome = compiler
        .compile(&id("/app/pages/index.pg"), b"@using App.Models\n")
        .await?;

    assert!(outcome.diagnostics.is_empty());
    assert_eq!(
        outcome.output.source_text,
        "namespace App.Pages;\n\
         \n\
         using System;\n\
         using App.Models;\n\
         \n\
         class index : Page<T>\n\
         {\n\
         }\n\
         \n\
         // tag helpers:\n\
         // + Foo\n"
    );
    Ok(())
}

#[tokio::test]
async fn two_compiles_of_the_same_page_are_byte_identical() -> anyhow::Result<()> {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    provider.write(
        &id("/app/_imports.pg"),
        "@using App.Models\n@inject IAppCache Cache\n",
    );
    provider.write(
        &id("/app/pages/_imports.pg"),
        "@inherits AppPage<TModel>\n@addTagHelper *, App\n",
    );

    let compiler = compiler_over(
        provider,
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages").model_type("OrderModel"),
    );

    let page = id("/app/pages/index.pg");
    let content = b"@using App.Orders\n@inject ICustomHtml Html\n";
    let first = compiler.compile(&page, content).await?;
    let second = compiler.compile(&page, content).await?;

    assert_eq!(first.output.source_text, second.output.source_text);
    assert_eq!(first, second);
    // base type came from the closer layer, model placeholder substituted
    assert!(first
        .output
        .source_text
        .contains("class index : AppPage<OrderModel>"));
    // Html was replaced at its original (defaults) position
    assert!(first
        .output
        .source_text
        .contains("[Inject] public ICustomHtml Html { get; set; }"));
    Ok(())
}

#[tokio::test]
async fn ancestor_parse_error_is_reported_but_not_fatal() -> anyhow::Result<()> {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    provider.write(&id("/app/_imports.pg"), "@inject OnlyAType\n");
    provider.write(&id("/app/pages/_imports.pg"), "@using App.Pages\n");

    let compiler = compiler_over(
        provider,
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages"),
    );

    let outcome = compiler
        .compile(&id("/app/pages/index.pg"), b"@using App.Models\n")
        .await?;

    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        outcome.diagnostics[0].source.as_deref(),
        Some("/app/_imports.pg")
    );
    // the broken ancestor contributed zero chunks; the rest still merged
    assert!(outcome.output.source_text.contains("using App.Pages;"));
    assert!(outcome.output.source_text.contains("using App.Models;"));
    Ok(())
}

#[tokio::test]
async fn page_parse_error_is_fatal() {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    let compiler = compiler_over(
        provider,
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages"),
    );

    let err = compiler
        .compile(&id("/app/pages/index.pg"), b"@using\n")
        .await
        .unwrap_err();
    assert!(matches!(err, CompileError::PageParse(_)));
}

#[tokio::test]
async fn page_outside_root_is_a_contract_error() {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    let compiler = compiler_over(
        provider,
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages"),
    );

    let err = compiler
        .compile(&id("/elsewhere/index.pg"), b"@using App\n")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::Imports(ImportError::OutsideRoot { .. })
    ));
}

#[tokio::test]
async fn editing_an_ancestor_changes_the_next_compile() -> anyhow::Result<()> {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    provider.write(&id("/app/_imports.pg"), "@using App.V1\n");
    provider.write(&id("/app/unrelated/_imports.pg"), "@using Unrelated\n");

    let compiler = compiler_over(
        provider.clone(),
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages"),
    );

    let page = id("/app/pages/index.pg");
    let first = compiler.compile(&page, b"@page\n").await?;
    assert!(first.output.source_text.contains("using App.V1;"));

    // editing an unrelated directory's import file must not disturb the page
    provider.write(&id("/app/unrelated/_imports.pg"), "@using Unrelated.V2\n");
    let unchanged = compiler.compile(&page, b"@page\n").await?;
    assert_eq!(first.output.source_text, unchanged.output.source_text);

    // editing an ancestor on the page's chain must be observed
    provider.write(&id("/app/_imports.pg"), "@using App.V2\n");
    let changed = compiler.compile(&page, b"@page\n").await?;
    assert!(changed.output.source_text.contains("using App.V2;"));
    assert!(!changed.output.source_text.contains("using App.V1;"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_compiles_share_the_import_cache() -> anyhow::Result<()> {
    init_logging();
    let provider = Arc::new(MemoryContentProvider::new());
    provider.write(&id("/app/_imports.pg"), "@using App.Models\n");
    provider.write(&id("/app/pages/_imports.pg"), "@using App.Pages\n");

    let compiler = Arc::new(compiler_over(
        provider,
        standard_defaults(),
        SessionOptions::new(id("/app"), "App.Pages"),
    ));

    let mut handles = Vec::new();
    for idx in 0..16 {
        let compiler = Arc::clone(&compiler);
        handles.push(tokio::spawn(async move {
            let page = ImportIdentity::new(format!("/app/pages/page{idx}.pg")).unwrap();
            compiler.compile(&page, b"@page\n").await
        }));
    }
    for handle in handles {
        let outcome = handle.await.expect("compile task")?;
        assert!(outcome.output.source_text.contains("using App.Models;"));
        assert!(outcome.output.source_text.contains("using App.Pages;"));
    }

    // two import files on disk, parsed once each no matter how many pages
    assert_eq!(compiler.cache_stats().parses, 2);
    Ok(())
}

#[tokio::test]
async fn compiles_over_a_real_directory_tree() -> anyhow::Result<()> {
    init_logging();
    let temp = tempfile::tempdir()?;
    tokio::fs::create_dir_all(temp.path().join("pages")).await?;
    tokio::fs::write(temp.path().join("_imports.pg"), "@using App.Models\n").await?;
    tokio::fs::write(
        temp.path().join("pages/_imports.pg"),
        "@inherits SitePage<TModel>\n",
    )
    .await?;

    let compiler = PageCompiler::new(
        Arc::new(FsContentProvider::new(temp.path())),
        Arc::new(DirectiveParser::new()),
        Arc::new(SummaryGenerator::new()),
        standard_defaults(),
        SessionOptions::new(id("/"), "App.Pages").model_type("OrderModel"),
    );

    let outcome = compiler
        .compile(&id("/pages/index.pg"), b"@using App.Orders\n")
        .await?;

    assert!(outcome.diagnostics.is_empty());
    assert!(outcome.output.source_text.contains("using App.Models;"));
    assert!(outcome.output.source_text.contains("using App.Orders;"));
    assert!(outcome
        .output
        .source_text
        .contains("class index : SitePage<OrderModel>"));
    assert_eq!(compiler.cache_stats().parses, 2);
    Ok(())
}

#[tokio::test]
async fn effective_tree_snapshot_is_stable() -> anyhow::Result<()> {
    init_logging();
    let ancestors = vec![Arc::new(ChunkTree::new(
        TreeOrigin::file("/app/_imports.pg"),
        vec![
            Chunk::namespace("App.Models"),
            Chunk::inject("IAppCache", "Cache"),
        ],
    ))];
    let page = ChunkTree::new(
        TreeOrigin::file("/app/pages/index.pg"),
        vec![Chunk::namespace("App.Pages"), Chunk::opaque("@page")],
    );

    let first = merge(&standard_defaults(), &ancestors, &page);
    let second = merge(&standard_defaults(), &ancestors, &page);
    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?
    );
    Ok(())
}
