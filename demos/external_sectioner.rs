//! External Sectioner
//!
//! Plugs a custom sectioner into the pipeline, batched and cached on disk.
//! A real backend would call a language model; this one recognizes Markdown
//! headings, which the line-pattern heuristic does not.
//!
//! ```bash
//! cargo run --example external_sectioner
//! ```

use folios::{
    write_chunks_jsonl, DiskCache, Page, Paragraph, Pipeline, PipelineConfig, Result,
    SectionBackend, SectionBlock, SectionPath, Sectioning,
};

struct MarkdownHeadings;

impl SectionBackend for MarkdownHeadings {
    fn section_batch(&self, batch: &[Paragraph]) -> Result<Vec<SectionBlock>> {
        let mut path = SectionPath::root();
        Ok(batch
            .iter()
            .map(|p| {
                if let Some(title) = p.text.strip_prefix("## ") {
                    path = SectionPath::root().child(title);
                }
                SectionBlock::new(path.clone(), p.page, p.text.clone())
            })
            .collect())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let pages = vec![
        Page::new(1, "## Setup\n\nInstall the package.\n\nRun the migrations."),
        Page::new(2, "## Usage\n\nCall the pipeline with your pages."),
    ];

    let cache_dir = std::env::temp_dir().join("folios-demo-cache");
    let config = PipelineConfig::from_json_str(r#"{"sectioning": {"batch_size": 8}}"#)?;
    let sectioner = config
        .sectioner(MarkdownHeadings)?
        .with_cache(DiskCache::new(&cache_dir)?);
    let pipeline = Pipeline::new(config)?;

    // Run twice: the second run is answered from the cache (see debug logs).
    for run in 1..=2 {
        let output = pipeline.run(&pages, Sectioning::External(&sectioner));
        println!("run {run}: sectioned by {:?}", output.sectioned_by);
        if run == 2 {
            write_chunks_jsonl(std::io::stdout().lock(), &output.chunks)?;
        }
    }

    println!("\ncache: {}", cache_dir.display());
    Ok(())
}
