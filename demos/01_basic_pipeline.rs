//! Basic Pipeline
//!
//! The minimal example: raw PDF page text in, section-tagged chunks out.
//!
//! ```bash
//! RUST_LOG=folios=debug cargo run --example 01_basic_pipeline
//! ```

use folios::{write_report, Page, Pipeline, PipelineConfig, Sectioning};

fn main() -> folios::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let pages = vec![
        Page::new(
            1,
            "ACME Corp Annual Report\n\
             1 Introduction\n\n\
             This report describes the records   management program. \
             It covers every office and every infor-\nmation system.\n\n\
             Page 1",
        ),
        Page::new(
            2,
            "ACME Corp Annual Report\n\
             Records are reviewed once a year.\n\n\
             2 Retention\n\n\
             Financial records are kept for seven years. \
             Personnel records are kept for the length of employment plus three years.\n\n\
             Page 2",
        ),
        Page::new(
            3,
            "ACME Corp Annual Report\n\
             RETENTION EXCEPTIONS\n\n\
             Records under legal hold are kept until the hold is released.\n\n\
             Page 3",
        ),
    ];

    let mut config = PipelineConfig::default();
    config.chunking.target_chars = 200;
    config.chunking.overlap = 30;
    let output = Pipeline::new(config)?.run(&pages, Sectioning::Heuristic);

    println!(
        "Pages: {}, blocks: {}, chunks: {}\n",
        pages.len(),
        output.blocks.len(),
        output.chunks.len()
    );

    for chunk in &output.chunks {
        println!("{chunk}");
        println!("  \"{}\"\n", chunk.text.replace("\n\n", " | "));
    }

    // The running header is gone, "infor-\nmation" is one word again, and
    // every chunk knows its section and pages.
    write_report(std::io::stdout().lock(), &output.report)?;
    Ok(())
}
