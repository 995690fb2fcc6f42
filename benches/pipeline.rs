//! Benchmarks for the structuring pipeline stages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use folios::{
    chunk_blocks, detect_sections, normalize_pages, Page, Pipeline, Sectioning, DEFAULT_THRESHOLD,
};

fn sample_pages(count: usize) -> Vec<Page> {
    // Report-shaped pages: running header, a heading every few pages,
    // hyphen breaks, and a page-number footer.
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "The five boxing wizards jump quick-\nly. ",
        "Sphinx of black quartz, judge my vow. ",
    ];
    (0..count)
        .map(|i| {
            let mut text = String::from("ACME Corp Annual Report\n");
            if i % 3 == 0 {
                text.push_str(&format!("{} Section {}\n\n", i / 3 + 1, i / 3 + 1));
            }
            for p in 0..4 {
                for s in 0..6 {
                    text.push_str(sentences[(i + p + s) % sentences.len()]);
                }
                text.push_str("\n\n");
            }
            text.push_str(&format!("Page {}", i + 1));
            Page::new(i as u32 + 1, text)
        })
        .collect()
}

fn total_bytes(pages: &[Page]) -> u64 {
    pages.iter().map(|p| p.text.len() as u64).sum()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for count in [10, 100, 1_000] {
        let pages = sample_pages(count);

        group.throughput(Throughput::Bytes(total_bytes(&pages)));
        group.bench_with_input(BenchmarkId::new("pages", count), &pages, |b, pages| {
            b.iter(|| normalize_pages(black_box(pages), DEFAULT_THRESHOLD))
        });
    }

    group.finish();
}

fn bench_sections_and_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("sections_and_chunks");

    for count in [10, 100, 1_000] {
        let pages = sample_pages(count);
        let normalized = normalize_pages(&pages, DEFAULT_THRESHOLD);
        let blocks = detect_sections(&normalized);

        group.throughput(Throughput::Bytes(total_bytes(&pages)));
        group.bench_with_input(BenchmarkId::new("detect", count), &normalized, |b, pages| {
            b.iter(|| detect_sections(black_box(pages)))
        });
        group.bench_with_input(BenchmarkId::new("chunk", count), &blocks, |b, blocks| {
            b.iter(|| chunk_blocks(black_box(blocks), 1200, 120))
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::default();

    for count in [10, 100, 1_000] {
        let pages = sample_pages(count);

        group.throughput(Throughput::Bytes(total_bytes(&pages)));
        group.bench_with_input(BenchmarkId::new("heuristic", count), &pages, |b, pages| {
            b.iter(|| pipeline.run(black_box(pages), Sectioning::Heuristic))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_sections_and_chunks, bench_pipeline);
criterion_main!(benches);
