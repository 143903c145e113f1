//! Benchmarks for opinionmd conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic opinion pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opinionmd::{ConvertOptions, Pipeline, RuleSet};

/// Creates synthetic opinion pages with furniture, headings and footnotes.
fn create_test_pages(page_count: usize) -> Vec<String> {
    let mut pages = Vec::with_capacity(page_count);
    for i in 0..page_count {
        let mut page = String::new();
        if i == 0 {
            page.push_str(
                "COA 369250 CORE VALUES CONSTRUCTION LLC V SHEEHAN'S ON THE GREEN INC Opinion - Authored - Published 7/9/2025\n\
                 STATE OF MICHIGAN\nCOURT OF APPEALS\nNo. 369250\nOakland County Circuit Court\n\
                 LC No. 2022-196754-CB\nFOR PUBLICATION\nJuly 9, 2025\n9:05 AM\n\
                 Before: GARRETT, P.J., and RICK and MARIANI, JJ.\n\nPER CURIAM.\n\n",
            );
        } else {
            page.push_str(&format!("-{}-\n", i + 1));
        }
        page.push_str(&format!("{}. SECTION {}\n", ["I", "II", "III", "IV", "V", "VI"][i % 6], i));
        for j in 0..12 {
            page.push_str(&format!(
                "Paragraph {} on page {} discusses the breach of con-\n\
                 tract claim under MCL 600.2912 and No. 123 citations.{}\n\n",
                j,
                i,
                j % 3
            ));
        }
        page.push_str(&format!(
            "{}) This footnote explains the procedural history in detail.\n",
            i + 1
        ));
        pages.push(page);
    }
    pages
}

/// Benchmark rule compilation.
fn bench_rule_compilation(c: &mut Criterion) {
    c.bench_function("rule_set_new", |b| {
        b.iter(|| RuleSet::new().unwrap());
    });
}

/// Benchmark the full pipeline at various sizes.
fn bench_pipeline(c: &mut Criterion) {
    let rules = RuleSet::new().unwrap();
    let mut group = c.benchmark_group("pipeline");

    for page_count in [1, 10, 40].iter() {
        let pages = create_test_pages(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            let pipeline = Pipeline::new(&rules, ConvertOptions::default());
            b.iter(|| pipeline.run(black_box(&pages)));
        });

        group.bench_function(format!("{}_pages_inline", page_count), |b| {
            let pipeline = Pipeline::new(&rules, ConvertOptions::new().with_inline_footnotes(true));
            b.iter(|| pipeline.run(black_box(&pages)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rule_compilation, bench_pipeline);
criterion_main!(benches);
