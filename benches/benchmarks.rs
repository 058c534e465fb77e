//! Performance benchmarks for canopy

use canopy::test_utils::TestTree;
use canopy::tree::{ExclusionConfig, ExclusionFilter, parse_exclusion_list};
use canopy::{OutputFormat, RenderOptions, TreeWalker, WalkerConfig, render};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn populated_tree(dirs: usize, files_per_dir: usize, depth: usize) -> TestTree {
    let tree = TestTree::new();
    tree.populate("root", dirs, files_per_dir, depth);
    tree.add_file("root/node_modules/pkg/index.js", "");
    tree.add_file("root/.cache/blob", "");
    tree
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    // 1 + 4 + 16 directories, 10 files each
    let small = populated_tree(4, 10, 2);
    group.bench_function("small_210_files", |b| {
        b.iter(|| {
            TreeWalker::new(WalkerConfig::default())
                .walk(black_box(&small.path().join("root")))
                .unwrap()
        })
    });

    // 1 + 5 + 25 + 125 directories, 10 files each
    let large = populated_tree(5, 10, 3);
    group.bench_function("large_1560_files", |b| {
        b.iter(|| {
            TreeWalker::new(WalkerConfig::default())
                .walk(black_box(&large.path().join("root")))
                .unwrap()
        })
    });

    group.bench_function("large_with_metadata", |b| {
        b.iter(|| {
            TreeWalker::new(WalkerConfig::default().with_metadata(true))
                .walk(black_box(&large.path().join("root")))
                .unwrap()
        })
    });

    group.bench_function("large_depth_1", |b| {
        b.iter(|| {
            TreeWalker::new(WalkerConfig::default().with_max_depth(1))
                .walk(black_box(&large.path().join("root")))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let tree = populated_tree(5, 10, 3);
    let snapshot = TreeWalker::new(WalkerConfig::default())
        .walk(&tree.path().join("root"))
        .unwrap()
        .into_tree();
    let options = RenderOptions::default();

    let mut group = c.benchmark_group("render");
    for format in [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Html,
        OutputFormat::Markdown,
    ] {
        group.bench_function(format!("{format:?}").to_lowercase(), |b| {
            b.iter(|| render(black_box(&snapshot), format, &options))
        });
    }
    group.finish();
}

fn bench_exclusion_filter(c: &mut Criterion) {
    let config = ExclusionConfig::default()
        .with_extra(parse_exclusion_list("*.log, target/, build, tmp?"));
    let filter = ExclusionFilter::new(&config);

    let mut group = c.benchmark_group("exclusion_filter");

    group.bench_function("kept_name", |b| {
        b.iter(|| filter.should_exclude(black_box("main.rs"), false))
    });

    group.bench_function("default_name", |b| {
        b.iter(|| filter.should_exclude(black_box("node_modules"), true))
    });

    group.bench_function("glob_match", |b| {
        b.iter(|| filter.should_exclude(black_box("debug.log"), false))
    });

    group.finish();
}

criterion_group!(benches, bench_walk, bench_render, bench_exclusion_filter);
criterion_main!(benches);
