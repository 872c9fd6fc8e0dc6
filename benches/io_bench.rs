use assetio::util::{MAX_FILENAME_LENGTH, join_path, normalize_separators};
use assetio::{AssetResolver, list_files};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");
    let cases = [
        ("short", "gfx", "ship.png"),
        ("mixed", "assets\\data/", "/levels\\stage01.json"),
        ("long", "a/very/deep/asset/root/that/goes/on/for/a/while", "and/a/leaf/that/does/too.ogg"),
    ];

    for (label, base, leaf) in cases {
        group.bench_with_input(BenchmarkId::new("join_path", label), &(base, leaf), |b, &(base, leaf)| {
            b.iter(|| join_path(black_box(base), black_box(leaf), MAX_FILENAME_LENGTH));
        });
    }

    group.bench_function("normalize_separators", |b| {
        b.iter(|| {
            let mut path = String::from(black_box("data\\levels/world1\\stage02.json"));
            normalize_separators(&mut path);
            path
        });
    });
    group.finish();
}

fn bench_assets(c: &mut Criterion) {
    let tmp = tempfile::tempdir().expect("temp dir");
    let levels = tmp.path().join("data").join("levels");
    std::fs::create_dir_all(&levels).expect("create levels");
    for i in 0..256 {
        std::fs::write(levels.join(format!("stage{i:03}.json")), "{}").expect("write stage");
    }
    let root = tmp.path().to_str().expect("utf-8 temp path");
    let resolver = AssetResolver::new(root, "data");

    c.bench_function("resolve_data_prefixed", |b| {
        b.iter(|| resolver.resolve(black_box("levels/stage128.json")));
    });
    c.bench_function("resolve_missing", |b| {
        b.iter(|| resolver.resolve(black_box("levels/nope.json")));
    });
    c.bench_function("list_files_256", |b| {
        b.iter(|| list_files(&resolver, black_box("levels")));
    });
}

criterion_group!(benches, bench_paths, bench_assets);
criterion_main!(benches);
