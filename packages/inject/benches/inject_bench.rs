use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sourcemap_register::{EntryInjector, InjectorOptions, RunContext};
use sourcemap_register_ast::parse;
use sourcemap_register_common::MockFileSystem;
use std::path::Path;

fn transform_non_entry(c: &mut Criterion) {
    let injector = EntryInjector::new(InjectorOptions::default(), "/project");
    let fs = MockFileSystem::new();
    let mut ctx = RunContext::with_filesystem(&fs);
    let program = parse("const x = require('./x');\nmodule.exports = x;\n").unwrap();
    let filename = Path::new("src/components/button/index.js");

    c.bench_function("transform_non_entry", |b| {
        b.iter(|| {
            let mut program = program.clone();
            injector
                .transform(&mut ctx, black_box(&mut program), black_box(filename))
                .unwrap()
        })
    });
}

fn clone_baseline(c: &mut Criterion) {
    let program = parse("const x = require('./x');\nmodule.exports = x;\n").unwrap();

    c.bench_function("clone_baseline", |b| b.iter(|| black_box(program.clone())));
}

fn transform_entry(c: &mut Criterion) {
    let injector = EntryInjector::new(InjectorOptions::default(), "/project");
    let fs = MockFileSystem::new();
    let mut ctx = RunContext::with_filesystem(&fs);
    let program = parse("main();\n").unwrap();
    let filename = Path::new("src/index.js");

    c.bench_function("transform_entry_cached", |b| {
        b.iter(|| {
            let mut program = program.clone();
            injector
                .transform(&mut ctx, black_box(&mut program), black_box(filename))
                .unwrap()
        })
    });
}

fn is_entry(c: &mut Criterion) {
    let injector = EntryInjector::new(
        InjectorOptions::default().with_entries(["index.js", "bin/cli.js", "worker.js"]),
        "/project",
    );

    c.bench_function("is_entry_miss", |b| {
        b.iter(|| injector.is_entry(black_box(Path::new("src/lib/deep/nested/module.js"))))
    });
}

criterion_group!(benches, clone_baseline, transform_non_entry, transform_entry, is_entry);
criterion_main!(benches);
