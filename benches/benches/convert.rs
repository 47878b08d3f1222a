//! Benchmark template compilation and conversion time.

use criterion::{criterion_group, criterion_main, Criterion};

use benches::{context, ORDER};
use xmlate::Engine;

criterion_main! { benches }
criterion_group! { benches, bench_compile, bench_convert, bench_convert_with }

/// Benchmarks the time taken to compile a template.
fn bench_compile(c: &mut Criterion) {
    let engine = Engine::new();
    c.bench_function("compile", |b| {
        b.iter(|| engine.compile(ORDER).unwrap());
    });
}

/// Benchmarks the time taken to convert data to a string.
fn bench_convert(c: &mut Criterion) {
    let mut g = c.benchmark_group("convert");

    for (name, strict) in [("lenient", false), ("strict", true)] {
        let mut engine = Engine::new();
        engine.set_strict(strict);
        engine.add_template("order", ORDER).unwrap();
        let ctx = context::random(150);
        g.bench_function(name, |b| {
            let template = engine.get_template("order").unwrap();
            b.iter(|| template.convert(&ctx).unwrap());
        });
    }
}

/// Benchmarks conversion with runtime variables, which are merged on every
/// call.
fn bench_convert_with(c: &mut Criterion) {
    let engine = Engine::new();
    let template = engine.compile(ORDER).unwrap();
    let ctx = context::random(150);
    c.bench_function("convert_with", |b| {
        b.iter(|| {
            template
                .convert_with(&ctx, [("LOCALE", "en"), ("CHANNEL", "web")])
                .unwrap()
        });
    });
}
