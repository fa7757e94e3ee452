//! Rendering throughput benchmarks
//!
//! Measures repeat-heavy renders with varying:
//! - Item counts (1, 10, 100, 1000, and 5000 to 20000 for scaling)
//! - Unrelated data carried in the context while repeating
//! - Value kinds (plain data, async resolvers)
//! - Cache state (warm renderer, fresh renderer per render)
//!
//! Run benchmarks: `cargo bench --bench render_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use faintly::{Context, InMemoryTemplateSource, Renderer, Resolver, Value};
use futures::future::join_all;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

const LIST_PATH: &str = "/blocks/list/list.html";

fn list_template() -> &'static str {
    r#"<template>
  <ul data-fly-test="items">
    <li data-fly-repeat="items" class="row row-${itemNumber}" data-fly-include="row"></li>
  </ul>
</template>
<template data-fly-name="row">
  <strong data-fly-content="item.title"></strong>
  <span data-fly-test="item.featured">Featured</span>
  <em>${item.summary}</em>
</template>"#
}

fn renderer() -> Renderer {
    let source = Arc::new(InMemoryTemplateSource::new().with_template(LIST_PATH, list_template()));
    Renderer::builder()
        .with_source(source)
        .build()
        .expect("Failed to build renderer")
}

fn generate_items(count: usize, lazy: bool) -> Value {
    (0..count)
        .map(|i| {
            let summary = if lazy {
                Value::from(Resolver::new(move |_| async move {
                    Value::from(format!("Summary {}", i))
                }))
            } else {
                Value::from(format!("Summary {}", i))
            };
            let item: Value = [
                ("title", Value::from(format!("Item {}", i))),
                ("featured", Value::from(i % 3 == 0)),
                ("summary", summary),
            ]
            .into_iter()
            .collect();
            item
        })
        .collect::<Vec<_>>()
        .into()
}

fn context(items: &Value) -> Context {
    Context::new()
        .with("blockName", "list")
        .with("items", items.clone())
}

/// Benchmark a warm renderer with varying item counts
fn benchmark_repeat_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_throughput");
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let renderer = renderer();

    for count in [1, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        for (label, lazy) in [("data", false), ("resolvers", true)] {
            let items = generate_items(count, lazy);
            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, _| {
                b.iter(|| {
                    rt.block_on(async {
                        let fragment = renderer
                            .render(context(&items))
                            .await
                            .expect("Failed to render");
                        black_box(fragment)
                    })
                });
            });
        }
    }

    group.finish();
}

/// Benchmark large repeats, where per-item context copies would dominate
fn benchmark_repeat_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("repeat_scaling");
    group.sample_size(10);
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let renderer = renderer();

    for count in [5000, 10000, 20000] {
        group.throughput(Throughput::Elements(count as u64));
        let items = generate_items(count, false);
        // A catalog as large as the list itself rides along in every scope.
        let catalog = generate_items(count, false);
        group.bench_with_input(BenchmarkId::new("items", count), &count, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    let fragment = renderer
                        .render(context(&items).with("catalog", catalog.clone()))
                        .await
                        .expect("Failed to render");
                    black_box(fragment)
                })
            });
        });
    }

    group.finish();
}

/// Benchmark concurrent renders sharing one renderer
fn benchmark_concurrent_renders(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_renders");
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let renderer = renderer();
    let items = generate_items(100, false);

    for renders in [1, 8, 32] {
        group.throughput(Throughput::Elements(renders as u64));
        group.bench_with_input(BenchmarkId::new("renders", renders), &renders, |b, &renders| {
            b.iter(|| {
                rt.block_on(async {
                    let results =
                        join_all((0..renders).map(|_| renderer.render(context(&items)))).await;
                    black_box(results)
                })
            });
        });
    }

    group.finish();
}

/// Benchmark the cost of a cold cache (fetch and parse on every render)
fn benchmark_cold_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_cache");
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let items = generate_items(10, false);

    group.bench_function("fresh_renderer", |b| {
        b.iter(|| {
            rt.block_on(async {
                let fragment = renderer()
                    .render(context(&items))
                    .await
                    .expect("Failed to render");
                black_box(fragment)
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_repeat_throughput,
    benchmark_repeat_scaling,
    benchmark_concurrent_renders,
    benchmark_cold_cache
);
criterion_main!(benches);
