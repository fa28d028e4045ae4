use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use sarthi_ai::{LineItemGenerator, NoteComposer, OrderAnalyzer, pricing};
use sarthi_core::CustomerId;
use sarthi_orders::Order;

fn sample_orders(n: usize) -> Vec<Order> {
    let kinds = [
        ("suit", "wool", "complex tailoring work requiring embroidery"),
        ("shirt", "cotton", "regular fit"),
        ("saree", "silk", "blouse alteration needed"),
        ("kurta", "linen", ""),
        ("dress", "georgette", "embroidery on sleeves"),
    ];
    (0..n)
        .map(|i| {
            let (kind, fabric, notes) = kinds[i % kinds.len()];
            Order::new(CustomerId::new(), "Bench Customer", kind, 1 + (i % 3) as u32, 1500.0 + i as f64)
                .with_fabric(fabric)
                .with_color("navy blue")
                .with_notes(notes)
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = OrderAnalyzer::default();
    let orders = sample_orders(100);

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Elements(orders.len() as u64));
    group.bench_function("default_rules", |b| {
        b.iter(|| {
            for order in &orders {
                black_box(analyzer.analyze(black_box(order)));
            }
        })
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let analyzer = OrderAnalyzer::default();
    let line_items = LineItemGenerator::default();
    let notes = NoteComposer::default();
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap_or_default();

    let mut group = c.benchmark_group("pipeline");
    for size in [10usize, 100, 1000] {
        let orders = sample_orders(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| {
                for order in orders {
                    let analysis = analyzer.analyze(order);
                    let Ok(items) = line_items.generate(order, &analysis) else {
                        continue;
                    };
                    black_box(pricing::calculate(&items));
                    black_box(notes.compose(order, &analysis, today));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_full_pipeline);
criterion_main!(benches);
