use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::product::repository::mock::InMemoryProductRepository;
use service::product::ProductService;

fn bench_list_by_category(c: &mut Criterion) {
    let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));

    // seed outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        for i in 0..1_000 {
            let category = if i % 2 == 0 { "tools" } else { "garden" };
            svc.create(category, &format!("item-{i}")).await.unwrap();
        }
    });

    c.bench_function("product_list_by_category", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.list_by_category("tools", 3, 50)).unwrap();
        });
    });

    c.bench_function("product_unique_categories", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.list_unique_categories()).unwrap();
        });
    });
}

criterion_group!(benches, bench_list_by_category);
criterion_main!(benches);
