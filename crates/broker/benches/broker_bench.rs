use broker::{EventProducer, InMemoryBroker, ProducerRecord};
use criterion::{Criterion, criterion_group, criterion_main};

fn make_record(n: u64) -> ProducerRecord {
    ProducerRecord::new(
        "bench-topic",
        format!("key-{}", n % 16),
        &serde_json::json!({
            "product_id": "00000000-0000-0000-0000-000000000001",
            "title": "Widget",
            "price": 9.99,
            "quantity": 3
        }),
    )
    .unwrap()
}

fn bench_send_and_confirm(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("broker/send_and_confirm", |b| {
        b.iter(|| {
            rt.block_on(async {
                let broker = InMemoryBroker::new();
                broker.send_and_confirm(make_record(0)).await.unwrap();
            });
        });
    });
}

fn bench_send_fire_and_forget(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("broker/send_fire_and_forget", |b| {
        b.iter(|| {
            rt.block_on(async {
                let broker = InMemoryBroker::new();
                let handle = broker.send(make_record(0)).await.unwrap();
                handle.resolve().await.unwrap();
            });
        });
    });
}

fn bench_send_batch_100_with_subscriber(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("broker/send_batch_100_with_subscriber", |b| {
        b.iter(|| {
            rt.block_on(async {
                let broker = InMemoryBroker::new();
                let mut rx = broker.subscribe("bench-topic");
                for n in 0..100 {
                    broker.send_and_confirm(make_record(n)).await.unwrap();
                }
                for _ in 0..100 {
                    rx.recv().await.unwrap();
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_send_and_confirm,
    bench_send_fire_and_forget,
    bench_send_batch_100_with_subscriber
);
criterion_main!(benches);
