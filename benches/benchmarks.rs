use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ringwidth::{Record, RwlReader, RwlWriter, WriteOptions};

/// Synthetic series with widths exact at 4 digits
fn make_records(count: usize, years: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let widths = (0..years).map(|y| ((i * 37 + y * 11) % 3000) as f64 / 1000.0).collect();
            Record::new(format!("S{i:05}"), 1800 + (i % 50) as i32, widths)
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for count in [10, 100, 1000] {
        let records = make_records(count, 150);
        group.throughput(Throughput::Elements((count * 150) as u64));
        group.bench_function(format!("{count}_series"), |b| {
            let writer = RwlWriter::new(WriteOptions::default());
            b.iter(|| black_box(writer.encode(black_box(&records)).unwrap()))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let records = make_records(1000, 150);
    let bytes = RwlWriter::new(WriteOptions::default()).encode(&records).unwrap();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("1000_series", |b| {
        let reader = RwlReader::default();
        b.iter(|| black_box(reader.decode(black_box(&bytes), "bench").unwrap()))
    });
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let records = make_records(100, 150);
    let mut group = c.benchmark_group("roundtrip");
    group.throughput(Throughput::Elements(100));
    group.bench_function("100_series", |b| {
        let writer = RwlWriter::new(WriteOptions::default());
        let reader = RwlReader::default();
        b.iter(|| {
            let bytes = writer.encode(&records).unwrap();
            black_box(reader.decode(&bytes, "bench").unwrap())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip);
criterion_main!(benches);
