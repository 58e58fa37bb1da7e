//! Benchmarks for SqlFS streaming throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlfs::{Config, SqlFs, SqliteConnection};

const FILE_SIZE: usize = 1024 * 1024;

fn config(chunk_capacity: usize) -> Config {
    Config::builder()
        .chunk_capacity(chunk_capacity)
        .build()
        .unwrap()
}

fn write_benchmarks(c: &mut Criterion) {
    let data = vec![0xA5u8; FILE_SIZE];
    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Bytes(FILE_SIZE as u64));

    for chunk in [4 * 1024, 32 * 1024, 256 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let conn = SqliteConnection::open_in_memory().unwrap();
            let fs = SqlFs::new(&conn, config(chunk)).unwrap();
            b.iter(|| {
                let mut writer = fs.create_or_replace("bench").unwrap();
                // 8 KiB + 1 byte writes, unaligned with every chunk size above
                for piece in data.chunks(8 * 1024 + 1) {
                    writer.write(black_box(piece)).unwrap();
                }
                writer.close().unwrap();
            });
        });
    }
    group.finish();
}

fn read_benchmarks(c: &mut Criterion) {
    let data = vec![0x5Au8; FILE_SIZE];
    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Bytes(FILE_SIZE as u64));

    for chunk in [4 * 1024, 32 * 1024, 256 * 1024] {
        let conn = SqliteConnection::open_in_memory().unwrap();
        let fs = SqlFs::new(&conn, config(chunk)).unwrap();
        let mut writer = fs.create("bench").unwrap();
        writer.write(&data).unwrap();
        writer.close().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, _| {
            b.iter(|| {
                let mut reader = fs.open("bench").unwrap();
                let mut out = Vec::with_capacity(FILE_SIZE);
                reader.read_to_end_into(&mut out).unwrap();
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, write_benchmarks, read_benchmarks);
criterion_main!(benches);
