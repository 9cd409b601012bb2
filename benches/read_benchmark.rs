use criterion::{black_box, criterion_group, criterion_main, Criterion};
use endless_stream::{CircularStream, ReadOutcome, SharedBuffer, MEGABYTE};

const STREAM_SIZE: u64 = 16 * MEGABYTE as u64;

fn read_whole_stream(c: &mut Criterion) {
    let buffer = SharedBuffer::process_default();
    let inputs = [
        ("read_chunk_small", 512),
        ("read_chunk_medium", 65536),
        ("read_chunk_large", 4 * MEGABYTE),
    ];

    for (name, chunk_size) in inputs.iter() {
        let mut group = c.benchmark_group(name.to_string());
        group.measurement_time(std::time::Duration::from_secs(5));

        let buffer = buffer.clone();
        let chunk_len = *chunk_size;
        let mut chunk = vec![0u8; chunk_len];
        group.bench_function("read_into", move |b| {
            b.iter(|| {
                let mut stream =
                    CircularStream::new(buffer.clone(), STREAM_SIZE);
                while let ReadOutcome::Read(n) =
                    stream.read_into(&mut chunk, 0, chunk_len)
                {
                    black_box(n);
                }
            });
        });

        group.finish();
    }
}

criterion_group!(benches, read_whole_stream);
criterion_main!(benches);
