use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_blocks::Material;
use strata_io::WorldDir;
use strata_runtime::ChunkStore;
use strata_world::Segment;

const SIDE: i32 = 32;

fn column() -> Vec<Segment> {
    vec![
        Segment::new(Material::Stone, 80),
        Segment::new(Material::Water, 4),
        Segment::new(Material::PackedIce, 12),
    ]
}

fn fresh_store(tmp: &tempfile::TempDir) -> ChunkStore {
    let dir = WorldDir::create(tmp.path(), "bench").unwrap();
    ChunkStore::new(dir, "bench", 16, 256, false)
}

fn bench_write_32x32(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_32x32_columns");
    let tmp = tempfile::tempdir().unwrap();
    let segs = column();

    group.bench_function("batched", |b| {
        b.iter_batched(
            || fresh_store(&tmp),
            |mut store| {
                let report = {
                    let mut batch = store.begin_batch();
                    for z in 0..SIDE {
                        for x in 0..SIDE {
                            batch.write_column(x, z, &segs).unwrap();
                        }
                    }
                    batch.finish()
                };
                black_box(report);
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("relight_per_column", |b| {
        b.iter_batched(
            || fresh_store(&tmp),
            |mut store| {
                for z in 0..SIDE {
                    for x in 0..SIDE {
                        store.write_column_now(x, z, &segs).unwrap();
                    }
                }
                black_box(store.stats());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn short_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(10)
}

criterion_group! {
    name = benches;
    config = short_config();
    targets = bench_write_32x32
}
criterion_main!(benches);
