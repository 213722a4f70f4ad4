//! Benchmarks for Life Board generation stepping.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use life_board::schema::{Pattern, Seed};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for size in [32, 64, 128, 256] {
        let seed = Seed {
            pattern: Pattern::Random {
                density: 0.3,
                seed: 42,
            },
        };
        let mut grid = seed.build(size, size).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut grid).step();
                });
            },
        );
    }

    group.finish();
}

fn bench_seed_codec(c: &mut Criterion) {
    let grid = Seed {
        pattern: Pattern::Random {
            density: 0.5,
            seed: 7,
        },
    }
    .build(128, 128)
    .unwrap();
    let text = grid.to_string();

    c.bench_function("save_128x128", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(text.len());
            black_box(&grid).save_to(&mut buf).unwrap();
            buf
        });
    });

    c.bench_function("load_128x128", |b| {
        b.iter(|| black_box(text.as_str()).parse::<life_board::LifeGrid>().unwrap());
    });
}

criterion_group!(benches, bench_step, bench_seed_codec);
criterion_main!(benches);
