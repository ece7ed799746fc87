use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use cubesweeper::{generate, solve_full, Coord3};

fn bench_generate(c: &mut Criterion) {
    let click = Coord3::new(4, 4, 4);
    c.bench_function("generate_9cube_40_mines", |b| {
        b.iter(|| generate(9, 40, black_box(click), black_box(7)).unwrap())
    });
}

fn bench_solve_full(c: &mut Criterion) {
    let click = Coord3::new(4, 4, 4);
    c.bench_function("solve_full_9cube_40_mines", |b| {
        b.iter(|| {
            let mut board = generate(9, 40, click, 7).unwrap();
            black_box(solve_full(&mut board, click))
        })
    });
}

criterion_group!(benches, bench_generate, bench_solve_full);
criterion_main!(benches);
