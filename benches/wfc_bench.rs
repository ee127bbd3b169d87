use coord_2d::Size;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_2d::Grid;
use overlap_wfc::pattern::extract_patterns;
use overlap_wfc::{Orientation, Solver, WfcConfig};

fn sample_input() -> Grid<u8> {
    Grid::new_fn(Size::new(16, 16), |coord| {
        ((coord.x / 2 + coord.y / 3) % 4) as u8
    })
}

fn extract_pattern_size_3(c: &mut Criterion) {
    let input = sample_input();
    c.bench_function("extract patterns, size 3", |b| {
        b.iter(|| {
            extract_patterns(
                black_box(&input),
                Size::new(3, 3),
                true,
                &[Orientation::Original],
            )
        })
    });
}

fn solve_32x32(c: &mut Criterion) {
    let input = sample_input();
    let config = WfcConfig {
        pattern_size: 3,
        periodic_input: true,
        periodic_output: true,
        output_size: Size::new(32, 32),
        symmetry: 4,
        ground: false,
        seed: 1,
    };
    c.bench_function("solve 32x32 from 16x16 input", |b| {
        b.iter(|| {
            let mut solver = Solver::new(black_box(&input), config).unwrap();
            solver.run()
        })
    });
}

criterion_group!(benches, extract_pattern_size_3, solve_32x32);
criterion_main!(benches);
