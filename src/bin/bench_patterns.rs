#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use sparse_life::{Cell, Organism};
use std::time::Instant;

const GLIDER: &[(i32, i32)] = &[(1, 0), (2, -1), (0, -2), (1, -2), (2, -2)];
const R_PENTOMINO: &[(i32, i32)] = &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)];
const ACORN: &[(i32, i32)] = &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)];
// Gosper glider gun.
#[rustfmt::skip]
const GOSPER_GUN: &[(i32, i32)] = &[
    (24, 0), (22, 1), (24, 1), (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
    (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3), (0, 4), (1, 4), (10, 4),
    (16, 4), (20, 4), (21, 4), (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5),
    (22, 5), (24, 5), (10, 6), (16, 6), (24, 6), (11, 7), (15, 7), (12, 8), (13, 8),
];

fn bench(label: &str, pattern: &[(i32, i32)], steps: u64) {
    let mut org = Organism::new();
    org.insert_cells(pattern.iter().map(|&c| Cell::from(c)));

    let start = Instant::now();
    org.tick_n(steps);
    let elapsed = start.elapsed();

    let total_ms = elapsed.as_secs_f64() * 1000.0;
    let avg_us = total_ms * 1000.0 / steps as f64;
    println!(
        "{:<20} {:>6} iters  {:>10.1} ms total  {:>10.1} us/step  pop={}",
        label,
        steps,
        total_ms,
        avg_us,
        org.count()
    );
}

fn main() {
    println!("=== Pattern Benchmark ===\n");

    bench("glider", GLIDER, 10_000);
    bench("r-pentomino", R_PENTOMINO, 1_103);
    bench("acorn", ACORN, 5_206);
    bench("gosper gun", GOSPER_GUN, 2_000);
}
