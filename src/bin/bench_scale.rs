//! Tick throughput over random soups of increasing size.
//!
//! Use with `--release` for meaningful results.

#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use sparse_life::{BirthScan, Cell, Organism, OrganismConfig};
use std::time::Instant;

const DENSITY: f64 = 0.35;

fn seed_soup(size: i32, density: f64, seed: u64) -> Vec<Cell> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut cells = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.next_u64() <= threshold {
                cells.push(Cell::new(x, y));
            }
        }
    }
    cells
}

fn bench(size: i32, iterations: u64, scan: BirthScan) -> (f64, usize, usize) {
    let cells = seed_soup(size, DENSITY, 0x5EED_1234_ABCD_EF01);
    let mut org = Organism::with_config(
        OrganismConfig::default()
            .capacity(cells.len())
            .birth_scan(scan),
    );
    let start_pop = org.insert_cells(cells);

    let start = Instant::now();
    org.tick_n(iterations);
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms, start_pop, org.count())
}

fn main() {
    let scales: &[(i32, u64)] = &[(64, 500), (128, 200), (256, 100), (512, 50), (1024, 20)];

    println!(
        "{:<10} {:>8} {:>8} {:>10} {:>12} {:>10} {:>10}",
        "Grid", "Scan", "Iters", "StartPop", "Total(ms)", "Avg(ms)", "EndPop"
    );
    println!("{}", "-".repeat(74));

    for &(size, iters) in scales {
        for scan in [BirthScan::Revisit, BirthScan::Dedup] {
            let (total_ms, start_pop, end_pop) = bench(size, iters, scan);
            let avg_ms = total_ms / iters as f64;
            println!(
                "{:<10} {:>8} {:>8} {:>10} {:>12.1} {:>10.4} {:>10}",
                format!("{}x{}", size, size),
                format!("{scan:?}").to_ascii_lowercase(),
                iters,
                start_pop,
                total_ms,
                avg_ms,
                end_pop
            );
        }
    }
}
