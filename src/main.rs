#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sparse_life::loader::{read_cells_106, write_cells_106};
use sparse_life::{BirthScan, Organism, OrganismConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Run a Life 1.06 pattern for a number of generations and time it.
#[derive(Parser)]
#[command(name = "sparse-life", version, about)]
struct Args {
    /// Life 1.06 cell list to seed the organism with.
    file: PathBuf,
    /// Number of generations to run.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    ticks: u64,
    /// Expected live-cell count, used to pre-size storage.
    #[arg(long)]
    capacity: Option<usize>,
    /// Birth candidate policy: revisit or dedup.
    #[arg(long)]
    birth_scan: Option<BirthScan>,
    /// Write the final live cells here as Life 1.06.
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from(args: &Args) -> OrganismConfig {
    let mut config = OrganismConfig::default();
    if let Some(n) = args.capacity {
        config = config.capacity(n);
    }
    if let Some(scan) = args.birth_scan {
        config = config.birth_scan(scan);
    }
    config
}

fn run(args: &Args) -> Result<()> {
    if !args.file.is_file() {
        bail!("file '{}' does not exist", args.file.display());
    }

    let mut org = Organism::with_config(config_from(args));
    {
        let cells = read_cells_106(&args.file)
            .with_context(|| format!("failed to load '{}'", args.file.display()))?;
        let parsed = cells.len();
        org.insert_cells(cells);
        let ncells = org.count();
        println!("cell count at start = {ncells}");
        if ncells != parsed {
            warn!(parsed, inserted = ncells, "cell count mismatch (duplicate cells in file)");
        }
    }

    info!(birth_scan = ?org.birth_scan(), "run benchmark for {} ticks", args.ticks);
    let start = Instant::now();
    org.tick_n(args.ticks);
    let taken = start.elapsed();

    println!("cell count at end = {}", org.count());
    info!("time taken {:.3} secs", taken.as_secs_f64());

    if let Some(path) = &args.dump {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        write_cells_106(BufWriter::new(file), org.get_live_cells())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "wrote final generation");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    run(&args)
}
