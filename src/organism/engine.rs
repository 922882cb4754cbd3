use std::ops::Deref;
use std::str::FromStr;

use tracing::debug;

use super::cell::{Cell, NEIGHBOR_OFFSETS};
use super::cell_set::CellSet;
use crate::error::ParseBirthScanError;

const DEFAULT_CAPACITY: usize = 1_000;
// Retired sets larger than this many times their next load are reallocated.
const RECYCLE_SHRINK_FACTOR: usize = 4;
const RECYCLE_MIN_KEYS: usize = 64;
const NEIGHBORHOOD: usize = NEIGHBOR_OFFSETS.len();

/// How `tick` evaluates birth candidates (dead cells bordering the population).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BirthScan {
    /// Check a dead cell once per live neighbour that discovers it.
    #[default]
    Revisit,
    /// Collect distinct dead neighbours first, then check each exactly once.
    Dedup,
}

impl FromStr for BirthScan {
    type Err = ParseBirthScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("revisit") {
            Ok(BirthScan::Revisit)
        } else if s.eq_ignore_ascii_case("dedup") {
            Ok(BirthScan::Dedup)
        } else {
            Err(ParseBirthScanError(s.to_string()))
        }
    }
}

#[inline]
fn resolve_birth_scan(config: &OrganismConfig) -> BirthScan {
    if let Some(scan) = config.birth_scan {
        return scan;
    }
    std::env::var("SPARSE_LIFE_BIRTH_SCAN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// Configuration for an `Organism`.
///
/// Use `OrganismConfig::default()` for the defaults, or customise individual
/// knobs via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct OrganismConfig {
    /// Expected live-cell count, used to pre-size storage.
    /// `None` means 1000 cells.
    pub capacity: Option<usize>,
    /// Birth candidate policy.
    /// `None` reads `SPARSE_LIFE_BIRTH_SCAN` (`revisit` or `dedup`) and
    /// otherwise uses `BirthScan::Revisit`.
    pub birth_scan: Option<BirthScan>,
}

impl OrganismConfig {
    /// Pre-size storage for `n` live cells.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = Some(n);
        self
    }

    /// Force a specific birth candidate policy.
    pub fn birth_scan(mut self, scan: BirthScan) -> Self {
        self.birth_scan = Some(scan);
        self
    }
}

/// The dead cells around a cell, in neighbour scan order. Holds at most 8.
#[derive(Clone, Copy, Debug)]
pub struct DeadNeighbors {
    cells: [Cell; NEIGHBORHOOD],
    len: usize,
}

impl DeadNeighbors {
    #[inline(always)]
    fn new() -> Self {
        Self {
            cells: [Cell::default(); NEIGHBORHOOD],
            len: 0,
        }
    }

    #[inline(always)]
    fn push(&mut self, cell: Cell) {
        self.cells[self.len] = cell;
        self.len += 1;
    }

    /// Live neighbours of the center cell: the complement of the dead ones.
    #[inline(always)]
    pub fn live_count(&self) -> usize {
        NEIGHBORHOOD - self.len
    }
}

impl Deref for DeadNeighbors {
    type Target = [Cell];

    #[inline(always)]
    fn deref(&self) -> &[Cell] {
        &self.cells[..self.len]
    }
}

impl<'a> IntoIterator for &'a DeadNeighbors {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// B3/S23 survival for a live cell with `live` live neighbours.
#[inline(always)]
fn survives(live: usize) -> bool {
    live == 2 || live == 3
}

/// B3/S23 birth for a dead cell with `live` live neighbours.
#[inline(always)]
fn is_born(live: usize) -> bool {
    live == 3
}

/// Empty a retired set and size it for `keys`, dropping storage left over from
/// a larger population so iteration stays proportional to the live set.
#[inline]
fn recycle(set: &mut CellSet, keys: usize) {
    if set.capacity() > keys.max(RECYCLE_MIN_KEYS) * RECYCLE_SHRINK_FACTOR {
        *set = CellSet::with_capacity(keys);
    } else {
        set.clear();
        set.reserve_for(keys);
    }
}

/// Sparse Life population on an unbounded lattice.
///
/// Only live cells are stored. A generation advance visits each live cell and
/// its dead neighbours, so the cost of `tick` scales with the population rather
/// than with any grid size.
pub struct Organism {
    cells: CellSet,
    /// Retired generation, reused as the target of the next `tick`.
    spare: CellSet,
    /// Birth candidates for `BirthScan::Dedup`.
    candidates: CellSet,
    birth_scan: BirthScan,
    generation: u64,
}

impl Default for Organism {
    fn default() -> Self {
        Self::new()
    }
}

impl Organism {
    pub fn new() -> Self {
        Self::with_config(OrganismConfig::default())
    }

    pub fn with_capacity(ncell: usize) -> Self {
        Self::with_config(OrganismConfig::default().capacity(ncell))
    }

    /// Create an organism with explicit configuration.
    pub fn with_config(config: OrganismConfig) -> Self {
        let capacity = config.capacity.unwrap_or(DEFAULT_CAPACITY);
        Self {
            cells: CellSet::with_capacity(capacity),
            spare: CellSet::new(),
            candidates: CellSet::new(),
            birth_scan: resolve_birth_scan(&config),
            generation: 0,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn is_alive(&self, cell: Cell) -> bool {
        self.cells.contains(cell.key())
    }

    #[inline]
    pub fn is_dead(&self, cell: Cell) -> bool {
        !self.is_alive(cell)
    }

    pub fn birth_scan(&self) -> BirthScan {
        self.birth_scan
    }

    /// Number of `tick`s performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seed live cells. Returns how many were not already alive.
    pub fn insert_cells<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells = cells.into_iter();
        self.cells.reserve_for(self.cells.len() + cells.size_hint().0);

        let mut inserted = 0;
        for cell in cells {
            if self.cells.insert(cell.key()) {
                inserted += 1;
            }
        }
        debug!(inserted, population = self.cells.len(), "seeded organism");
        inserted
    }

    /// Every live cell, sorted by `x` then `y`.
    pub fn get_live_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().map(|key| key.cell()).collect();
        cells.sort_unstable();
        cells
    }

    pub fn for_each_live<F: FnMut(Cell)>(&self, mut f: F) {
        for key in self.cells.iter() {
            f(key.cell());
        }
    }

    /// Min and max corners of the live population's bounding box.
    pub fn bounds(&self) -> Option<(Cell, Cell)> {
        let mut min = Cell::new(i32::MAX, i32::MAX);
        let mut max = Cell::new(i32::MIN, i32::MIN);
        let mut seen = false;

        self.for_each_live(|cell| {
            seen = true;
            min.x = min.x.min(cell.x);
            min.y = min.y.min(cell.y);
            max.x = max.x.max(cell.x);
            max.y = max.y.max(cell.y);
        });

        seen.then_some((min, max))
    }

    pub fn get_num_live_neighbors(&self, cell: Cell) -> usize {
        cell.neighbors()
            .into_iter()
            .filter(|&n| self.is_alive(n))
            .count()
    }

    pub fn get_dead_neighbors(&self, cell: Cell) -> DeadNeighbors {
        let mut dead = DeadNeighbors::new();
        for n in cell.neighbors() {
            if self.is_dead(n) {
                dead.push(n);
            }
        }
        dead
    }

    fn advance_revisit(&self, next: &mut CellSet) {
        for key in self.cells.iter() {
            let dead = self.get_dead_neighbors(key.cell());
            if survives(dead.live_count()) {
                next.insert(key);
            }
            for &d in &dead {
                if is_born(self.get_num_live_neighbors(d)) {
                    next.insert(d.key());
                }
            }
        }
    }

    fn advance_dedup(&mut self, next: &mut CellSet) {
        let mut candidates = std::mem::take(&mut self.candidates);
        recycle(&mut candidates, self.cells.len() * 2);

        for key in self.cells.iter() {
            let dead = self.get_dead_neighbors(key.cell());
            if survives(dead.live_count()) {
                next.insert(key);
            }
            candidates.extend(dead.iter().map(|d| d.key()));
        }
        for key in candidates.iter() {
            if is_born(self.get_num_live_neighbors(key.cell())) {
                next.insert(key);
            }
        }

        self.candidates = candidates;
    }

    /// Advance one generation.
    pub fn tick(&mut self) {
        let population = self.cells.len();
        let mut next = std::mem::take(&mut self.spare);
        recycle(&mut next, population + population / 4);

        match self.birth_scan {
            BirthScan::Revisit => self.advance_revisit(&mut next),
            BirthScan::Dedup => self.advance_dedup(&mut next),
        }

        self.spare = std::mem::replace(&mut self.cells, next);
        self.generation += 1;
    }

    pub fn tick_n(&mut self, n: u64) {
        let start = self.cells.len();
        for _ in 0..n {
            self.tick();
        }
        debug!(
            ticks = n,
            generation = self.generation,
            start,
            end = self.cells.len(),
            "advanced organism"
        );
    }
}
