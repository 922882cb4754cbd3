//! Life 1.06 cell lists.
//!
//! One live cell per line as two whitespace-separated integers, `x` then `y`.
//! Blank lines and lines starting with `#` (including the `#Life 1.06`
//! header) are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{LoadError, Result};
use crate::organism::Cell;

pub const LIFE_106_HEADER: &str = "#Life 1.06";

fn parse_line(line: &str) -> Option<Cell> {
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    Some(Cell::new(x, y))
}

pub fn parse_cells_106<R: BufRead>(reader: R) -> Result<Vec<Cell>> {
    let mut cells = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let cell = parse_line(trimmed).ok_or_else(|| LoadError::Parse {
            line: index + 1,
            content: trimmed.to_string(),
        })?;
        cells.push(cell);
    }
    Ok(cells)
}

pub fn read_cells_106(path: impl AsRef<Path>) -> Result<Vec<Cell>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cells = parse_cells_106(BufReader::new(file))?;
    debug!(path = %path.display(), cells = cells.len(), "read Life 1.06 file");
    Ok(cells)
}

pub fn write_cells_106<W, I>(mut writer: W, cells: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Cell>,
{
    writeln!(writer, "{LIFE_106_HEADER}")?;
    for cell in cells {
        writeln!(writer, "{cell}")?;
    }
    writer.flush()?;
    Ok(())
}
