use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use stencil::{Cell, GridStore, KERNEL_SIZE, Kernel};

use crate::error::OrchestratorErr;

/// Parses one whitespace-separated line of values.
fn parse_line<T: FromStr>(line: &str) -> Result<Vec<T>, String>
where
    T::Err: Display,
{
    line.split_whitespace()
        .map(|tok| tok.parse().map_err(|e| format!("bad value {tok:?}: {e}")))
        .collect()
}

/// Reads a grid-and-kernel input file.
///
/// Format (the original homework's): a `rows cols` header line, then `rows`
/// lines of grid cells, then the 3 kernel rows; all values are
/// whitespace-separated integers and blank lines are skipped.
///
/// # Returns
/// `OrchestratorErr::Parse` with the offending line number, or
/// `OrchestratorErr::Stencil` when the shapes don't validate.
pub fn read_input(path: &Path) -> Result<GridStore, OrchestratorErr> {
    let text = fs::read_to_string(path)?;
    let total = text.lines().count();
    let perr = |line: usize, msg: String| OrchestratorErr::Parse {
        path: path.to_path_buf(),
        line,
        msg,
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or_else(|| perr(1, "empty input".into()))?;
    let dims: Vec<usize> = parse_line(header).map_err(|m| perr(header_line, m))?;
    let &[rows, cols] = dims.as_slice() else {
        return Err(perr(
            header_line,
            format!("expected `rows cols`, got {} values", dims.len()),
        ));
    };

    let mut grid_rows = Vec::with_capacity(rows);
    for i in 0..rows {
        let (line, row_text) = lines
            .next()
            .ok_or_else(|| perr(total, format!("missing grid row {i}")))?;
        let values: Vec<Cell> = parse_line(row_text).map_err(|m| perr(line, m))?;
        if values.len() != cols {
            return Err(perr(
                line,
                format!("expected {cols} values, got {}", values.len()),
            ));
        }
        grid_rows.push(values);
    }

    let mut kernel_rows = Vec::with_capacity(KERNEL_SIZE);
    for i in 0..KERNEL_SIZE {
        let (line, row_text) = lines
            .next()
            .ok_or_else(|| perr(total, format!("missing kernel row {i}")))?;
        let values: Vec<Cell> = parse_line(row_text).map_err(|m| perr(line, m))?;
        if values.len() != KERNEL_SIZE {
            return Err(perr(
                line,
                format!("expected {KERNEL_SIZE} kernel values, got {}", values.len()),
            ));
        }
        kernel_rows.push(values);
    }

    let kernel = Kernel::from_rows(&kernel_rows)?;
    Ok(GridStore::from_rows(&grid_rows, kernel)?)
}

/// Writes the grid as `rows` lines of space-separated cells.
pub fn write_output(path: &Path, grid: &GridStore) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let mut row_buf = vec![0; grid.cols()];
    for row in 0..grid.rows() {
        grid.snapshot_row(row, &mut row_buf);
        for (col, value) in row_buf.iter().enumerate() {
            if col > 0 {
                write!(w, " ")?;
            }
            write!(w, "{value}")?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// Generates a random input file in the `read_input` format.
///
/// # Arguments
/// * `seed` - Same seed, same file; handy for reproducible benchmarks.
pub fn generate(path: &Path, rows: usize, cols: usize, seed: u64) -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut w = BufWriter::new(File::create(path)?);

    writeln!(w, "{rows} {cols}")?;
    for _ in 0..rows {
        for col in 0..cols {
            if col > 0 {
                write!(w, " ")?;
            }
            write!(w, "{}", rng.random_range(0..=9))?;
        }
        writeln!(w)?;
    }
    for _ in 0..KERNEL_SIZE {
        for col in 0..KERNEL_SIZE {
            if col > 0 {
                write!(w, " ")?;
            }
            write!(w, "{}", rng.random_range(-2..=2))?;
        }
        writeln!(w)?;
    }
    w.flush()
}
