use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng, rngs::StdRng};
use stencil::{Cell, GridStore, Kernel, run_pass};

fn nz(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn clamp(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Double-buffered reference pass: every neighbor read sees the input grid.
fn reference_pass(cells: &[Vec<Cell>], kernel: &Kernel) -> Vec<Vec<Cell>> {
    let rows = cells.len();
    let cols = cells[0].len();
    let mut out = vec![vec![0; cols]; rows];

    for i in 0..rows {
        for j in 0..cols {
            let mut sum = 0;
            for ki in -1..=1 {
                for kj in -1..=1 {
                    let r = clamp(i as isize + ki, rows);
                    let c = clamp(j as isize + kj, cols);
                    sum += cells[r][c] * kernel.weight(ki, kj);
                }
            }
            out[i][j] = sum;
        }
    }
    out
}

fn random_rows(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<Vec<Cell>> {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random_range(-100..=100)).collect())
        .collect()
}

fn random_kernel(rng: &mut StdRng) -> Kernel {
    let mut weights = [[0; 3]; 3];
    for row in &mut weights {
        for w in row {
            *w = rng.random_range(-3..=3);
        }
    }
    Kernel::new(weights)
}

fn convolved(data: &[Vec<Cell>], kernel: Kernel, workers: usize) -> Vec<Vec<Cell>> {
    let grid = GridStore::from_rows(data, kernel).unwrap();
    run_pass(&grid, nz(workers)).unwrap();
    grid.to_rows()
}

#[test]
fn boundary_mirroring_all_ones() {
    let data = vec![vec![1; 3]; 3];
    let kernel = Kernel::new([[1; 3]; 3]);

    for workers in 1..=4 {
        let out = convolved(&data, kernel, workers);
        assert_eq!(out, vec![vec![9; 3]; 3], "workers = {workers}");
    }
}

#[test]
fn single_cell_grid_scales_by_weight_sum() {
    let kernel = Kernel::new([[2, -1, 3], [0, 5, -2], [1, 1, 4]]);
    let out = convolved(&[vec![7]], kernel, 1);
    assert_eq!(out, vec![vec![7 * kernel.weight_sum()]]);

    let out = convolved(&[vec![7]], kernel, 3);
    assert_eq!(out, vec![vec![7 * kernel.weight_sum()]]);
}

#[test]
fn equivalent_across_worker_counts() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = random_rows(&mut rng, 13, 9);
    let kernel = random_kernel(&mut rng);
    let expected = reference_pass(&data, &kernel);

    for workers in 1..=8 {
        let out = convolved(&data, kernel, workers);
        assert_eq!(out, expected, "workers = {workers}");
    }
}

#[test]
fn equivalent_on_a_larger_grid() {
    let mut rng = StdRng::seed_from_u64(42);
    let data = random_rows(&mut rng, 64, 33);
    let kernel = random_kernel(&mut rng);
    let expected = reference_pass(&data, &kernel);

    for workers in [2, 5, 16] {
        let out = convolved(&data, kernel, workers);
        assert_eq!(out, expected, "workers = {workers}");
    }
}

#[test]
fn neighbor_reads_use_pre_pass_values() {
    // Kernel that copies the cell straight above. Row i's output is row
    // i-1's input; if any worker read an already-committed row 0 or row 1,
    // the propagated values would cascade instead.
    let mut weights = [[0; 3]; 3];
    weights[0][1] = 1;
    let data = vec![vec![1, 2], vec![30, 40], vec![500, 600], vec![7000, 8000]];

    for workers in 1..=4 {
        let out = convolved(&data, Kernel::new(weights), workers);
        let expected = vec![vec![1, 2], vec![1, 2], vec![30, 40], vec![500, 600]];
        assert_eq!(out, expected, "workers = {workers}");
    }
}

#[test]
fn self_row_reads_use_the_pre_pass_cache() {
    // Center plus right neighbor: cell (i, 0) is rewritten before (i, 1) is
    // evaluated, so (i, 1)'s left neighbor must come from the cache row.
    let mut weights = [[0; 3]; 3];
    weights[1][1] = 1;
    weights[1][0] = 1;
    let data = vec![vec![1, 10, 100]];

    let out = convolved(&data, Kernel::new(weights), 1);
    // (0,0): 1 + clamped-left 1 = 2; (0,1): 10 + 1; (0,2): 100 + 10.
    assert_eq!(out, vec![vec![2, 11, 110]]);
}

#[test]
fn more_workers_than_rows() {
    let mut rng = StdRng::seed_from_u64(3);
    let data = random_rows(&mut rng, 2, 5);
    let kernel = random_kernel(&mut rng);
    let expected = reference_pass(&data, &kernel);

    assert_eq!(convolved(&data, kernel, 8), expected);
}

#[test]
fn deterministic_across_runs() {
    let mut rng = StdRng::seed_from_u64(11);
    let data = random_rows(&mut rng, 20, 7);
    let kernel = random_kernel(&mut rng);

    let first = convolved(&data, kernel, 3);
    let second = convolved(&data, kernel, 3);
    assert_eq!(first, second);
}

#[test]
fn uneven_ranges_still_converge() {
    // 10 rows over 4 workers: ranges of 3, 3, 2, 2; the short-range workers
    // idle through the last round but keep the barriers populated.
    let mut rng = StdRng::seed_from_u64(23);
    let data = random_rows(&mut rng, 10, 4);
    let kernel = random_kernel(&mut rng);
    let expected = reference_pass(&data, &kernel);

    assert_eq!(convolved(&data, kernel, 4), expected);
}
