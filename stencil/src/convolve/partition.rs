use std::{num::NonZeroUsize, ops::Range};

/// Splits `rows` row indices into contiguous near-equal ranges, one per worker.
///
/// Range sizes are `rows / workers` or one more; the first `rows % workers`
/// ranges take the extra row. Ranges are disjoint, in increasing order, and
/// together cover `0..rows`. Ranges that would come out empty are dropped,
/// so with more workers than rows the surplus workers simply never exist.
/// Deterministic: the same `(rows, workers)` always yields the same split.
pub fn partition_rows(rows: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = workers.get();
    let base = rows / workers;
    let extra = rows % workers;

    let mut ranges = Vec::with_capacity(workers.min(rows));
    let mut start = 0;
    for i in 0..workers {
        let len = base + usize::from(i < extra);
        if len == 0 {
            break;
        }
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn covers_all_rows_without_gaps() {
        for rows in 1..=40 {
            for workers in 1..=10 {
                let ranges = partition_rows(rows, nz(workers));

                let mut next = 0;
                for range in &ranges {
                    assert_eq!(range.start, next, "gap or overlap at {rows}/{workers}");
                    assert!(!range.is_empty());
                    next = range.end;
                }
                assert_eq!(next, rows);
            }
        }
    }

    #[test]
    fn range_lengths_differ_by_at_most_one() {
        for rows in 1..=40 {
            for workers in 1..=10 {
                let ranges = partition_rows(rows, nz(workers));
                let min = ranges.iter().map(|r| r.len()).min().unwrap();
                let max = ranges.iter().map(|r| r.len()).max().unwrap();
                assert!(max - min <= 1, "uneven split at {rows}/{workers}");
            }
        }
    }

    #[test]
    fn remainder_goes_to_the_first_ranges() {
        let ranges = partition_rows(10, nz(4));
        assert_eq!(ranges, vec![0..3, 3..6, 6..8, 8..10]);
    }

    #[test]
    fn more_workers_than_rows_drops_empty_ranges() {
        let ranges = partition_rows(3, nz(8));
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn deterministic() {
        assert_eq!(partition_rows(17, nz(5)), partition_rows(17, nz(5)));
    }
}
