//! Exhaustive Searcher: brute-force the seed space directly (component I).

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use rainbow_core::{HashFunction, Scratch, Seed};

/// A contiguous, inclusive-inclusive range of the 32-bit seed space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
    pub start: u32,
    pub end_inclusive: u32,
}

/// Partition `[0, u32::MAX]` into `workers` contiguous, gap-free,
/// non-overlapping ranges. Pure and independently testable for coverage.
#[must_use]
pub fn partition_ranges(workers: usize) -> Vec<SeedRange> {
    let workers = workers.max(1) as u64;
    let total = u64::from(u32::MAX) + 1;
    let base = total / workers;
    let mut ranges = Vec::with_capacity(workers as usize);
    let mut cursor = 0u64;

    for i in 0..workers {
        let count = if i == workers - 1 {
            total - cursor
        } else {
            base
        };
        let start = cursor as u32;
        let end_inclusive = (cursor + count - 1) as u32;
        ranges.push(SeedRange {
            start,
            end_inclusive,
        });
        cursor += count;
    }

    ranges
}

/// Scan `range` for a seed whose hash matches `target`, polling `found` and
/// reporting a match through `found`/`seed`. Returns early if another worker
/// has already set `found`.
fn scan_range(
    range: SeedRange,
    hash: &dyn HashFunction,
    target: &[u8],
    found: &AtomicBool,
    seed: &AtomicU32,
) {
    let mut scratch: Scratch = [0u8; 64];
    let digest_len = hash.digest_len();
    let mut i = range.start;
    loop {
        if found.load(Ordering::Relaxed) {
            return;
        }
        let digest = hash.hash(i, &mut scratch);
        if &digest[..digest_len] == target {
            seed.store(i, Ordering::Relaxed);
            found.store(true, Ordering::Relaxed);
            return;
        }
        if i == range.end_inclusive {
            return;
        }
        i += 1;
    }
}

/// Search the entire 32-bit seed space for a seed whose hash equals
/// `target`, using `T = max(1, available_parallelism)` worker threads. Each
/// worker scans its own contiguous range and all workers are joined before
/// returning.
#[must_use]
pub fn search(hash: Arc<dyn HashFunction>, target: Vec<u8>) -> Option<Seed> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);
    search_ranges(hash, target, partition_ranges(workers))
}

/// As [`search`], but over caller-supplied ranges. Exposed so tests can plant
/// a seed in a small bounded range instead of scanning the full space.
#[must_use]
pub fn search_ranges(
    hash: Arc<dyn HashFunction>,
    target: Vec<u8>,
    ranges: Vec<SeedRange>,
) -> Option<Seed> {
    let found = Arc::new(AtomicBool::new(false));
    let seed = Arc::new(AtomicU32::new(0));
    let target = Arc::new(target);

    let mut handles = Vec::with_capacity(ranges.len());
    for range in ranges {
        let hash = Arc::clone(&hash);
        let target = Arc::clone(&target);
        let found = Arc::clone(&found);
        let seed = Arc::clone(&seed);
        handles.push(thread::spawn(move || {
            scan_range(range, hash.as_ref(), &target, &found, &seed);
        }));
    }

    for handle in handles {
        let _ = handle.join();
    }

    if found.load(Ordering::Relaxed) {
        Some(seed.load(Ordering::Relaxed))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainbow_hashes::WikiHash;

    #[test]
    fn partition_covers_full_space_without_gaps_or_overlaps() {
        for workers in 1..=9usize {
            let ranges = partition_ranges(workers);
            assert_eq!(ranges.len(), workers);
            assert_eq!(ranges[0].start, 0);
            assert_eq!(ranges.last().unwrap().end_inclusive, u32::MAX);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end_inclusive + 1, pair[1].start);
            }
            let total: u64 = ranges
                .iter()
                .map(|r| u64::from(r.end_inclusive) - u64::from(r.start) + 1)
                .sum();
            assert_eq!(total, u64::from(u32::MAX) + 1);
        }
    }

    #[test]
    fn finds_a_planted_seed_in_a_bounded_range() {
        let hash: Arc<dyn HashFunction> = Arc::new(WikiHash);
        let planted = 4242u32;
        let mut scratch: Scratch = [0u8; 64];
        let target = hash.hash(planted, &mut scratch).to_vec();

        let ranges = vec![
            SeedRange {
                start: 0,
                end_inclusive: 2000,
            },
            SeedRange {
                start: 2001,
                end_inclusive: 5000,
            },
            SeedRange {
                start: 5001,
                end_inclusive: 10_000,
            },
        ];

        let result = search_ranges(hash, target, ranges);
        assert_eq!(result, Some(planted));
    }

    #[test]
    fn returns_none_when_target_absent_from_range() {
        let hash: Arc<dyn HashFunction> = Arc::new(WikiHash);
        let target = vec![0xde, 0xad, 0xbe, 0xef];
        // Vanishingly unlikely to actually occur in this tiny sub-range.
        let ranges = vec![SeedRange {
            start: 0,
            end_inclusive: 100,
        }];
        let result = search_ranges(hash, target, ranges);
        assert_eq!(result, None);
    }
}
