//! In-place sorting and lookup of a chain table by endpoint (component G).

use rainbow_core::Chain;

const INSERTION_SORT_THRESHOLD: usize = 16;

/// Sort `chains` in place by `end`, ascending. Ties are left in whatever
/// relative order partitioning happens to produce — duplicate endpoints are
/// expected and handled by [`binary_search_first`], not by a stable sort.
pub fn sort_by_end(chains: &mut [Chain]) {
    quicksort(chains);
}

fn quicksort(slice: &mut [Chain]) {
    if slice.len() <= 1 {
        return;
    }
    if slice.len() <= INSERTION_SORT_THRESHOLD {
        insertion_sort(slice);
        return;
    }
    let pivot_index = partition(slice);
    let (left, right) = slice.split_at_mut(pivot_index);
    quicksort(left);
    quicksort(&mut right[1..]);
}

/// Lomuto partition keyed by `.end`, pivoting on the first element.
fn partition(slice: &mut [Chain]) -> usize {
    let pivot = slice[0].end;
    let mut store = 0usize;
    for i in 1..slice.len() {
        if slice[i].end < pivot {
            store += 1;
            slice.swap(store, i);
        }
    }
    slice.swap(0, store);
    store
}

fn insertion_sort(slice: &mut [Chain]) {
    for i in 1..slice.len() {
        let mut j = i;
        while j > 0 && slice[j - 1].end > slice[j].end {
            slice.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Find the index of the first chain whose `.end` equals `target`, using
/// binary search with a backward tie-break scan to land on the leftmost
/// match among duplicate endpoints. Returns `None` if no chain matches.
///
/// Requires `chains` to already be sorted by `.end` (see [`sort_by_end`]).
#[must_use]
pub fn binary_search_first(chains: &[Chain], target: u32) -> Option<usize> {
    if chains.is_empty() {
        return None;
    }

    let mut lo = 0usize;
    let mut hi = chains.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if chains[mid].end < target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    if lo < chains.len() && chains[lo].end == target {
        Some(lo)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_end_with_duplicates() {
        let mut chains = vec![
            Chain::new(100, 2),
            Chain::new(101, 1),
            Chain::new(102, 3),
            Chain::new(103, 1),
        ];
        sort_by_end(&mut chains);
        let ends: Vec<u32> = chains.iter().map(|c| c.end).collect();
        assert_eq!(ends, vec![1, 1, 2, 3]);
    }

    #[test]
    fn binary_search_lands_on_leftmost_duplicate() {
        let mut chains = vec![
            Chain::new(100, 2),
            Chain::new(101, 1),
            Chain::new(102, 3),
            Chain::new(103, 1),
        ];
        sort_by_end(&mut chains);
        assert_eq!(binary_search_first(&chains, 1), Some(0));
    }

    #[test]
    fn binary_search_returns_none_for_absent_target() {
        let mut chains = vec![Chain::new(1, 5), Chain::new(2, 10), Chain::new(3, 15)];
        sort_by_end(&mut chains);
        assert_eq!(binary_search_first(&chains, 7), None);
    }

    #[test]
    fn binary_search_on_empty_slice() {
        assert_eq!(binary_search_first(&[], 1), None);
    }

    #[test]
    fn sorts_large_slice_beyond_insertion_threshold() {
        let mut chains: Vec<Chain> = (0..200).rev().map(|i| Chain::new(i, i)).collect();
        sort_by_end(&mut chains);
        assert!(chains.windows(2).all(|w| w[0].end <= w[1].end));
    }
}
