//! Maximal runs of consecutive integers.
//!
//! [`longest_run`] is the union-find driver: register every value, union each
//! value with its successor when present, then read off the largest component.
//! The hash-set and sort based versions solve the same problem without any
//! persistent structure and serve as reference oracles.

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::disjoint_set::DisjointSet;
use crate::partition::Partition;

/// Register all values and union each one with its successor
fn build_runs(values: &[i64]) -> DisjointSet {
    let mut set = DisjointSet::with_capacity(values.len());
    for &value in values {
        set.add(value);
    }

    let mut merges = 0usize;
    for &value in values {
        // i64::MAX has no successor
        if let Some(next) = value.checked_add(1) {
            if set.contains(next) && set.union(value, next) {
                merges += 1;
            }
        }
    }

    debug!(
        "built runs over {} values: {} distinct keys, {} merges, {} runs",
        values.len(),
        set.len(),
        merges,
        set.component_count()
    );
    set
}

/// Length of the longest run of consecutive integers in `values`
///
/// Duplicates are tolerated. Returns 0 for empty input.
///
/// # Complexity
/// O(n * α(n))
pub fn longest_run(values: &[i64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    build_runs(values).max_component_size()
}

/// Every maximal run in `values`, as a partition of the distinct values
pub fn run_partition(values: &[i64]) -> Partition {
    build_runs(values).partition()
}

/// Oracle: only count upwards from values whose predecessor is absent
///
/// # Complexity
/// O(n) - each value is visited at most twice
pub fn longest_run_hashset(values: &[i64]) -> usize {
    let present: FxHashSet<i64> = values.iter().copied().collect();

    let mut longest = 0;
    for &start in &present {
        if start.checked_sub(1).is_some_and(|prev| present.contains(&prev)) {
            continue;
        }

        let mut length = 1;
        let mut current = start;
        while let Some(next) = current.checked_add(1) {
            if !present.contains(&next) {
                break;
            }
            current = next;
            length += 1;
        }
        longest = longest.max(length);
    }
    longest
}

/// Oracle: sort, skip duplicates, count consecutive steps
///
/// # Complexity
/// O(n log n)
pub fn longest_run_sorted(values: &[i64]) -> usize {
    if values.is_empty() {
        return 0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mut longest = 1;
    let mut current = 1;
    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next == prev {
            continue;
        }
        if prev.checked_add(1) == Some(next) {
            current += 1;
        } else {
            longest = longest.max(current);
            current = 1;
        }
    }
    longest.max(current)
}

/// [`longest_run`] for many independent inputs, computed in parallel
///
/// Every input gets its own [`DisjointSet`]; nothing is shared between them.
pub fn longest_runs_batch(inputs: &[Vec<i64>]) -> Vec<usize> {
    debug!("computing longest runs for {} inputs", inputs.len());
    inputs.par_iter().map(|values| longest_run(values)).collect()
}
