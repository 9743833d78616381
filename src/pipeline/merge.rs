/*!
 * K-way Merge
 * Combine the per-context sorted arrays into one sorted array
 */

use crate::core::types::Value;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Merge individually sorted arrays into one sorted array
///
/// Min-heap over the current head of every array, O(n log k). Equal values
/// come out in input order.
pub fn merge_sorted(arrays: Vec<Vec<Value>>) -> Vec<Value> {
    let total = arrays.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    let mut sources: Vec<_> = arrays.into_iter().map(Vec::into_iter).collect();
    let mut heads = BinaryHeap::with_capacity(sources.len());
    for (idx, source) in sources.iter_mut().enumerate() {
        if let Some(value) = source.next() {
            heads.push(Reverse((value, idx)));
        }
    }

    while let Some(Reverse((value, idx))) = heads.pop() {
        merged.push(value);
        if let Some(next) = sources[idx].next() {
            heads.push(Reverse((next, idx)));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_two() {
        assert_eq!(
            merge_sorted(vec![vec![1, 3, 5, 8], vec![2, 9]]),
            vec![1, 2, 3, 5, 8, 9]
        );
    }

    #[test]
    fn test_merge_with_empty_and_duplicates() {
        assert_eq!(
            merge_sorted(vec![vec![], vec![1, 1, 4], vec![-2, 1], vec![]]),
            vec![-2, 1, 1, 1, 4]
        );
        assert_eq!(merge_sorted(vec![]), Vec::<Value>::new());
    }
}
