//! Logical vertex partitioning
//!
//! Assigns each vertex to one of `n` partitions, the way a distributed
//! Pregel deployment spreads vertices across workers. The engine uses the
//! assignment for per-partition round statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// How vertices are spread across partitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionStrategy {
    /// Rolling string hash of the decimal id, modulo the partition count
    #[default]
    Hash,
    /// Ascending ids split into equally sized contiguous chunks
    Range,
}

/// 32-bit rolling hash (`h * 31 + byte`) over the decimal form of the id
fn id_hash(id: VertexId) -> i32 {
    id.to_string()
        .bytes()
        .fold(0i32, |h, b| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(b as i32))
}

/// Assign every id to a partition in `0..partitions`.
///
/// With `partitions <= 1` every vertex lands in partition 0.
pub fn assign_partitions(
    ids: impl IntoIterator<Item = VertexId>,
    strategy: PartitionStrategy,
    partitions: usize,
) -> BTreeMap<VertexId, usize> {
    if partitions <= 1 {
        return ids.into_iter().map(|id| (id, 0)).collect();
    }

    match strategy {
        PartitionStrategy::Hash => ids
            .into_iter()
            .map(|id| (id, id_hash(id).unsigned_abs() as usize % partitions))
            .collect(),
        PartitionStrategy::Range => {
            let mut sorted: Vec<VertexId> = ids.into_iter().collect();
            sorted.sort_unstable();
            sorted.dedup();
            let chunk = sorted.len().div_ceil(partitions).max(1);
            sorted
                .into_iter()
                .enumerate()
                .map(|(index, id)| (id, index / chunk))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_partition() {
        let parts = assign_partitions([3, 1, 2], PartitionStrategy::Hash, 1);
        assert!(parts.values().all(|&p| p == 0));
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn test_hash_matches_rolling_hash() {
        // "12" -> 49 * 31 + 50 = 1569
        assert_eq!(id_hash(12), 1569);
        let parts = assign_partitions([12], PartitionStrategy::Hash, 4);
        assert_eq!(parts[&12], 1569 % 4);
    }

    #[test]
    fn test_hash_is_stable_and_in_range() {
        let a = assign_partitions(0..100, PartitionStrategy::Hash, 3);
        let b = assign_partitions(0..100, PartitionStrategy::Hash, 3);
        assert_eq!(a, b);
        assert!(a.values().all(|&p| p < 3));
    }

    #[test]
    fn test_range_chunks() {
        let parts = assign_partitions([5, 1, 4, 2, 3], PartitionStrategy::Range, 2);
        // ceil(5 / 2) = 3 per chunk
        assert_eq!(parts[&1], 0);
        assert_eq!(parts[&3], 0);
        assert_eq!(parts[&4], 1);
        assert_eq!(parts[&5], 1);
    }

    #[test]
    fn test_range_more_partitions_than_vertices() {
        let parts = assign_partitions([10, 20], PartitionStrategy::Range, 8);
        assert_eq!(parts[&10], 0);
        assert_eq!(parts[&20], 1);
    }
}
