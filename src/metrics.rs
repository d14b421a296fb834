use crate::chained_table::ChainedHashTable;

/// Point-in-time distribution statistics of a table.
///
/// A snapshot holds no reference to the table it was taken from; capture a
/// new one to observe later inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    distribution: Vec<usize>,
    collisions_per_bucket: Vec<usize>,
    max_chain_length: usize,
    non_empty_buckets: usize,
    avg_chain_len_non_empty: f64,
    size: usize,
    collisions_total: u64,
}

impl MetricsSnapshot {
    pub fn capture<S>(table: &ChainedHashTable<S>) -> Self {
        Self::from_chain_lengths(table.chain_lengths(), table.collisions_total())
    }

    /// Derives every statistic from the per-bucket chain lengths.
    ///
    /// `collisions_total` is the table's event counter; it is carried as is
    /// and never reconciled with the structural per-bucket figures.
    pub fn from_chain_lengths(lengths: Vec<usize>, collisions_total: u64) -> Self {
        let collisions_per_bucket = lengths.iter().map(|&len| len.saturating_sub(1)).collect();
        let max_chain_length = lengths.iter().copied().max().unwrap_or(0);
        let non_empty_buckets = lengths.iter().filter(|&&len| len > 0).count();
        let size: usize = lengths.iter().sum();

        let avg_chain_len_non_empty = if non_empty_buckets > 0 {
            size as f64 / non_empty_buckets as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            distribution: lengths,
            collisions_per_bucket,
            max_chain_length,
            non_empty_buckets,
            avg_chain_len_non_empty,
            size,
            collisions_total,
        }
    }

    /// Keys per bucket.
    pub fn distribution(&self) -> &[usize] {
        &self.distribution
    }

    /// `max(0, len - 1)` per bucket.
    pub fn collisions_per_bucket(&self) -> &[usize] {
        &self.collisions_per_bucket
    }

    pub fn max_chain_length(&self) -> usize {
        self.max_chain_length
    }

    pub fn non_empty_buckets(&self) -> usize {
        self.non_empty_buckets
    }

    /// Mean chain length over non-empty buckets, `0.0` for an empty table.
    pub fn avg_chain_len_non_empty(&self) -> f64 {
        self.avg_chain_len_non_empty
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.distribution.len()
    }

    pub fn collisions_total(&self) -> u64 {
        self.collisions_total
    }

    pub fn structural_collisions(&self) -> usize {
        self.collisions_per_bucket.iter().sum()
    }
}
