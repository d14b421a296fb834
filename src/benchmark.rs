use std::time::{Duration, Instant};

use log::{debug, info};

use crate::chained_table::ChainedHashTable;
use crate::error::Result;
use crate::hash_strategy::{HashStrategy, Strategy};
use crate::metrics::MetricsSnapshot;

/// Stride used to sample present keys for the search probe.
const HIT_STRIDE: usize = 7;

/// Knobs for one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSettings {
    pub capacity: i64,
    pub search_hits: usize,
    pub search_misses: usize,
    pub baseline: bool,
}

impl Default for BenchSettings {
    fn default() -> Self {
        BenchSettings {
            capacity: 32,
            search_hits: 500,
            search_misses: 500,
            baseline: false,
        }
    }
}

/// Everything measured for one table.
#[derive(Debug, Clone)]
pub struct TableReport {
    pub title: String,
    pub strategy: &'static str,
    pub insert_time: Duration,
    pub search_time: Duration,
    /// Lookups that returned `true`.
    pub found: usize,
    /// Lookups performed.
    pub probes: usize,
    pub metrics: MetricsSnapshot,
}

fn missing_key(i: usize) -> String {
    format!("__absent__{i}")
}

/// Inserts every key, then times `min(hits, len)` strided lookups of present
/// keys followed by `misses` lookups of keys that were never inserted.
pub fn run_table<S: HashStrategy>(
    title: &str,
    strategy: S,
    keys: &[String],
    settings: &BenchSettings,
) -> Result<TableReport> {
    let mut table = ChainedHashTable::new(settings.capacity, strategy);

    let start = Instant::now();
    for key in keys {
        table.insert(key.as_str())?;
    }
    let insert_time = start.elapsed();

    let hits = settings.search_hits.min(keys.len());
    let misses: Vec<String> = (0..settings.search_misses).map(missing_key).collect();
    let mut found = 0;

    let start = Instant::now();
    for i in 0..hits {
        if table.contains(keys[(i * HIT_STRIDE) % keys.len()].as_str())? {
            found += 1;
        }
    }
    for key in &misses {
        if table.contains(key.as_str())? {
            found += 1;
        }
    }
    let search_time = start.elapsed();

    let metrics = MetricsSnapshot::capture(&table);
    debug!(
        "{}: {} keys, {} collisions, insert {:?}, search {:?}",
        table.strategy().name(),
        metrics.size(),
        metrics.collisions_total(),
        insert_time,
        search_time
    );

    Ok(TableReport {
        title: title.to_owned(),
        strategy: table.strategy().name(),
        insert_time,
        search_time,
        found,
        probes: hits + misses.len(),
        metrics,
    })
}

/// Runs the FNV-1a table, the djb2 table and, if asked, the ahash baseline.
pub fn run_benchmark(keys: &[String], settings: &BenchSettings) -> Result<Vec<TableReport>> {
    let mut tables = vec![
        ("Hash Table 1 (FNV-1a-like)", Strategy::Fnv1a),
        ("Hash Table 2 (djb2-like)", Strategy::Djb2),
    ];
    if settings.baseline {
        tables.push(("Baseline (ahash)", Strategy::AHash));
    }

    let mut reports = Vec::with_capacity(tables.len());
    for (title, strategy) in tables {
        let report = run_table(title, strategy.build(), keys, settings)?;
        info!(
            "{}: size={} collisions={} max_chain={}",
            report.title,
            report.metrics.size(),
            report.metrics.collisions_total(),
            report.metrics.max_chain_length()
        );
        reports.push(report);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_strategy::{Djb2Mix, Fnv1aMix};

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_run_table_counts_probes() {
        let keys = keys(&["ana", "eva", "ana", "leo"]);
        let settings = BenchSettings {
            capacity: 4,
            search_hits: 500,
            search_misses: 10,
            baseline: false,
        };
        let report = run_table("t", Fnv1aMix, &keys, &settings).unwrap();

        assert_eq!(report.strategy, "FNV-1a-mix");
        assert_eq!(report.probes, 4 + 10);
        // Every sampled present key is found and no absent key is.
        assert_eq!(report.found, 4);
        assert_eq!(report.metrics.size(), 3);
        assert_eq!(report.metrics.collisions_total(), 1);
        assert_eq!(report.metrics.capacity(), 4);
    }

    #[test]
    fn test_run_table_clamps_capacity() {
        let keys = keys(&["ana"]);
        let settings = BenchSettings {
            capacity: 0,
            ..BenchSettings::default()
        };
        let report = run_table("t", Djb2Mix, &keys, &settings).unwrap();
        assert_eq!(report.metrics.capacity(), 32);
    }

    #[test]
    fn test_run_benchmark_order() {
        let keys = keys(&["ana", "eva", "leo", "maria", "bia"]);
        let reports = run_benchmark(&keys, &BenchSettings::default()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].strategy, "FNV-1a-mix");
        assert_eq!(reports[1].strategy, "djb2-mix");
        for report in &reports {
            assert_eq!(report.metrics.size(), 5);
        }

        let settings = BenchSettings {
            baseline: true,
            ..BenchSettings::default()
        };
        let reports = run_benchmark(&keys, &settings).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].strategy, "ahash");
    }

    #[test]
    fn test_run_table_empty_keys() {
        let report = run_table("t", Fnv1aMix, &[], &BenchSettings::default()).unwrap();
        assert_eq!(report.probes, 500);
        assert_eq!(report.found, 0);
        assert_eq!(report.metrics.avg_chain_len_non_empty(), 0.0);
    }
}
