//! Chained hash tables of fixed capacity with pluggable hash strategies.
//!
//! The same keys are inserted into tables that differ only in their
//! [`HashStrategy`], and a [`MetricsSnapshot`] of each table's bucket
//! distribution is compared. Two strategies are provided for that
//! comparison, an FNV-1a variant and a djb2 variant, both hashing the
//! key's UTF-16 code units and finishing with an avalanche step.
//!
//! ```
//! use hashbench::{ChainedHashTable, Fnv1aMix, MetricsSnapshot};
//!
//! let mut table = ChainedHashTable::new(4, Fnv1aMix);
//! for key in ["ana", "eva", "ana", "leo"] {
//!     table.insert(key)?;
//! }
//! assert_eq!(table.size(), 3);
//!
//! let metrics = MetricsSnapshot::capture(&table);
//! assert_eq!(metrics.collisions_total(), 1);
//! assert_eq!(metrics.max_chain_length(), 2);
//! # Ok::<(), hashbench::HashBenchError>(())
//! ```

mod chained_table;
pub use chained_table::{clamp_capacity, ChainedHashTable, Insertion, MAX_CAPACITY};

mod hash_strategy;
pub use hash_strategy::{floor_mod, AHashStrategy, Djb2Mix, Fnv1aMix, HashStrategy, Strategy};

mod metrics;
pub use metrics::MetricsSnapshot;

mod error;
pub use error::{HashBenchError, Result};

pub mod benchmark;
pub mod loader;
pub mod logging;
pub mod pdf;
pub mod report;
