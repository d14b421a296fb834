use log::debug;

use crate::error::{HashBenchError, Result};
use crate::hash_strategy::HashStrategy;

/// Upper bound on the number of buckets a table may have.
pub const MAX_CAPACITY: usize = 32;

struct Node {
    key: Box<str>,
    next: Link,
}

type Link = Option<Box<Node>>;

/// What a call to [`ChainedHashTable::insert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The key went into an empty bucket.
    Placed,
    /// The key went into a bucket that already held at least one key.
    Collided,
    /// The key was already present; nothing changed.
    Duplicate,
}

/// A fixed-capacity hash table of singly-linked chains.
///
/// The strategy decides the bucket of each key. Capacity never changes after
/// construction and keys are never removed.
pub struct ChainedHashTable<S> {
    buckets: Vec<Link>,
    strategy: S,
    size: usize,
    collisions_total: u64,
}

/// Resolves a requested capacity; anything outside `1..=MAX_CAPACITY` becomes `MAX_CAPACITY`.
pub fn clamp_capacity(requested: i64) -> usize {
    if requested <= 0 || requested > MAX_CAPACITY as i64 {
        MAX_CAPACITY
    } else {
        requested as usize
    }
}

impl<S: HashStrategy> ChainedHashTable<S> {
    pub fn new(requested_capacity: i64, strategy: S) -> Self {
        let capacity = clamp_capacity(requested_capacity);
        if capacity as i64 != requested_capacity {
            debug!(
                "{}: requested capacity {} clamped to {}",
                strategy.name(),
                requested_capacity,
                capacity
            );
        }

        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);

        ChainedHashTable {
            buckets,
            strategy,
            size: 0,
            collisions_total: 0,
        }
    }

    /// Adds `key` unless it is already present.
    ///
    /// A collision is counted once per insertion that lands in an occupied
    /// bucket. Duplicates leave the table untouched.
    pub fn insert<'k>(&mut self, key: impl Into<Option<&'k str>>) -> Result<Insertion> {
        let key = require_key(key.into())?;
        let idx = self.strategy.bucket_index(key, self.buckets.len());
        let bucket = &mut self.buckets[idx];

        let outcome = if bucket.is_none() {
            Insertion::Placed
        } else if chain_contains(bucket, key) {
            return Ok(Insertion::Duplicate);
        } else {
            self.collisions_total += 1;
            Insertion::Collided
        };

        let head = bucket.take();
        *bucket = Some(Box::new(Node {
            key: key.into(),
            next: head,
        }));
        self.size += 1;
        Ok(outcome)
    }

    /// Whether `key` is stored. Only the key's own bucket is scanned.
    pub fn contains<'k>(&self, key: impl Into<Option<&'k str>>) -> Result<bool> {
        let key = require_key(key.into())?;
        let idx = self.strategy.bucket_index(key, self.buckets.len());
        Ok(chain_contains(&self.buckets[idx], key))
    }
}

impl<S> ChainedHashTable<S> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn collisions_total(&self) -> u64 {
        self.collisions_total
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Number of keys chained at each bucket, indexed by bucket.
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(chain_len).collect()
    }
}

impl<S> Drop for ChainedHashTable<S> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don't overflow the stack.
        for bucket in self.buckets.iter_mut() {
            let mut cur = bucket.take();
            while let Some(mut node) = cur {
                cur = node.next.take();
            }
        }
    }
}

fn require_key(key: Option<&str>) -> Result<&str> {
    key.ok_or(HashBenchError::InvalidArgument { what: "key is absent" })
}

fn chain_contains(link: &Link, key: &str) -> bool {
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        if &*node.key == key {
            return true;
        }
        cur = node.next.as_deref();
    }
    false
}

fn chain_len(link: &Link) -> usize {
    let mut len = 0;
    let mut cur = link.as_deref();
    while let Some(node) = cur {
        len += 1;
        cur = node.next.as_deref();
    }
    len
}
