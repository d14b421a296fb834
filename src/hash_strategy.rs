use std::hash::BuildHasher;

use ahash::RandomState;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;
const FNV_MIX: u32 = 0x85EB_CA6B;

const DJB2_SEED: u32 = 5381;
const DJB2_MIX: u32 = 0x27D4_EB2D;

/// Maps a key to a bucket index in `[0, capacity)`.
///
/// Implementations must be pure: the same key and capacity always give the
/// same index, and every string (the empty one included) has an index.
#[cfg_attr(test, mockall::automock)]
pub trait HashStrategy {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Bucket for `key` in a table of `capacity` buckets.
    ///
    /// Panics if `capacity` is zero.
    fn bucket_index(&self, key: &str, capacity: usize) -> usize;
}

impl<S: HashStrategy + ?Sized> HashStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn bucket_index(&self, key: &str, capacity: usize) -> usize {
        (**self).bucket_index(key, capacity)
    }
}

/// Mathematical modulus of a signed value; always lands in `[0, modulus)`.
#[inline]
pub fn floor_mod(value: i32, modulus: usize) -> usize {
    assert!(modulus > 0, "modulus must be positive");
    i64::from(value).rem_euclid(modulus as i64) as usize
}

/// FNV-1a over UTF-16 code units followed by a murmur-style finalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aMix;

impl Fnv1aMix {
    /// Full 32-bit hash of `key`, before index extraction.
    pub fn raw_hash(&self, key: &str) -> u32 {
        let mut h = FNV_OFFSET_BASIS;
        for unit in key.encode_utf16() {
            h ^= u32::from(unit);
            h = h.wrapping_mul(FNV_PRIME);
        }
        h ^= h >> 13;
        h = h.wrapping_mul(FNV_MIX);
        h ^= h >> 16;
        h
    }
}

impl HashStrategy for Fnv1aMix {
    fn name(&self) -> &'static str {
        "FNV-1a-mix"
    }

    #[inline]
    fn bucket_index(&self, key: &str, capacity: usize) -> usize {
        floor_mod(self.raw_hash(key) as i32, capacity)
    }
}

/// djb2 (`h * 33 ^ c`) over UTF-16 code units with a two-shift finalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Djb2Mix;

impl Djb2Mix {
    /// Full 32-bit hash of `key`, before index extraction.
    pub fn raw_hash(&self, key: &str) -> u32 {
        let mut h = DJB2_SEED;
        for unit in key.encode_utf16() {
            h = (h << 5).wrapping_add(h) ^ u32::from(unit);
        }
        h ^= h >> 15;
        h = h.wrapping_mul(DJB2_MIX);
        h ^= h >> 15;
        h
    }
}

impl HashStrategy for Djb2Mix {
    fn name(&self) -> &'static str {
        "djb2-mix"
    }

    #[inline]
    fn bucket_index(&self, key: &str, capacity: usize) -> usize {
        floor_mod(self.raw_hash(key) as i32, capacity)
    }
}

/// General purpose baseline backed by a fixed-seed ahash `RandomState`.
#[derive(Clone)]
pub struct AHashStrategy {
    state: RandomState,
}

impl AHashStrategy {
    pub fn new() -> Self {
        Self::with_seeds(0x243F_6A88_85A3_08D3, 0x1319_8A2E_0370_7344, 0xA409_3822_299F_31D0, 0x082E_FA98_EC4E_6C89)
    }

    pub fn with_seeds(k0: u64, k1: u64, k2: u64, k3: u64) -> Self {
        Self {
            state: RandomState::with_seeds(k0, k1, k2, k3),
        }
    }
}

impl Default for AHashStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl HashStrategy for AHashStrategy {
    fn name(&self) -> &'static str {
        "ahash"
    }

    #[inline]
    fn bucket_index(&self, key: &str, capacity: usize) -> usize {
        assert!(capacity > 0, "capacity must be positive");
        (self.state.hash_one(key) % capacity as u64) as usize
    }
}

/// Strategy selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    Fnv1a,
    Djb2,
    #[value(name = "ahash")]
    AHash,
}

impl Strategy {
    pub fn build(self) -> Box<dyn HashStrategy> {
        match self {
            Strategy::Fnv1a => Box::new(Fnv1aMix),
            Strategy::Djb2 => Box::new(Djb2Mix),
            Strategy::AHash => Box::new(AHashStrategy::new()),
        }
    }
}
