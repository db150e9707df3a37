use std::collections::VecDeque;
use std::num::NonZeroUsize;

use deepsize::DeepSizeOf;

use crate::encoding::Record;
use crate::error::StoreError;

/// Default number of buckets (prime)
pub const DEFAULT_BUCKETS: usize = 4999;

const HASH_SEED: u32 = 5381;

/// DJB2 string hash: `hash * 33 + byte` with 32-bit wraparound.
pub fn hash(key: &str) -> u32 {
    key.bytes()
        .fold(HASH_SEED, |h, b| h.wrapping_mul(33).wrapping_add(u32::from(b)))
}

/// Fixed-size chained hash table of records.
///
/// Each bucket owns its chain; the newest record sits at the front, so a
/// lookup sees the most recent load for a code first. Older records with the
/// same code stay resident until `teardown`.
pub struct RecordStore {
    buckets: Vec<VecDeque<Record>>,
    len: usize,
}

impl RecordStore {
    /// Create an empty store with a fixed bucket count
    pub fn new(bucket_count: NonZeroUsize) -> Self {
        let buckets = (0..bucket_count.get()).map(|_| VecDeque::new()).collect();
        Self { buckets, len: 0 }
    }

    /// Reset every bucket to empty
    pub fn init(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Bucket index for a code
    pub fn bucket_index(&self, code: &str) -> usize {
        hash(code) as usize % self.buckets.len()
    }

    /// Link a record at the head of its bucket's chain.
    ///
    /// On allocation failure the chain is left untouched.
    pub fn insert(&mut self, record: Record) -> Result<(), StoreError> {
        let index = self.bucket_index(&record.code);
        let bucket = &mut self.buckets[index];
        if let Err(source) = bucket.try_reserve(1) {
            return Err(StoreError::Allocation {
                code: record.code,
                source,
            });
        }
        bucket.push_front(record);
        self.len += 1;
        Ok(())
    }

    /// Most recently inserted record for `code`
    pub fn lookup(&self, code: &str) -> Option<&Record> {
        self.buckets[self.bucket_index(code)]
            .iter()
            .find(|record| record.code == code)
    }

    /// Release every record and reset all buckets, returning how many records were dropped
    pub fn teardown(&mut self) -> usize {
        let released = self.len;
        for bucket in &mut self.buckets {
            // replace rather than clear so the chain's capacity goes too
            *bucket = VecDeque::new();
        }
        self.len = 0;
        released
    }

    /// Number of resident records, shadowed duplicates included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest chain
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).max().unwrap_or(0)
    }

    /// Heap and inline bytes held by resident records
    pub fn resident_bytes(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter())
            .map(DeepSizeOf::deep_size_of)
            .sum()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_BUCKETS).unwrap_or(NonZeroUsize::MIN))
    }
}
