//! Shared memory, partitioned per core.
//!
//! One flat array of signed words, conceptually split into N equal
//! contiguous ranges, one per core. Instruction execution never touches
//! memory (the Memory pipeline stage is an architectural placeholder), so
//! contents are whatever the driver pre-populated before the run. The API
//! only ever hands out the owning core's partition, which is what enforces
//! the no-cross-partition invariant.

use crate::common::Word;

/// Flat signed-word memory with per-core partitions.
#[derive(Debug, Clone)]
pub struct SharedMemory {
    words: Vec<Word>,
    partitions: usize,
}

impl SharedMemory {
    /// Allocates `words` zeroed words split across `partitions` cores.
    ///
    /// When `words` is not divisible by `partitions`, the trailing remainder
    /// belongs to no partition and is never touched.
    pub fn new(words: usize, partitions: usize) -> Self {
        Self {
            words: vec![0; words],
            partitions: partitions.max(1),
        }
    }

    /// Number of words in each partition.
    pub fn partition_len(&self) -> usize {
        self.words.len() / self.partitions
    }

    /// The half-open word range `[core * len, (core + 1) * len)` owned by `core`.
    ///
    /// `core` must be below the partition count.
    pub fn partition_range(&self, core: usize) -> std::ops::Range<usize> {
        debug_assert!(core < self.partitions, "core {core} has no partition");
        let len = self.partition_len();
        core * len..(core + 1) * len
    }

    /// Read-only view of one core's partition.
    ///
    /// # Panics
    ///
    /// Panics when `core` is not below the partition count.
    pub fn partition(&self, core: usize) -> &[Word] {
        &self.words[self.partition_range(core)]
    }

    /// Mutable view of one core's partition, for driver pre-population.
    ///
    /// # Panics
    ///
    /// Panics when `core` is not below the partition count.
    pub fn partition_mut(&mut self, core: usize) -> &mut [Word] {
        let range = self.partition_range(core);
        &mut self.words[range]
    }

    /// Sorts one core's partition in ascending order. No word outside the
    /// partition range changes.
    ///
    /// # Panics
    ///
    /// Panics when `core` is not below the partition count.
    pub fn sort_partition(&mut self, core: usize) {
        self.partition_mut(core).sort_unstable();
    }

    /// The whole array, for inspection.
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
