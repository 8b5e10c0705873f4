use crate::errors::config::{ConfigError, ConfigResult};
use bagcoin_hashes::Hash;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Hard-coded `(height, hash)` pairs pinning the accepted chain history,
/// together with summary statistics up to the newest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointList {
    entries: Vec<(u64, Hash)>,
    /// Unix timestamp of the newest checkpointed block
    pub last_checkpoint_time: u64,
    /// Total transactions in the chain up to the newest checkpoint
    pub transactions_through_checkpoint: u64,
    /// Estimated transactions per day after the newest checkpoint
    pub estimated_transactions_per_day: u64,
}

impl CheckpointList {
    /// Builds a list from entries ordered by strictly increasing height.
    pub fn new(
        entries: Vec<(u64, Hash)>,
        last_checkpoint_time: u64,
        transactions_through_checkpoint: u64,
        estimated_transactions_per_day: u64,
    ) -> ConfigResult<Self> {
        if let Some((_, out_of_order)) = entries.iter().tuple_windows().find(|(a, b)| a.0 >= b.0) {
            return Err(ConfigError::UnsortedCheckpoints(out_of_order.0));
        }
        Ok(Self { entries, last_checkpoint_time, transactions_through_checkpoint, estimated_transactions_per_day })
    }

    /// The checkpointed hash at `height`, if that height is checkpointed.
    pub fn hash_at(&self, height: u64) -> Option<Hash> {
        self.entries.binary_search_by_key(&height, |&(h, _)| h).ok().map(|idx| self.entries[idx].1)
    }

    /// True when `hash` does not contradict this list: the height is either
    /// not checkpointed at all or checkpointed with exactly this hash.
    pub fn is_consistent_with(&self, height: u64, hash: Hash) -> bool {
        match self.hash_at(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// The newest checkpoint.
    pub fn highest(&self) -> Option<(u64, Hash)> {
        self.entries.last().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(u64, Hash)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
