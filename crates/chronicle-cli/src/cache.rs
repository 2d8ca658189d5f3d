// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Bounded on-disk cache of history snapshots
//!
//! Repeated runs against an unchanged repository skip the log walk by
//! reusing the snapshot stored under the run's fingerprint (head revision
//! plus canonical query options). The cache is a pure optimization: any
//! failure to read or write it is swallowed and the pipeline proceeds as
//! if no cache existed.

use std::fs;
use std::path::{Path, PathBuf};

use chronicle_git::HistorySnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Maximum number of snapshots kept; once exceeded, the earliest-inserted
/// entry is evicted first.
pub const CACHE_CAPACITY: usize = 10;

/// One stored snapshot and the fingerprint that keys it
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheSlot {
    fingerprint: String,
    snapshot: HistorySnapshot,
}

/// Insertion-ordered snapshot store, bounded at [`CACHE_CAPACITY`] entries
///
/// Eviction follows insertion order, not access order: reading an entry
/// does not renew it, and overwriting one keeps its original rank.
#[derive(Debug, Default)]
pub struct HistoryCache {
    path: Option<PathBuf>,
    slots: Vec<CacheSlot>,
}

impl HistoryCache {
    /// Load the cache from a file
    ///
    /// A missing or unreadable file yields an empty cache bound to the
    /// same path, so the next [`persist`](Self::persist) starts fresh.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<CacheSlot>>(&raw) {
                Ok(slots) => slots,
                Err(e) => {
                    debug!("discarding unreadable cache {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("starting with an empty cache: {e}");
                Vec::new()
            }
        };
        debug!(entries = slots.len(), "loaded history cache");
        HistoryCache {
            path: Some(path),
            slots,
        }
    }

    /// An in-memory cache that never touches the filesystem
    #[must_use]
    pub fn ephemeral() -> Self {
        HistoryCache::default()
    }

    /// Number of stored snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Look up the snapshot stored under a fingerprint
    #[must_use]
    pub fn get(&self, fingerprint: &str) -> Option<&HistorySnapshot> {
        self.slots
            .iter()
            .find(|slot| slot.fingerprint == fingerprint)
            .map(|slot| &slot.snapshot)
    }

    /// Store a snapshot under a fingerprint
    ///
    /// A fingerprint already present is overwritten in place and keeps its
    /// insertion rank. A new fingerprint is appended, evicting the
    /// earliest-inserted entry once the store grows past
    /// [`CACHE_CAPACITY`].
    pub fn put(&mut self, fingerprint: impl Into<String>, snapshot: HistorySnapshot) {
        let fingerprint = fingerprint.into();
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.fingerprint == fingerprint)
        {
            slot.snapshot = snapshot;
            return;
        }

        self.slots.push(CacheSlot {
            fingerprint,
            snapshot,
        });
        while self.slots.len() > CACHE_CAPACITY {
            let evicted = self.slots.remove(0);
            debug!("evicted cache entry {}", evicted.fingerprint);
        }
    }

    /// Write the cache back to its file
    ///
    /// The data lands in a temporary sibling first and is moved into place
    /// with a rename, so a crash mid-write never leaves a truncated cache
    /// behind. Failures are logged and otherwise ignored; an ephemeral
    /// cache persists nothing.
    pub fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = self.write_atomically(path) {
            warn!("failed to persist history cache to {}: {e}", path.display());
        }
    }

    fn write_atomically(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.slots)?;
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The store never grows past its capacity, whatever the put order.
        #[test]
        fn store_never_exceeds_capacity(
            keys in proptest::collection::vec("[a-z]{1,8}", 0..40)
        ) {
            let mut cache = HistoryCache::ephemeral();
            for key in &keys {
                cache.put(key.clone(), HistorySnapshot::empty(Vec::new(), Vec::new()));
            }
            prop_assert!(cache.len() <= CACHE_CAPACITY);
        }

        /// The most recently put fingerprint is always retrievable.
        #[test]
        fn last_put_is_always_retrievable(
            keys in proptest::collection::vec("[a-z]{1,8}", 1..40)
        ) {
            let mut cache = HistoryCache::ephemeral();
            for key in &keys {
                cache.put(key.clone(), HistorySnapshot::empty(Vec::new(), Vec::new()));
            }
            let last = keys.last().unwrap();
            prop_assert!(cache.get(last).is_some());
        }
    }
}
