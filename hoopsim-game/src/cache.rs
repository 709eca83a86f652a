//! Optional memo of derived attributes, keyed on the exact record snapshot.
use std::collections::HashMap;
use std::hash::Hasher;
use std::sync::{Arc, PoisonError, RwLock};
use twox_hash::XxHash64;

use crate::attributes::EnhancedAttributes;
use crate::player::PlayerRecord;

struct CacheEntry {
    record: PlayerRecord,
    attributes: Arc<EnhancedAttributes>,
}

/// Read-mostly cache shared between concurrent simulations.
///
/// Entries are published once and never mutated; readers get an `Arc` to the
/// frozen attributes.
#[derive(Default)]
pub struct AttributeCache {
    entries: RwLock<HashMap<u64, CacheEntry>>,
}

impl AttributeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of a record's serialized form.
    #[must_use]
    pub fn fingerprint(record: &PlayerRecord) -> Option<u64> {
        let bytes = serde_json::to_vec(record).ok()?;
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(&bytes);
        Some(hasher.finish())
    }

    /// Cached attributes for `record`, deriving and publishing them on a miss.
    pub fn get_or_derive(&self, record: &PlayerRecord) -> Arc<EnhancedAttributes> {
        let Some(key) = Self::fingerprint(record) else {
            return Arc::new(EnhancedAttributes::derive(record));
        };

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(&key).filter(|entry| entry.record == *record) {
                return Arc::clone(&entry.attributes);
            }
        }

        let attributes = Arc::new(EnhancedAttributes::derive(record));
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get(&key) {
            Some(entry) if entry.record == *record => Arc::clone(&entry.attributes),
            // Fingerprint collision with a different record: serve uncached.
            Some(_) => attributes,
            None => {
                entries.insert(
                    key,
                    CacheEntry {
                        record: record.clone(),
                        attributes: Arc::clone(&attributes),
                    },
                );
                attributes
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Position, SeasonStats};
    use std::thread;

    fn shooter(points: f64) -> PlayerRecord {
        PlayerRecord::new("7", "Shooter", Position::ShootingGuard).with_stats(SeasonStats {
            points: Some(points),
            ..SeasonStats::default()
        })
    }

    #[test]
    fn repeated_lookups_share_one_entry() {
        let cache = AttributeCache::new();
        let first = cache.get_or_derive(&shooter(20.0));
        let second = cache.get_or_derive(&shooter(20.0));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_snapshot_is_a_new_key() {
        let cache = AttributeCache::new();
        let before = cache.get_or_derive(&shooter(20.0));
        let after = cache.get_or_derive(&shooter(28.0));
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.len(), 2);
        assert_eq!(*after, EnhancedAttributes::derive(&shooter(28.0)));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_readers_agree() {
        let cache = Arc::new(AttributeCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_derive(&shooter(15.0)))
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("reader thread"))
            .collect();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(cache.len(), 1);
    }
}
