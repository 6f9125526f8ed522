//! In-process tile-response cache: a `DashMap`-backed, capacity-bounded,
//! TTL-evicting key-value store, playing the role the external HTTP cache
//! plays in production. Writes race freely; a duplicate recompute on a miss
//! is cheap and deterministic, so no locking beyond `DashMap`'s own sharding
//! is needed.

use std::time::{Duration, Instant};

use dashmap::DashMap;

pub const CACHE_VERSION: u32 = 1;
pub const DEFAULT_CAPACITY: usize = 4096;

struct Entry {
	bytes: Vec<u8>,
	expires_at: Instant,
}

/// A versioned, TTL-evicting byte cache keyed by `v<V>/<kind>/<z>/<x>/<y>.mvt`.
pub struct Cache {
	entries: DashMap<String, Entry>,
	ttl: Duration,
	capacity: usize,
}

impl Cache {
	pub fn new(ttl: Duration, capacity: usize) -> Self { Self { entries: DashMap::new(), ttl, capacity } }

	pub fn key(kind: &str, z: u32, x: u32, y: u32) -> String { format!("v{CACHE_VERSION}/{kind}/{z}/{x}/{y}.mvt") }

	/// Look up `key`, evicting it first if its TTL has lapsed.
	pub fn get(&self, key: &str) -> Option<Vec<u8>> {
		if let Some(entry) = self.entries.get(key) {
			if entry.expires_at > Instant::now() {
				return Some(entry.bytes.clone());
			}
		}
		log::debug!("cache miss for {key}");
		self.entries.remove(key);
		None
	}

	/// Store `bytes` under `key`. If the cache is at capacity and `key` is
	/// new, evicts one arbitrary entry first: a precise LRU policy isn't
	/// worth the bookkeeping for a TTL-bounded cache this size.
	pub fn put(&self, key: String, bytes: Vec<u8>) {
		if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
			if let Some(evict) = self.entries.iter().next().map(|e| e.key().clone()) {
				self.entries.remove(&evict);
			}
		}
		self.entries.insert(key, Entry { bytes, expires_at: Instant::now() + self.ttl });
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_a_stored_value() {
		let cache = Cache::new(Duration::from_secs(60), 10);
		let key = Cache::key("contour", 4, 1, 2);
		assert!(cache.get(&key).is_none());
		cache.put(key.clone(), vec![1, 2, 3]);
		assert_eq!(cache.get(&key), Some(vec![1, 2, 3]));
	}

	#[test]
	fn expired_entries_are_not_returned() {
		let cache = Cache::new(Duration::from_millis(1), 10);
		let key = Cache::key("hillshade", 0, 0, 0);
		cache.put(key.clone(), vec![9]);
		std::thread::sleep(Duration::from_millis(20));
		assert!(cache.get(&key).is_none());
	}

	#[test]
	fn capacity_bound_evicts_something_rather_than_growing_unbounded() {
		let cache = Cache::new(Duration::from_secs(60), 2);
		cache.put("a".to_string(), vec![1]);
		cache.put("b".to_string(), vec![2]);
		cache.put("c".to_string(), vec![3]);
		assert!(cache.entries.len() <= 2);
	}

	#[test]
	fn keys_are_versioned_and_path_shaped() {
		assert_eq!(Cache::key("terrain", 4, 1, 2), format!("v{CACHE_VERSION}/terrain/4/1/2.mvt"));
	}
}
