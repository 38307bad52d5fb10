//! Time-boxed memoization of forecast payloads, keyed by coordinate pair.
//!
//! Expiry is checked on read; expired entries are evicted then. There is no
//! size-bounded eviction, only the TTL.

use crate::catalog::LatLon;
use crate::forecast::payload::RawForecastPayload;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

type Key = (OrderedFloat<f64>, OrderedFloat<f64>);

#[derive(Debug)]
struct Entry {
    payload: RawForecastPayload,
    fetched_at: Instant,
}

#[derive(Debug)]
pub(crate) struct PayloadCache {
    ttl: Duration,
    entries: Mutex<HashMap<Key, Entry>>,
}

impl PayloadCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(coordinate: LatLon) -> Key {
        (OrderedFloat(coordinate.0), OrderedFloat(coordinate.1))
    }

    pub(crate) async fn get(&self, coordinate: LatLon) -> Option<RawForecastPayload> {
        self.get_at(coordinate, Instant::now()).await
    }

    pub(crate) async fn put(&self, coordinate: LatLon, payload: RawForecastPayload) {
        self.put_at(coordinate, payload, Instant::now()).await;
    }

    async fn get_at(&self, coordinate: LatLon, now: Instant) -> Option<RawForecastPayload> {
        let key = Self::key(coordinate);
        let mut entries = self.entries.lock().await;
        match entries.get(&key) {
            Some(entry) if now.duration_since(entry.fetched_at) < self.ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    async fn put_at(&self, coordinate: LatLon, payload: RawForecastPayload, now: Instant) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            Self::key(coordinate),
            Entry {
                payload,
                fetched_at: now,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(marker: &str) -> RawForecastPayload {
        RawForecastPayload {
            error_message: Some(marker.to_string()),
            data_1h: None,
        }
    }

    #[tokio::test]
    async fn hit_within_ttl_returns_stored_payload() {
        let cache = PayloadCache::new(Duration::from_secs(60));
        let coordinate = LatLon(-16.40, -71.54);
        let now = Instant::now();

        cache.put_at(coordinate, payload("arequipa"), now).await;

        let hit = cache
            .get_at(coordinate, now + Duration::from_secs(59))
            .await
            .expect("entry still fresh");
        assert_eq!(hit.error_message.as_deref(), Some("arequipa"));
    }

    #[tokio::test]
    async fn read_after_expiry_misses_and_evicts() {
        let cache = PayloadCache::new(Duration::from_secs(60));
        let coordinate = LatLon(-16.40, -71.54);
        let now = Instant::now();

        cache.put_at(coordinate, payload("stale"), now).await;

        assert!(cache
            .get_at(coordinate, now + Duration::from_secs(60))
            .await
            .is_none());
        // Evicted: a later read within what would have been the window still misses.
        assert!(cache
            .get_at(coordinate, now + Duration::from_secs(1))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn coordinates_do_not_collide() {
        let cache = PayloadCache::new(Duration::from_secs(60));
        let now = Instant::now();
        cache.put_at(LatLon(-7.16, -78.52), payload("cajamarca"), now).await;

        assert!(cache.get_at(LatLon(-8.12, -79.03), now).await.is_none());
        let hit = cache
            .get_at(LatLon(-7.16, -78.52), now)
            .await
            .expect("stored coordinate resolves");
        assert_eq!(hit.error_message.as_deref(), Some("cajamarca"));
    }
}
