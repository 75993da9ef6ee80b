//! User-defined station ordering.
//!
//! The catalog ships in a fixed order; users can rearrange it and the chosen
//! order persists as a list of station ids. Stations missing from the saved
//! order (new catalog entries) keep their catalog position at the end.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Station;
use crate::storage::{keys, SessionStore};

/// Persisted station-order preference.
pub struct StationOrder {
    store: Arc<dyn SessionStore>,
    order: Mutex<Vec<String>>,
}

impl StationOrder {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            order: Mutex::new(Vec::new()),
        }
    }

    /// Loads the persisted order. Missing or corrupt data leaves catalog order.
    pub async fn load(&self) {
        match self.store.get(keys::STATION_ORDER).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(order) => *self.order.lock() = order,
                Err(e) => log::warn!("[StationOrder] Ignoring corrupt order data: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("[StationOrder] Failed to load order: {}", e),
        }
    }

    /// Replaces the saved order with the ids of `stations` and persists it.
    pub async fn set_order(&self, stations: &[Station]) {
        let ids: Vec<String> = stations.iter().map(|s| s.id.clone()).collect();
        *self.order.lock() = ids;
        self.save().await;
    }

    /// Returns `stations` rearranged into the saved order.
    ///
    /// Ids absent from the saved order are appended in their input order.
    pub fn apply(&self, stations: &[Station]) -> Vec<Station> {
        let order = self.order.lock();
        if order.is_empty() {
            return stations.to_vec();
        }

        let rank: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut ordered: Vec<&Station> = Vec::with_capacity(stations.len());
        let mut unranked: Vec<&Station> = Vec::new();
        for station in stations {
            if rank.contains_key(station.id.as_str()) {
                ordered.push(station);
            } else {
                unranked.push(station);
            }
        }
        ordered.sort_by_key(|s| rank[s.id.as_str()]);
        ordered.extend(unranked);
        ordered.into_iter().cloned().collect()
    }

    async fn save(&self) {
        let raw = {
            let order = self.order.lock();
            serde_json::to_string(&*order)
        };
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[StationOrder] Failed to encode order: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::STATION_ORDER, &raw).await {
            log::warn!("[StationOrder] Failed to save order: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: id.to_string(),
            stream_url: format!("https://radio.example/{id}"),
            category: "TEST".to_string(),
            genre: None,
            artist: None,
            artwork: None,
        }
    }

    #[tokio::test]
    async fn apply_without_saved_order_keeps_catalog_order() {
        let order = StationOrder::new(MemoryStore::new());
        let stations = vec![station("a"), station("b")];
        let applied = order.apply(&stations);
        assert_eq!(applied, stations);
    }

    #[tokio::test]
    async fn saved_order_is_applied_and_persists() {
        let store = MemoryStore::new();
        let stations = vec![station("a"), station("b"), station("c")];
        {
            let order = StationOrder::new(store.clone());
            let rearranged = vec![stations[2].clone(), stations[0].clone(), stations[1].clone()];
            order.set_order(&rearranged).await;
        }

        let reloaded = StationOrder::new(store);
        reloaded.load().await;
        let applied = reloaded.apply(&stations);
        let ids: Vec<&str> = applied.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn new_stations_append_after_ordered_ones() {
        let order = StationOrder::new(MemoryStore::new());
        order.set_order(&[station("b"), station("a")]).await;

        let stations = vec![station("a"), station("b"), station("new")];
        let applied = order.apply(&stations);
        let ids: Vec<&str> = applied.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "new"]);
    }
}
