//! Favorite-station bookkeeping.
//!
//! Favorites are persisted as full station values, not ids, so stations that
//! came from outside the bundled catalog (M3U imports) survive a restart
//! intact. Saves are best-effort: a storage failure is logged and the
//! in-memory list stays authoritative for the session.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Station;
use crate::storage::{keys, SessionStore};

/// Persisted favorite-station list.
pub struct Favorites {
    store: Arc<dyn SessionStore>,
    stations: Mutex<Vec<Station>>,
}

impl Favorites {
    /// Creates an empty favorites list backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            stations: Mutex::new(Vec::new()),
        }
    }

    /// Loads the persisted list. Missing or corrupt data yields an empty list.
    pub async fn load(&self) {
        match self.store.get(keys::FAVORITES).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Station>>(&raw) {
                Ok(stations) => *self.stations.lock() = stations,
                Err(e) => log::warn!("[Favorites] Ignoring corrupt favorites data: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("[Favorites] Failed to load favorites: {}", e),
        }
    }

    /// Returns whether `station_id` is a favorite.
    pub fn is_favorite(&self, station_id: &str) -> bool {
        self.stations.lock().iter().any(|s| s.id == station_id)
    }

    /// Returns all favorite stations in insertion order.
    pub fn all(&self) -> Vec<Station> {
        self.stations.lock().clone()
    }

    /// Appends `station` to the favorites. Adding an existing id is a no-op.
    pub async fn add(&self, station: Station) {
        {
            let mut stations = self.stations.lock();
            if stations.iter().any(|s| s.id == station.id) {
                return;
            }
            stations.push(station);
        }
        self.save().await;
    }

    /// Removes the station with `station_id` if present.
    pub async fn remove(&self, station_id: &str) {
        let removed = {
            let mut stations = self.stations.lock();
            let len_before = stations.len();
            stations.retain(|s| s.id != station_id);
            stations.len() < len_before
        };
        if removed {
            self.save().await;
        }
    }

    /// Toggles `station`, returning the new membership state.
    pub async fn toggle(&self, station: Station) -> bool {
        let now_favorite = {
            let mut stations = self.stations.lock();
            if let Some(pos) = stations.iter().position(|s| s.id == station.id) {
                stations.remove(pos);
                false
            } else {
                stations.push(station);
                true
            }
        };
        self.save().await;
        now_favorite
    }

    async fn save(&self) {
        let raw = {
            let stations = self.stations.lock();
            serde_json::to_string(&*stations)
        };
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[Favorites] Failed to encode favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::FAVORITES, &raw).await {
            log::warn!("[Favorites] Failed to save favorites: {}", e);
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
            name: format!("{id} FM"),
            stream_url: format!("https://radio.example/{id}"),
            category: "TEST".to_string(),
            genre: None,
            artist: None,
            artwork: None,
        }
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let favorites = Favorites::new(MemoryStore::new());
        assert!(favorites.toggle(station("kbs-1radio")).await);
        assert!(favorites.is_favorite("kbs-1radio"));
        assert!(!favorites.toggle(station("kbs-1radio")).await);
        assert!(!favorites.is_favorite("kbs-1radio"));
    }

    #[tokio::test]
    async fn add_and_remove_are_idempotent() {
        let favorites = Favorites::new(MemoryStore::new());
        favorites.add(station("a")).await;
        favorites.add(station("a")).await;
        assert_eq!(favorites.all().len(), 1);

        favorites.remove("a").await;
        favorites.remove("a").await;
        assert!(favorites.all().is_empty());
    }

    #[tokio::test]
    async fn load_restores_full_stations() {
        let store = MemoryStore::new();
        let imported = Station {
            id: "station-7".to_string(),
            name: "국악방송".to_string(),
            stream_url: "https://radio.example/gugak".to_string(),
            category: "OTHER".to_string(),
            genre: Some("Radio".to_string()),
            artist: None,
            artwork: None,
        };
        {
            let favorites = Favorites::new(store.clone());
            favorites.add(station("a")).await;
            favorites.add(imported.clone()).await;
        }

        // Stations outside the bundled catalog come back intact.
        let reloaded = Favorites::new(store);
        reloaded.load().await;
        let all = reloaded.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1], imported);
    }

    #[tokio::test]
    async fn corrupt_data_yields_empty_list() {
        let store = MemoryStore::new();
        store.set(keys::FAVORITES, "not json").await.unwrap();

        let favorites = Favorites::new(store);
        favorites.load().await;
        assert!(favorites.all().is_empty());
    }
}
