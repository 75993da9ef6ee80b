//! Station catalog: the static list of live radio stations.
//!
//! The catalog is process-wide static data loaded once at startup, either from
//! the bundled JSON asset or from caller-provided JSON. Stations are immutable
//! once loaded; favoriting and ordering are layered on top by other modules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bundled station catalog, embedded at compile time.
static BUNDLED_CATALOG: &str = include_str!("../assets/stations.json");

/// A live radio station.
///
/// `id` is unique within a catalog. `stream_url` is an opaque HTTP(S)
/// live-stream endpoint consumed by the playback engine, never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Unique station identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Live stream endpoint.
    pub stream_url: String,
    /// Broadcaster/category grouping (e.g. "KBS", "MBC").
    pub category: String,
    /// Coarse genre label, inferred for imported stations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Artist name shown in media controls. Defaults to "Live Radio" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Artwork URL for lock-screen / notification display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

/// Immutable station catalog with an id index.
pub struct StationCatalog {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
}

impl StationCatalog {
    /// Builds a catalog from a list of stations.
    ///
    /// Later duplicates of an id shadow earlier ones in the index; the list
    /// order is preserved for display.
    #[must_use]
    pub fn new(stations: Vec<Station>) -> Self {
        let by_id = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self { stations, by_id }
    }

    /// Parses a catalog from JSON (an array of stations).
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the JSON is not a station array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stations: Vec<Station> = serde_json::from_str(json)?;
        Ok(Self::new(stations))
    }

    /// Loads the catalog bundled with the crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CATALOG).expect("bundled station catalog is valid JSON")
    }

    /// All stations in display order.
    #[must_use]
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Looks up a station by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.by_id.get(id).map(|&i| &self.stations[i])
    }

    /// Stations belonging to a category, in display order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Station> {
        self.stations
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect()
    }

    /// Distinct categories in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for station in &self.stations {
            if !seen.contains(&station.category) {
                seen.push(station.category.clone());
            }
        }
        seen
    }

    /// Number of stations in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the catalog has no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, category: &str) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {id}"),
            stream_url: format!("https://radio.example/{id}"),
            category: category.to_string(),
            genre: None,
            artist: None,
            artwork: None,
        }
    }

    #[test]
    fn bundled_catalog_parses() {
        let catalog = StationCatalog::bundled();
        assert!(!catalog.is_empty());
        // Every bundled station has a unique id and a stream URL
        for s in catalog.all() {
            assert!(!s.id.is_empty());
            assert!(s.stream_url.starts_with("https://"));
            assert_eq!(catalog.get(&s.id).map(|found| &found.id), Some(&s.id));
        }
    }

    #[test]
    fn bundled_catalog_has_expected_broadcasters() {
        let catalog = StationCatalog::bundled();
        let categories = catalog.categories();
        assert!(categories.iter().any(|c| c == "KBS"));
        assert!(categories.iter().any(|c| c == "MBC"));
        assert!(categories.iter().any(|c| c == "SBS"));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = StationCatalog::new(vec![station("a", "X"), station("b", "Y")]);
        assert_eq!(catalog.get("b").map(|s| s.category.as_str()), Some("Y"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn by_category_preserves_order() {
        let catalog = StationCatalog::new(vec![
            station("a", "X"),
            station("b", "Y"),
            station("c", "X"),
        ]);
        let x: Vec<String> = catalog
            .by_category("X")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(x, vec!["a", "c"]);
    }

    #[test]
    fn categories_in_first_appearance_order() {
        let catalog = StationCatalog::new(vec![
            station("a", "X"),
            station("b", "Y"),
            station("c", "X"),
        ]);
        assert_eq!(catalog.categories(), vec!["X", "Y"]);
    }

    #[test]
    fn station_serializes_to_camel_case() {
        let s = station("a", "X");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["streamUrl"], "https://radio.example/a");
        assert!(json.get("artwork").is_none());
    }
}
