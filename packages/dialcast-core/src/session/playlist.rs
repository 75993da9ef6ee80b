//! Wraparound playlist cursor.

use crate::catalog::Station;

/// Ordered station sequence with infinite-loop navigation.
///
/// The playlist is replaced wholesale by the presentation layer; navigation
/// wraps at both ends, so a non-empty playlist always has a next and a
/// previous station.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    stations: Vec<Station>,
}

impl Playlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the playlist contents.
    pub fn replace(&mut self, stations: Vec<Station>) {
        self.stations = stations;
    }

    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Position of the station with `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.stations.iter().position(|s| s.id == id)
    }

    /// The station after `current_id`, wrapping from the last entry to the
    /// first. A current station not found in the playlist is treated as
    /// sitting before the start, so next is the first entry.
    #[must_use]
    pub fn next_from(&self, current_id: Option<&str>) -> Option<Station> {
        if self.stations.is_empty() {
            return None;
        }
        let index = match current_id.and_then(|id| self.index_of(id)) {
            Some(i) => (i + 1) % self.stations.len(),
            None => 0,
        };
        Some(self.stations[index].clone())
    }

    /// The station before `current_id`, wrapping from the first entry to the
    /// last. An unknown current station yields the last entry.
    #[must_use]
    pub fn previous_from(&self, current_id: Option<&str>) -> Option<Station> {
        if self.stations.is_empty() {
            return None;
        }
        let len = self.stations.len();
        let index = match current_id.and_then(|id| self.index_of(id)) {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        Some(self.stations[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn playlist(ids: &[&str]) -> Playlist {
        let mut p = Playlist::new();
        p.replace(ids.iter().map(|id| station(id)).collect());
        p
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let p = playlist(&["a", "b", "c"]);
        assert_eq!(p.next_from(Some("c")).unwrap().id, "a");
        assert_eq!(p.next_from(Some("a")).unwrap().id, "b");
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let p = playlist(&["a", "b", "c"]);
        assert_eq!(p.previous_from(Some("a")).unwrap().id, "c");
        assert_eq!(p.previous_from(Some("b")).unwrap().id, "a");
    }

    #[test]
    fn unknown_current_is_before_start() {
        let p = playlist(&["a", "b", "c"]);
        assert_eq!(p.next_from(Some("zz")).unwrap().id, "a");
        assert_eq!(p.next_from(None).unwrap().id, "a");
        assert_eq!(p.previous_from(Some("zz")).unwrap().id, "c");
    }

    #[test]
    fn empty_playlist_has_no_navigation() {
        let p = Playlist::new();
        assert!(p.next_from(Some("a")).is_none());
        assert!(p.previous_from(None).is_none());
    }
}
