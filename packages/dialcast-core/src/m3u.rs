//! M3U playlist import and export.
//!
//! Supports the plain Extended M3U dialect used by radio playlist sharing:
//! `#EXTINF:duration,title` lines followed by an `http(s)` URL. Anything else
//! (including HLS-specific tags) is ignored.

use crate::catalog::Station;

/// A parsed `#EXTINF` entry with its stream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct M3uEntry {
    /// Display title from the `#EXTINF` line.
    pub title: String,
    /// Stream URL following the `#EXTINF` line.
    pub url: String,
    /// Declared duration in seconds; live streams use `-1`.
    pub duration: i64,
}

/// Parses M3U content into entries.
///
/// A URL line without a preceding `#EXTINF` title is dropped. Unknown tags
/// and blank lines are skipped.
#[must_use]
pub fn parse_m3u(content: &str) -> Vec<M3uEntry> {
    let mut entries = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_duration: i64 = -1;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("#EXTM3U") {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#EXTINF:") {
            if let Some((duration, title)) = rest.split_once(',') {
                if let Ok(duration) = duration.trim().parse::<i64>() {
                    let title = title.trim();
                    if !title.is_empty() {
                        current_duration = duration;
                        current_title = Some(title.to_string());
                    }
                }
            }
        } else if line.starts_with("http://") || line.starts_with("https://") {
            if let Some(title) = current_title.take() {
                entries.push(M3uEntry {
                    title,
                    url: line.to_string(),
                    duration: current_duration,
                });
            }
            current_duration = -1;
        }
    }

    entries
}

/// Converts an entry into a station.
///
/// The category is the leading all-uppercase ASCII token of the title (e.g.
/// "KBS 1라디오" -> "KBS"), falling back to "OTHER". The genre is inferred
/// from title keywords.
#[must_use]
pub fn entry_to_station(entry: &M3uEntry, index: usize) -> Station {
    let category = entry
        .title
        .split_once(' ')
        .map(|(first, _)| first)
        .filter(|first| !first.is_empty() && first.chars().all(|c| c.is_ascii_uppercase()))
        .unwrap_or("OTHER")
        .to_string();

    Station {
        id: format!("station-{index}"),
        name: entry.title.clone(),
        stream_url: entry.url.clone(),
        category,
        genre: Some(infer_genre(&entry.title).to_string()),
        artist: None,
        artwork: None,
    }
}

/// Parses M3U content directly into stations.
#[must_use]
pub fn parse_m3u_to_stations(content: &str) -> Vec<Station> {
    parse_m3u(content)
        .iter()
        .enumerate()
        .map(|(index, entry)| entry_to_station(entry, index))
        .collect()
}

/// Serializes stations back into M3U format.
#[must_use]
pub fn stations_to_m3u(stations: &[Station]) -> String {
    let mut out = String::from("#EXTM3U\n");
    for station in stations {
        out.push_str(&format!("#EXTINF:-1,{}\n{}\n", station.name, station.stream_url));
    }
    out
}

fn infer_genre(title: &str) -> &'static str {
    const RELIGION: [&str; 5] = ["종교", "불교", "기독", "천주교", "가톨릭"];

    if title.contains("FM") || title.contains("음악") {
        "Music"
    } else if title.contains("교통") {
        "Traffic"
    } else if title.contains("뉴스") {
        "News"
    } else if title.contains("교육") {
        "Education"
    } else if RELIGION.iter().any(|kw| title.contains(kw)) {
        "Religion"
    } else {
        "Radio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "#EXTM3U\n\
        #EXTINF:-1,KBS 1라디오\n\
        https://radio.example/kbs1\n\
        \n\
        #EXTINF:-1,TBS 교통방송\n\
        http://radio.example/tbs\n";

    #[test]
    fn parses_entries_with_titles() {
        let entries = parse_m3u(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "KBS 1라디오");
        assert_eq!(entries[0].url, "https://radio.example/kbs1");
        assert_eq!(entries[0].duration, -1);
    }

    #[test]
    fn url_without_title_is_dropped() {
        let entries = parse_m3u("#EXTM3U\nhttps://radio.example/orphan\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn category_comes_from_leading_uppercase_token() {
        let stations = parse_m3u_to_stations(SAMPLE);
        assert_eq!(stations[0].category, "KBS");
        assert_eq!(stations[0].id, "station-0");
        assert_eq!(stations[1].category, "TBS");
    }

    #[test]
    fn lowercase_or_missing_prefix_falls_back_to_other() {
        let entry = M3uEntry {
            title: "국악방송".to_string(),
            url: "https://radio.example/gugak".to_string(),
            duration: -1,
        };
        assert_eq!(entry_to_station(&entry, 3).category, "OTHER");
    }

    #[test]
    fn genre_inference_matches_keywords() {
        assert_eq!(infer_genre("CBS 음악FM"), "Music");
        assert_eq!(infer_genre("TBS 교통방송"), "Traffic");
        assert_eq!(infer_genre("YTN 뉴스"), "News");
        assert_eq!(infer_genre("EBS 교육방송"), "Education");
        assert_eq!(infer_genre("BBS 불교방송"), "Religion");
        assert_eq!(infer_genre("국악방송"), "Radio");
    }

    #[test]
    fn round_trips_through_m3u() {
        let stations = parse_m3u_to_stations(SAMPLE);
        let serialized = stations_to_m3u(&stations);
        let reparsed = parse_m3u(&serialized);
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed[1].title, "TBS 교통방송");
    }
}
