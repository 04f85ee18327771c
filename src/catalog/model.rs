use std::time::Duration;

use serde::Deserialize;

/// A single track as stored in the catalog document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Nominal length in seconds.
    #[serde(default)]
    pub duration: f64,
    /// Audio source path; empty when the track has no recording.
    #[serde(default)]
    pub audio: String,
    /// Track-specific cover; empty means "use the album cover".
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub lyrics: String,
}

/// An album with its tracks in release order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Flattened, denormalized view of one track used by the archive list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveItem {
    pub id: String,
    pub album_id: String,
    pub album_title: String,
    pub album_year: i32,
    /// 1-based position within the album.
    pub index: usize,
    pub title: String,
    pub duration: f64,
    pub audio: String,
    /// Track cover, or the album cover when the track has none.
    pub cover: String,
    pub lyrics: String,
}

impl ArchiveItem {
    /// Nominal duration from the catalog; negative or non-finite values count as zero.
    pub fn nominal_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration.max(0.0)).unwrap_or(Duration::ZERO)
    }

    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty()
    }
}
