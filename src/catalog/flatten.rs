use super::model::{Album, ArchiveItem};

/// Flatten the catalog into one `ArchiveItem` per track.
///
/// Albums keep catalog order and tracks keep album order. `index` restarts at 1
/// for every album.
pub fn flatten(albums: &[Album]) -> Vec<ArchiveItem> {
    albums
        .iter()
        .flat_map(|album| {
            album
                .tracks
                .iter()
                .enumerate()
                .map(move |(i, track)| ArchiveItem {
                    id: track.id.clone(),
                    album_id: album.id.clone(),
                    album_title: album.title.clone(),
                    album_year: album.year,
                    index: i + 1,
                    title: track.title.clone(),
                    duration: track.duration,
                    audio: track.audio.clone(),
                    cover: if track.cover.is_empty() {
                        album.cover.clone()
                    } else {
                        track.cover.clone()
                    },
                    lyrics: track.lyrics.clone(),
                })
        })
        .collect()
}
