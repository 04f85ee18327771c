use super::*;
use crate::error::CatalogError;
use std::time::Duration;

fn track(id: &str, cover: &str) -> Track {
    Track {
        id: id.into(),
        title: format!("Title {id}"),
        duration: 180.0,
        audio: format!("/audio/{id}.mp3"),
        cover: cover.into(),
        lyrics: String::new(),
    }
}

fn album(id: &str, cover: &str, tracks: Vec<Track>) -> Album {
    Album {
        id: id.into(),
        title: format!("Album {id}"),
        year: 2001,
        description: String::new(),
        cover: cover.into(),
        tracks,
    }
}

#[test]
fn flatten_yields_one_item_per_track_in_catalog_order() {
    let albums = vec![
        album("a", "a.jpg", vec![track("a1", ""), track("a2", ""), track("a3", "")]),
        album("b", "b.jpg", vec![]),
        album("c", "c.jpg", vec![track("c1", ""), track("c2", "")]),
    ];

    let items = flatten(&albums);
    let expected: usize = albums.iter().map(|a| a.tracks.len()).sum();
    assert_eq!(items.len(), expected);

    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "c1", "c2"]);
}

#[test]
fn flatten_index_restarts_per_album() {
    let albums = vec![
        album("a", "", vec![track("a1", ""), track("a2", "")]),
        album("b", "", vec![track("b1", ""), track("b2", ""), track("b3", "")]),
    ];

    let indices: Vec<usize> = flatten(&albums).iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![1, 2, 1, 2, 3]);
}

#[test]
fn flatten_denormalizes_album_fields() {
    let albums = vec![album("x", "x.jpg", vec![track("x1", "")])];
    let item = &flatten(&albums)[0];
    assert_eq!(item.album_id, "x");
    assert_eq!(item.album_title, "Album x");
    assert_eq!(item.album_year, 2001);
    assert_eq!(item.title, "Title x1");
    assert_eq!(item.audio, "/audio/x1.mp3");
}

#[test]
fn cover_falls_back_to_album_cover_only_when_track_cover_is_empty() {
    let albums = vec![album(
        "a",
        "album.jpg",
        vec![track("own", "track.jpg"), track("inherit", "")],
    )];
    let items = flatten(&albums);
    assert_eq!(items[0].cover, "track.jpg");
    assert_eq!(items[1].cover, "album.jpg");
}

#[test]
fn missing_covers_everywhere_yield_empty_cover() {
    let albums = vec![album("a", "", vec![track("t", "")])];
    assert_eq!(flatten(&albums)[0].cover, "");
}

#[test]
fn flatten_of_empty_catalog_is_empty() {
    assert!(flatten(&[]).is_empty());
}

#[test]
fn nominal_duration_clamps_bad_values() {
    let albums = vec![album("a", "", vec![track("t", "")])];
    let mut item = flatten(&albums).remove(0);
    assert_eq!(item.nominal_duration(), Duration::from_secs(180));

    item.duration = -4.0;
    assert_eq!(item.nominal_duration(), Duration::ZERO);

    item.duration = f64::NAN;
    assert_eq!(item.nominal_duration(), Duration::ZERO);
}

#[test]
fn parse_accepts_minimal_tracks_with_defaults() {
    let albums = parse(
        r#"[
            {
                "id": "zd-1",
                "title": "First",
                "year": 2019,
                "cover": "/covers/first.jpg",
                "tracks": [
                    { "id": "t1", "title": "Opening", "duration": 201, "audio": "/audio/t1.mp3" },
                    { "id": "t2", "title": "Silence" }
                ]
            }
        ]"#,
    )
    .unwrap();

    assert_eq!(albums.len(), 1);
    let tracks = &albums[0].tracks;
    assert_eq!(tracks[0].duration, 201.0);
    assert_eq!(tracks[1].audio, "");
    assert_eq!(tracks[1].cover, "");
    assert_eq!(albums[0].description, "");
}

#[test]
fn load_reports_path_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    match load(&path) {
        Err(CatalogError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load(&path), Err(CatalogError::Parse { .. })));
}

#[test]
fn load_reads_catalog_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.json");
    std::fs::write(
        &path,
        r#"[{ "id": "a", "title": "A", "year": 2020, "tracks": [{ "id": "t", "title": "T" }] }]"#,
    )
    .unwrap();

    let albums = load(&path).unwrap();
    assert_eq!(albums[0].tracks[0].id, "t");
}
