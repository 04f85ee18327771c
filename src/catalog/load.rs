use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::CatalogError;

use super::model::Album;

/// Read and parse the catalog document at `path`.
pub fn load(path: &Path) -> Result<Vec<Album>, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let albums = parse(&text).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tracks: usize = albums.iter().map(|a| a.tracks.len()).sum();
    debug!(?path, albums = albums.len(), tracks, "catalog loaded");
    for album in &albums {
        if album.tracks.is_empty() {
            warn!(album = %album.id, "album has no tracks");
        }
    }

    Ok(albums)
}

/// Parse a catalog document (a JSON array of albums).
pub fn parse(text: &str) -> Result<Vec<Album>, serde_json::Error> {
    serde_json::from_str(text)
}
