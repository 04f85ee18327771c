//! Utilities for loading an audio file into a `rodio` sink.
//!
//! Seeking rebuilds the queued source and skips into the file, so every load
//! takes the position to start at.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum SourceError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Replace whatever `sink` holds with `path` starting at `start_at`.
///
/// Leaves the sink paused and returns the total duration when the decoder
/// reports one.
pub(super) fn load_into(
    sink: &Sink,
    path: &Path,
    start_at: Duration,
) -> Result<Option<Duration>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();

    sink.clear();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok(total)
}

/// Resolve a catalog audio reference against the media root.
///
/// References are web-root style (`/audio/x.mp3`), so a leading slash means
/// "relative to the media root". Absolute paths that exist on disk are used
/// as they are.
pub fn resolve_source(media_root: &Path, source: &str) -> PathBuf {
    let as_path = Path::new(source);
    if as_path.is_absolute() && as_path.exists() {
        return as_path.to_path_buf();
    }
    media_root.join(source.trim_start_matches('/'))
}
