use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use tracing::debug;

/// Read the total duration from the file's container metadata.
pub(super) fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let duration = tagged.properties().duration();
            (!duration.is_zero()).then_some(duration)
        }
        Err(e) => {
            debug!(?path, error = %e, "metadata probe failed");
            None
        }
    }
}
