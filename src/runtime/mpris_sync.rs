use crate::app::App;
use crate::mpris::MprisHandle;

/// Publish the active item and playback state. The item is only reported
/// while its modal is open.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let active = if app.is_modal_open() {
        app.active_index().zip(app.active_item())
    } else {
        None
    };

    match active {
        Some((index, item)) => mpris.set_track_metadata(Some(index), Some(item)),
        None => mpris.set_track_metadata(None, None),
    }
    mpris.set_playback(app.playback_state());
}
