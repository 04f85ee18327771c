//! Application model: `App`.
//!
//! `App` holds the catalog, the flattened archive, the list cursor and the
//! view flags, and drives the playback controller from them.

use tracing::debug;

use crate::audio::MediaBackend;
use crate::catalog::{Album, ArchiveItem, flatten};
use crate::player::time::format_mmss;
use crate::player::{PlaybackController, PlaybackState};

/// The main application model.
pub struct App {
    pub albums: Vec<Album>,
    pub items: Vec<ArchiveItem>,
    /// List cursor in the archive view.
    pub selected: usize,

    archive_visible: bool,
    modal_open: bool,
    active: Option<(usize, ArchiveItem)>,
    player: PlaybackController,
}

impl App {
    /// Build the store from the loaded catalog. The archive is flattened once.
    pub fn new(albums: Vec<Album>, backend: Box<dyn MediaBackend>) -> Self {
        let items = flatten(&albums);
        debug!(albums = albums.len(), items = items.len(), "archive flattened");
        Self {
            albums,
            items,
            selected: 0,
            archive_visible: false,
            modal_open: false,
            active: None,
            player: PlaybackController::new(backend),
        }
    }

    /// Show `item` in the player modal and bind a fresh session to its audio.
    pub fn open(&mut self, item: &ArchiveItem, index: usize) {
        self.active = Some((index, item.clone()));
        self.modal_open = true;
        self.player.open(&item.audio, item.nominal_duration());
    }

    /// Open the item under the list cursor.
    pub fn open_selected(&mut self) {
        if let Some(item) = self.items.get(self.selected).cloned() {
            self.open(&item, self.selected);
        }
    }

    /// Close the modal and release the session. The active item is kept so
    /// the list can still highlight it.
    pub fn close(&mut self) {
        self.modal_open = false;
        self.player.close();
    }

    pub fn enter_archive(&mut self) {
        self.archive_visible = true;
    }

    /// Back to the home screen: hides the archive and closes the modal.
    pub fn go_home(&mut self) {
        self.archive_visible = false;
        self.close();
    }

    pub fn toggle_play(&mut self) {
        self.player.toggle_play();
    }

    pub fn seek(&mut self, percent: f64) {
        self.player.seek(percent);
    }

    /// Seek relative to the current progress by `step` percent.
    pub fn seek_by(&mut self, step: f64) {
        self.player.seek(self.player.progress() + step);
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    /// Apply asynchronous playback results. Call once per frame.
    pub fn pump(&mut self) {
        self.player.pump();
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_archive_visible(&self) -> bool {
        self.archive_visible
    }

    pub fn active_item(&self) -> Option<&ArchiveItem> {
        self.active.as_ref().map(|(_, item)| item)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|(index, _)| *index)
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn is_starting(&self) -> bool {
        self.player.is_starting()
    }

    pub fn has_session(&self) -> bool {
        self.player.has_session()
    }

    /// Progress through the track, 0..=100.
    pub fn progress(&self) -> f64 {
        self.player.progress()
    }

    pub fn current_time_formatted(&self) -> String {
        format_mmss(self.player.elapsed())
    }

    /// Real duration once the element reports one, otherwise the active
    /// item's catalog duration. Still shown after the modal is closed.
    pub fn total_time_formatted(&self) -> String {
        let media = self.player.media_duration();
        let total = if media.is_zero() {
            self.active_item()
                .map(ArchiveItem::nominal_duration)
                .unwrap_or_default()
        } else {
            media
        };
        format_mmss(total)
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.player.state()
    }

    pub fn player(&self) -> &PlaybackController {
        &self.player
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        if self.has_items() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.has_items() {
            self.selected = match self.selected {
                0 => self.items.len() - 1,
                n => n - 1,
            };
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }
}
