use std::collections::VecDeque;

use crate::dto::track::Track;

/// Ordered store of pending tracks plus the track currently streaming.
/// Owned exclusively by the controller inside the session loop; that single
/// ownership is what makes pop-and-promote atomic with respect to
/// concurrent command and completion sources.
#[derive(Debug, Default)]
pub(crate) struct QueueStore {
    pending: VecDeque<Track>,
    current: Option<Track>,
}

impl QueueStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enqueue(&mut self, track: Track) {
        self.pending.push_back(track);
    }

    pub(crate) fn pop_next(&mut self) -> Option<Track> {
        self.pending.pop_front()
    }

    /// Empties pending tracks and unsets the current one. Used on explicit
    /// queue-clear and on session teardown.
    pub(crate) fn clear(&mut self) {
        self.pending.clear();
        self.current = None;
    }

    /// Read-only view of the first `limit` pending tracks.
    pub(crate) fn peek(&self, limit: usize) -> impl Iterator<Item = &Track> {
        self.pending.iter().take(limit)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub(crate) fn set_current(&mut self, track: Track) {
        self.current = Some(track);
    }

    pub(crate) fn clear_current(&mut self) {
        self.current = None;
    }

    pub(crate) fn pending_tracks(&self) -> Vec<Track> {
        self.pending.iter().cloned().collect()
    }
}
