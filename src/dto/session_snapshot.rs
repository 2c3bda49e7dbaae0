use super::playback_status::PlaybackStatus;
use super::track::Track;

/// Consistent read model of the session, taken inside the session loop.
/// `current` is present exactly when `status` is `Playing` or `Paused`.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub status: PlaybackStatus,
    pub volume: f32,
    pub current: Option<Track>,
    pub pending: Vec<Track>,
}
