use super::track::Track;

/// What happened to an enqueued track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Nothing was active, so the track was promoted and its stream started.
    NowPlaying { track: Track },
    /// The track joined the pending queue at `position` (1-based).
    Queued { track: Track, position: usize },
}
