use strum::Display;

use super::session_snapshot::SessionSnapshot;

/// Broadcast whenever the session transitions. Each event carries a fresh
/// snapshot so control surfaces can re-render without tracking state
/// themselves.
#[derive(Clone, Debug, Display)]
pub enum SessionEvent {
    TrackStarted(SessionSnapshot),
    Queued(SessionSnapshot),
    TrackEnded(SessionSnapshot),
    TrackFailed { title: String, reason: String },
    Pause(SessionSnapshot),
    Resume(SessionSnapshot),
    Skipped(SessionSnapshot),
    VolumeChanged(SessionSnapshot),
    QueueCleared(SessionSnapshot),
    QueueEnded(SessionSnapshot),
    Disconnected,
}
