mod yt_dlp;

use async_trait::async_trait;
pub use yt_dlp::YtDlpResolver;

use crate::dto::track::Track;

/// Turns a user query or URL into a playable track, or nothing when no
/// match exists. Implementations may be slow; the session resolves before
/// entering its command loop, so a pending resolution never blocks playback
/// control.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Option<Track>;
}
