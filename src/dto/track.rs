use std::fmt;
use std::time::Duration;

/// Opaque reference to a resolved, playable media stream. Only the sink
/// knows how to interpret it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamRef(String);

impl StreamRef {
    pub fn new(stream_ref: impl Into<String>) -> Self {
        Self(stream_ref.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One unit of playback, produced by a resolver and owned by the queue once
/// enqueued. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub stream_ref: StreamRef,
    pub title: String,
    pub duration: Duration,
}
