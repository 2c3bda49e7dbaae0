use super::track::Track;

/// Display view of the queue, limited to the number of pending tracks the
/// caller asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueContents {
    pub current: Option<Track>,
    pub pending: Vec<Track>,
    /// Pending tracks beyond the requested limit.
    pub remaining: usize,
}
