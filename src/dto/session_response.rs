use super::enqueue_outcome::EnqueueOutcome;
use super::queue_contents::QueueContents;
use super::session_snapshot::SessionSnapshot;
use crate::jukebox_session::SessionError;

#[derive(Clone, Debug)]
pub(crate) enum SessionResponse {
    Enqueued(Result<EnqueueOutcome, SessionError>),
    Ack(Result<(), SessionError>),
    Queue(QueueContents),
    Snapshot(SessionSnapshot),
}
