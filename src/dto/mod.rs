pub(crate) mod command;
pub(crate) mod enqueue_outcome;
pub(crate) mod playback_status;
pub(crate) mod queue_contents;
pub(crate) mod session_event;
pub(crate) mod session_response;
pub(crate) mod session_snapshot;
pub(crate) mod track;
