mod controller;
mod dto;
mod event_loop;
mod queue;
mod settings;
mod two_way_channel;

pub mod resolver;
pub mod sink;

pub mod jukebox_session {
    use std::sync::Arc;

    use thiserror::Error;
    use tokio::sync::broadcast;
    use tracing::info;

    use crate::controller::Controller;
    use crate::dto::command::Command;
    pub use crate::dto::enqueue_outcome::EnqueueOutcome;
    pub use crate::dto::playback_status::PlaybackStatus;
    pub use crate::dto::queue_contents::QueueContents;
    pub use crate::dto::session_event::SessionEvent;
    use crate::dto::session_response::SessionResponse;
    pub use crate::dto::session_snapshot::SessionSnapshot;
    pub use crate::dto::track::{StreamRef, Track};
    use crate::event_loop::main_loop;
    use crate::resolver::TrackResolver;
    pub use crate::settings::Settings;
    use crate::sink::{AudioSink, CompletionSender};
    use crate::two_way_channel::{TwoWaySender, two_way_channel};

    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    pub enum SessionError {
        #[error("no track could be resolved for \"{0}\"")]
        ResolveFailed(String),
        #[error("unable to connect to the audio endpoint: {0}")]
        ConnectFailed(String),
        #[error("stream for \"{title}\" failed to start")]
        StreamStartFailed { title: String },
        #[error("volume must be between 0 and 100, got {0}")]
        InvalidVolume(u32),
        #[error("no track is currently active")]
        NothingActive,
        #[error("the session has ended")]
        SessionClosed,
    }

    /// Handle to one playback session: a single sink connection, its queue
    /// and the serialized loop driving both. All methods forward to that
    /// loop, so command handlers and the sink's completion signals can never
    /// mutate playback state concurrently.
    pub struct JukeboxSession {
        cmd_tx: TwoWaySender<Command, SessionResponse>,
        event_tx: broadcast::Sender<SessionEvent>,
        resolver: Arc<dyn TrackResolver>,
    }

    impl JukeboxSession {
        /// Connects to the audio endpoint and spawns the session loop.
        /// Connecting happens before anything is spawned, so a failure
        /// leaves no session behind.
        pub fn connect<S: AudioSink>(
            sink: &S,
            channel: S::Channel,
            resolver: Arc<dyn TrackResolver>,
            settings: Settings,
        ) -> Result<Self, SessionError> {
            let (signal_tx, signal_rx) = flume::unbounded();
            let connection = sink
                .connect(channel, CompletionSender::new(signal_tx))
                .map_err(|e| SessionError::ConnectFailed(e.to_string()))?;

            let (event_tx, _) = broadcast::channel(settings.event_buffer_size);
            let (cmd_tx, cmd_rx) = two_way_channel();
            let controller = Controller::new(connection, event_tx.clone(), settings);
            tokio::spawn(main_loop(cmd_rx, signal_rx, controller));

            Ok(Self {
                cmd_tx,
                event_tx,
                resolver,
            })
        }

        pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
            self.event_tx.subscribe()
        }

        /// Resolves `query` to a track and queues it, promoting it
        /// immediately when nothing is active. Resolution runs before the
        /// command is sent so a slow resolver never blocks the session loop.
        pub async fn enqueue(&self, query: &str) -> Result<EnqueueOutcome, SessionError> {
            let track = self
                .resolver
                .resolve(query)
                .await
                .ok_or_else(|| SessionError::ResolveFailed(query.to_owned()))?;

            match self.cmd_tx.get_response(Command::Enqueue(track)).await {
                Ok(SessionResponse::Enqueued(outcome)) => outcome,
                Ok(_) => unreachable!("enqueue should only receive an Enqueued response"),
                Err(_) => Err(SessionError::SessionClosed),
            }
        }

        pub async fn pause(&self) -> Result<(), SessionError> {
            self.ack(Command::Pause).await
        }

        pub async fn resume(&self) -> Result<(), SessionError> {
            self.ack(Command::Resume).await
        }

        pub async fn skip(&self) -> Result<(), SessionError> {
            self.ack(Command::Skip).await
        }

        pub async fn set_volume(&self, volume: u32) -> Result<(), SessionError> {
            self.ack(Command::SetVolume(volume)).await
        }

        pub async fn clear_queue(&self) -> Result<(), SessionError> {
            self.ack(Command::ClearQueue).await
        }

        pub async fn list_queue(&self, limit: usize) -> Result<QueueContents, SessionError> {
            match self.cmd_tx.get_response(Command::ListQueue(limit)).await {
                Ok(SessionResponse::Queue(contents)) => Ok(contents),
                Ok(_) => unreachable!("list_queue should only receive a Queue response"),
                Err(_) => Err(SessionError::SessionClosed),
            }
        }

        /// Reads a consistent view of the session. Control surfaces should
        /// re-render from this rather than caching their own copy.
        pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
            match self.cmd_tx.get_response(Command::GetSnapshot).await {
                Ok(SessionResponse::Snapshot(snapshot)) => Ok(snapshot),
                Ok(_) => unreachable!("snapshot should only receive a Snapshot response"),
                Err(_) => Err(SessionError::SessionClosed),
            }
        }

        /// Tears the session down: stops any active stream, releases the
        /// sink connection and clears the queue. Terminal for this handle.
        pub async fn leave(self) -> Result<(), SessionError> {
            info!("Leaving session");
            self.ack(Command::Leave).await
        }

        async fn ack(&self, command: Command) -> Result<(), SessionError> {
            match self.cmd_tx.get_response(command).await {
                Ok(SessionResponse::Ack(result)) => result,
                Ok(_) => unreachable!("command should only receive an Ack response"),
                Err(_) => Err(SessionError::SessionClosed),
            }
        }
    }
}
