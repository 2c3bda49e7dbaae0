use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::dto::enqueue_outcome::EnqueueOutcome;
use crate::dto::playback_status::PlaybackStatus;
use crate::dto::queue_contents::QueueContents;
use crate::dto::session_event::SessionEvent;
use crate::dto::session_snapshot::SessionSnapshot;
use crate::dto::track::Track;
use crate::jukebox_session::SessionError;
use crate::queue::QueueStore;
use crate::settings::Settings;
use crate::sink::SinkConnection;

/// The playback state machine. Owns the queue store and the sink
/// connection; only the session loop calls into it, so every transition is
/// serialized.
pub(crate) struct Controller<C: SinkConnection> {
    queue: QueueStore,
    status: PlaybackStatus,
    connection: Option<C>,
    volume: u32,
    ignore_completions: usize,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl<C: SinkConnection> Controller<C> {
    pub(crate) fn new(
        connection: C,
        event_tx: broadcast::Sender<SessionEvent>,
        settings: Settings,
    ) -> Self {
        Self {
            queue: QueueStore::new(),
            status: PlaybackStatus::Idle,
            connection: Some(connection),
            volume: settings.initial_volume.min(100),
            ignore_completions: 0,
            event_tx,
        }
    }

    pub(crate) fn enqueue(&mut self, track: Track) -> Result<EnqueueOutcome, SessionError> {
        let title = track.title.clone();
        self.queue.enqueue(track.clone());

        if self.status != PlaybackStatus::Idle {
            let position = self.queue.len();
            info!("Queued \"{title}\" at position {position}");
            self.emit(SessionEvent::Queued(self.snapshot()));
            return Ok(EnqueueOutcome::Queued { track, position });
        }

        // Idle implies nothing pending, so advance promotes the track we
        // just queued.
        self.advance();
        match self.queue.current() {
            Some(current) => Ok(EnqueueOutcome::NowPlaying {
                track: current.clone(),
            }),
            None => Err(SessionError::StreamStartFailed { title }),
        }
    }

    /// Completion signal from the sink, natural or failure. Skip and stop
    /// route through the same `advance` below, so this is the only other
    /// place a stream transition can originate.
    pub(crate) fn on_stream_ended(&mut self, error: Option<String>) {
        if self.ignore_completions > 0 {
            // Completion of a stream we already advanced past.
            self.ignore_completions -= 1;
            info!("Ignoring completion of a forcibly stopped stream");
            return;
        }
        if self.status == PlaybackStatus::Idle {
            // Stray signal after teardown or clear.
            return;
        }

        match error {
            Some(reason) => {
                let title = self
                    .queue
                    .current()
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                warn!("Stream for \"{title}\" ended with failure: {reason}");
                self.emit(SessionEvent::TrackFailed { title, reason });
            }
            None => {
                info!("Stream ended");
                self.emit(SessionEvent::TrackEnded(self.snapshot()));
            }
        }
        self.advance();
    }

    pub(crate) fn skip(&mut self) -> Result<(), SessionError> {
        if self.status == PlaybackStatus::Idle {
            return Err(SessionError::NothingActive);
        }
        self.stop_active_stream();
        self.emit(SessionEvent::Skipped(self.snapshot()));
        self.advance();
        Ok(())
    }

    pub(crate) fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != PlaybackStatus::Playing {
            return Err(SessionError::NothingActive);
        }
        if let Some(connection) = self.connection.as_mut() {
            connection.pause();
        }
        self.status = PlaybackStatus::Paused;
        self.emit(SessionEvent::Pause(self.snapshot()));
        Ok(())
    }

    pub(crate) fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != PlaybackStatus::Paused {
            return Err(SessionError::NothingActive);
        }
        if let Some(connection) = self.connection.as_mut() {
            connection.resume();
        }
        self.status = PlaybackStatus::Playing;
        self.emit(SessionEvent::Resume(self.snapshot()));
        Ok(())
    }

    pub(crate) fn set_volume(&mut self, volume: u32) -> Result<(), SessionError> {
        if volume > 100 {
            return Err(SessionError::InvalidVolume(volume));
        }
        if self.status == PlaybackStatus::Idle {
            return Err(SessionError::NothingActive);
        }
        if let Some(connection) = self.connection.as_mut() {
            connection.set_volume(volume as f32 / 100.0);
        }
        self.volume = volume;
        self.emit(SessionEvent::VolumeChanged(self.snapshot()));
        Ok(())
    }

    pub(crate) fn clear_queue(&mut self) {
        if self.status != PlaybackStatus::Idle {
            self.stop_active_stream();
        }
        self.queue.clear();
        self.status = PlaybackStatus::Idle;
        self.emit(SessionEvent::QueueCleared(self.snapshot()));
    }

    pub(crate) fn list_queue(&self, limit: usize) -> QueueContents {
        let pending: Vec<Track> = self.queue.peek(limit).cloned().collect();
        QueueContents {
            current: self.queue.current().cloned(),
            remaining: self.queue.len().saturating_sub(pending.len()),
            pending,
        }
    }

    pub(crate) fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            volume: self.volume as f32 / 100.0,
            current: self.queue.current().cloned(),
            pending: self.queue.pending_tracks(),
        }
    }

    pub(crate) fn teardown(&mut self) {
        info!("Tearing down session");
        if self.status != PlaybackStatus::Idle {
            self.stop_active_stream();
        }
        if let Some(mut connection) = self.connection.take() {
            connection.disconnect();
        }
        self.queue.clear();
        self.status = PlaybackStatus::Idle;
        self.emit(SessionEvent::Disconnected);
    }

    /// Pops tracks until one starts or the queue runs out. Both natural
    /// completion and skip land here, which is what keeps advancement
    /// exactly-once per ended stream.
    fn advance(&mut self) {
        loop {
            let Some(track) = self.queue.pop_next() else {
                self.queue.clear_current();
                self.status = PlaybackStatus::Idle;
                info!("Queue exhausted, settling to idle");
                self.emit(SessionEvent::QueueEnded(self.snapshot()));
                return;
            };
            let Some(connection) = self.connection.as_mut() else {
                warn!("Advance requested without a sink connection");
                self.queue.clear_current();
                self.status = PlaybackStatus::Idle;
                return;
            };
            match connection.start_stream(&track.stream_ref) {
                Ok(()) => {
                    info!("Started stream for \"{}\"", track.title);
                    self.queue.set_current(track);
                    self.status = PlaybackStatus::Playing;
                    self.emit(SessionEvent::TrackStarted(self.snapshot()));
                    return;
                }
                Err(e) => {
                    // Dead entry; keep the queue moving.
                    warn!("Stream for \"{}\" failed to start: {e}", track.title);
                    self.emit(SessionEvent::TrackFailed {
                        title: track.title,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    /// Forces the sink to end the active stream. Its completion signal will
    /// still arrive and must not trigger a second advance.
    fn stop_active_stream(&mut self) {
        if let Some(connection) = self.connection.as_mut() {
            connection.stop();
        }
        self.ignore_completions += 1;
        self.queue.clear_current();
        self.status = PlaybackStatus::Idle;
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        self.event_tx.send(event).ok();
    }
}
