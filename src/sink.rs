use thiserror::Error;

use crate::dto::track::StreamRef;

/// Error reported by the external audio sink.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

#[derive(Clone, Debug)]
pub(crate) enum SinkSignal {
    StreamEnded { error: Option<String> },
    Disconnected,
}

/// Handed to the sink at connect time. The sink must report exactly one
/// completion per stream that `start_stream` accepted, including streams
/// that were forcibly stopped. Signals sent after the session ends are
/// dropped silently.
#[derive(Clone, Debug)]
pub struct CompletionSender {
    signal_tx: flume::Sender<SinkSignal>,
}

impl CompletionSender {
    pub(crate) fn new(signal_tx: flume::Sender<SinkSignal>) -> Self {
        Self { signal_tx }
    }

    /// Reports that the active stream ended. `error` carries the failure
    /// reason when it died abnormally.
    pub fn stream_ended(&self, error: Option<String>) {
        self.signal_tx
            .send(SinkSignal::StreamEnded { error })
            .ok();
    }

    /// Reports that the connection dropped out from under the session. The
    /// session tears itself down in response.
    pub fn disconnected(&self) {
        self.signal_tx.send(SinkSignal::Disconnected).ok();
    }
}

/// External audio sink. Connecting yields an exclusive connection handle
/// owned by the playback controller for the life of the session.
pub trait AudioSink {
    type Channel;
    type Connection: SinkConnection;

    fn connect(
        &self,
        channel: Self::Channel,
        completions: CompletionSender,
    ) -> Result<Self::Connection, SinkError>;
}

/// One live sink connection. Every method is synchronous and bounded;
/// `start_stream` only initiates transmission, with the outcome reported
/// later through the `CompletionSender` from connect time.
pub trait SinkConnection: Send + 'static {
    fn start_stream(&mut self, stream_ref: &StreamRef) -> Result<(), SinkError>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn disconnect(&mut self);
}
