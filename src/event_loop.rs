use flume::Receiver;
use tracing::info;

use crate::controller::Controller;
use crate::dto::command::Command;
use crate::dto::session_response::SessionResponse;
use crate::sink::{SinkConnection, SinkSignal};
use crate::two_way_channel::TwoWayReceiver;

/// The single serialized entry point of the session. Foreground commands
/// and background sink signals are interleaved here one at a time; neither
/// side can observe the controller mid-transition.
pub(crate) async fn main_loop<C: SinkConnection>(
    mut cmd_rx: TwoWayReceiver<Command, SessionResponse>,
    signal_rx: Receiver<SinkSignal>,
    mut controller: Controller<C>,
) {
    loop {
        tokio::select! {
            command = cmd_rx.recv_async() => {
                let Ok(command) = command else {
                    info!("Session handle dropped, terminating loop");
                    controller.teardown();
                    return;
                };
                info!("Got command {command:?}");
                match command {
                    Command::Enqueue(track) => {
                        let outcome = controller.enqueue(track);
                        cmd_rx.respond(SessionResponse::Enqueued(outcome)).ok();
                    }
                    Command::Pause => {
                        let result = controller.pause();
                        cmd_rx.respond(SessionResponse::Ack(result)).ok();
                    }
                    Command::Resume => {
                        let result = controller.resume();
                        cmd_rx.respond(SessionResponse::Ack(result)).ok();
                    }
                    Command::Skip => {
                        let result = controller.skip();
                        cmd_rx.respond(SessionResponse::Ack(result)).ok();
                    }
                    Command::SetVolume(volume) => {
                        let result = controller.set_volume(volume);
                        cmd_rx.respond(SessionResponse::Ack(result)).ok();
                    }
                    Command::ClearQueue => {
                        controller.clear_queue();
                        cmd_rx.respond(SessionResponse::Ack(Ok(()))).ok();
                    }
                    Command::ListQueue(limit) => {
                        cmd_rx
                            .respond(SessionResponse::Queue(controller.list_queue(limit)))
                            .ok();
                    }
                    Command::GetSnapshot => {
                        cmd_rx
                            .respond(SessionResponse::Snapshot(controller.snapshot()))
                            .ok();
                    }
                    Command::Leave => {
                        controller.teardown();
                        cmd_rx.respond(SessionResponse::Ack(Ok(()))).ok();
                        info!("Session loop terminated");
                        return;
                    }
                }
            }
            signal = signal_rx.recv_async() => {
                match signal {
                    Ok(SinkSignal::StreamEnded { error }) => {
                        controller.on_stream_ended(error);
                    }
                    Ok(SinkSignal::Disconnected) => {
                        info!("Sink reported disconnect");
                        controller.teardown();
                        return;
                    }
                    Err(_) => {
                        info!("Sink signal channel closed, terminating loop");
                        controller.teardown();
                        return;
                    }
                }
            }
        }
    }
}
