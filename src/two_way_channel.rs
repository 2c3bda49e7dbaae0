use flume::{Receiver, RecvError, Sender};
use thiserror::Error;
use tokio::sync::oneshot::{Sender as OneShotSender, channel as oneshot_channel};

pub(crate) fn two_way_channel<TIn, TOut>() -> (TwoWaySender<TIn, TOut>, TwoWayReceiver<TIn, TOut>) {
    let (main_tx, main_rx) = flume::unbounded();
    (
        TwoWaySender { main_tx },
        TwoWayReceiver {
            main_rx,
            oneshot: None,
        },
    )
}

#[derive(Clone, Debug, Error)]
pub(crate) enum ResponseError {
    #[error("request channel closed")]
    SendFailed,
    #[error("response channel closed before a response was sent")]
    NoResponse,
}

type Request<TIn, TOut> = (TIn, OneShotSender<TOut>);

#[derive(Clone, Debug)]
pub(crate) struct TwoWaySender<TIn, TOut> {
    main_tx: Sender<Request<TIn, TOut>>,
}

impl<TIn, TOut> TwoWaySender<TIn, TOut> {
    pub(crate) async fn get_response(&self, message: TIn) -> Result<TOut, ResponseError> {
        let (oneshot_tx, oneshot_rx) = oneshot_channel();
        self.main_tx
            .send_async((message, oneshot_tx))
            .await
            .map_err(|_| ResponseError::SendFailed)?;
        oneshot_rx.await.map_err(|_| ResponseError::NoResponse)
    }
}

#[derive(Debug)]
pub(crate) struct TwoWayReceiver<TIn, TOut> {
    main_rx: Receiver<Request<TIn, TOut>>,
    oneshot: Option<OneShotSender<TOut>>,
}

impl<TIn, TOut> TwoWayReceiver<TIn, TOut> {
    pub(crate) async fn recv_async(&mut self) -> Result<TIn, RecvError> {
        let (message, oneshot) = self.main_rx.recv_async().await?;
        self.oneshot = Some(oneshot);
        Ok(message)
    }

    pub(crate) fn respond(&mut self, response: TOut) -> Result<(), TOut> {
        match self.oneshot.take() {
            Some(oneshot) => oneshot.send(response),
            None => Ok(()),
        }
    }
}
