use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tonic::Code;

use crate::Error;
use crate::ResponseObserver;
use crate::StreamController;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ObserverEvent<T> {
    Start,
    Response(T),
    Error(Code),
    Complete,
}

impl<T> ObserverEvent<T> {
    fn is_terminal(&self) -> bool {
        matches!(self, ObserverEvent::Error(_) | ObserverEvent::Complete)
    }
}

/// Forwards every callback to a channel; optionally cancels the stream after
/// `cancel_after` responses (zero cancels from `on_start`).
pub(crate) struct RecordingObserver<T> {
    tx: mpsc::UnboundedSender<ObserverEvent<T>>,
    cancel_after: Option<usize>,
    responses: AtomicUsize,
    controller: Mutex<Option<StreamController>>,
}

impl<T: Send + Sync + 'static> RecordingObserver<T> {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ObserverEvent<T>>) {
        Self::build(None)
    }

    pub(crate) fn cancelling_after(
        responses: usize
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<ObserverEvent<T>>) {
        Self::build(Some(responses))
    }

    fn build(cancel_after: Option<usize>) -> (Arc<Self>, mpsc::UnboundedReceiver<ObserverEvent<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let observer = Arc::new(Self {
            tx,
            cancel_after,
            responses: AtomicUsize::new(0),
            controller: Mutex::new(None),
        });
        (observer, rx)
    }
}

impl<T: Send + Sync + 'static> ResponseObserver<T> for RecordingObserver<T> {
    fn on_start(
        &self,
        controller: StreamController,
    ) {
        let _ = self.tx.send(ObserverEvent::Start);
        if self.cancel_after == Some(0) {
            controller.cancel();
        }
        *self.controller.lock().unwrap() = Some(controller);
    }

    fn on_response(
        &self,
        response: T,
    ) {
        let _ = self.tx.send(ObserverEvent::Response(response));
        let seen = self.responses.fetch_add(1, Ordering::SeqCst) + 1;
        if self.cancel_after == Some(seen) {
            if let Some(controller) = self.controller.lock().unwrap().as_ref() {
                controller.cancel();
            }
        }
    }

    fn on_error(
        &self,
        error: Error,
    ) {
        let _ = self.tx.send(ObserverEvent::Error(error.code()));
    }

    fn on_complete(&self) {
        let _ = self.tx.send(ObserverEvent::Complete);
    }
}

/// Receive events up to and including the terminal one, then check nothing
/// else arrives shortly after.
pub(crate) async fn collect_events<T>(rx: &mut mpsc::UnboundedReceiver<ObserverEvent<T>>) -> Vec<ObserverEvent<T>> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        let terminal = event.is_terminal();
        events.push(event);
        if terminal {
            break;
        }
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(rx.try_recv().is_err(), "event delivered after terminal callback");
    events
}
