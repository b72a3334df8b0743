// This is free and unencumbered software released into the public domain.

use crate::platform::CameraEvent;
use scopeguard::defer;
use std::{
    sync::mpsc::{Sender, channel},
    thread::JoinHandle,
};
use tracing::{trace, warn};

enum Task {
    Event(CameraEvent),
    Quit,
}

/// Handle the platform uses to deliver camera callbacks onto the adapter's
/// background queue. Posting after the queue has shut down is harmless.
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: Sender<Task>,
}

impl EventSink {
    pub fn post(&self, event: CameraEvent) {
        if self.tx.send(Task::Event(event)).is_err() {
            trace!("camera event posted after background thread quit; dropped");
        }
    }
}

/// Background execution context hosting all camera callbacks.
///
/// One worker thread with a serial message queue, created at camera-start
/// time and torn down at camera-close time. `quit` drains the queue and
/// joins the thread, so once it returns no callback is in flight.
pub(crate) struct CallbackThread {
    tx: Sender<Task>,
    join: Option<JoinHandle<()>>,
}

impl CallbackThread {
    pub(crate) fn spawn<F>(mut handler: F) -> Self
    where
        F: FnMut(&EventSink, CameraEvent) + Send + 'static,
    {
        let (tx, rx) = channel::<Task>();
        let sink = EventSink { tx: tx.clone() };

        let join = std::thread::Builder::new()
            .name("camera-background".into())
            .spawn(move || {
                defer! {
                    trace!("camera background thread exiting");
                }
                while let Ok(task) = rx.recv() {
                    match task {
                        Task::Event(event) => handler(&sink, event),
                        Task::Quit => break,
                    }
                }
            });

        let join = match join {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "failed to spawn camera background thread");
                None
            },
        };

        Self { tx, join }
    }

    pub(crate) fn sink(&self) -> EventSink {
        EventSink {
            tx: self.tx.clone(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Drains already-queued tasks, then blocks until the worker exits.
    pub(crate) fn quit(mut self) {
        let _ = self.tx.send(Task::Quit);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
