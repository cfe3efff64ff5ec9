//! Owned, cancellable periodic task.
//!
//! The refresh loop runs on its own thread and waits on a stop channel
//! between ticks, so stopping takes effect immediately instead of after the
//! next interval. Dropping the task stops it.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct RefreshTask {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Call `tick` every `interval` until stopped. The first tick happens
    /// after one interval; callers run the startup pass themselves.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    // Explicit stop, or the owner went away
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("refresh task stopped");
        });
        tracing::debug!(interval_ms = interval.as_millis() as u64, "refresh task started");
        Self {
            stop: Some(tx),
            handle: Some(handle),
        }
    }

    /// Stop the task and wait for an in-flight tick to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Block until the task ends (it only ends when stopped).
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}
