//! Runs data fetches off the UI thread.
//!
//! Each fetch gets its own worker thread and hands its result back through a
//! channel. The UI polls with `Pending::try_take` once per frame; `notify` is
//! called once the worker is done, result sent or not, so the UI can schedule
//! that frame.

use crate::error::{AppError, Result};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// A fetch that may still be in flight
pub struct Pending<T> {
    label: &'static str,
    rx: Receiver<Result<T>>,
}

impl<T> Pending<T> {
    /// `None` while the fetch is running, the result once it is done.
    pub fn try_take(&self) -> Option<Result<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("Fetch '{}' ended without a result", self.label);
                Some(Err(AppError::Disconnected))
            }
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// Calls the notifier when dropped, so a panicking fetch still wakes the UI
struct WakeOnDrop(Notify);

impl Drop for WakeOnDrop {
    fn drop(&mut self) {
        (self.0)();
    }
}

pub fn spawn<T, F>(label: &'static str, notify: Notify, fetch: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // Declared before `tx` so the sender is dropped first, even on unwind
        let _wake = WakeOnDrop(notify);
        let tx = tx;

        debug!("Fetch '{}' started", label);
        let result = fetch();
        if let Err(e) = &result {
            warn!("Fetch '{}' failed: {}", label, e);
        }
        // Receiver is gone when the view was closed before the fetch finished
        let _ = tx.send(result);
    });

    Pending { label, rx }
}

/// Takes a finished result out of `slot`, leaving `None` behind.
pub fn take_finished<T>(slot: &mut Option<Pending<T>>) -> Option<Result<T>> {
    let result = slot.as_ref()?.try_take()?;
    *slot = None;
    Some(result)
}

/// Notifier that does nothing, for callers that poll on their own.
pub fn no_notify() -> Notify {
    Arc::new(|| {})
}
