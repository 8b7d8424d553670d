//! Shared helpers for the integration tests.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run `f` on a worker thread and return its result, failing the test if
/// it does not finish within three seconds.
pub fn within_timeout<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(3))
        .expect("call did not finish: the ledger lock was held while user code ran")
}
