// Signal handling module
//
// Ctrl+C (SIGINT on Unix, console Ctrl+C on Windows) requests a graceful
// shutdown. No other signal is handled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Shutdown request shared between the signal task and the accept loop
///
/// The first trigger asks for a graceful stop. A second trigger forces the
/// stop even while connections are still open.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    notify: Notify,
    force_notify: Notify,
    requested: AtomicBool,
    forced: AtomicBool,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown, or force it if already requested.
    /// Safe to call before anyone is waiting.
    pub fn trigger(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            self.forced.store(true, Ordering::SeqCst);
            // notify_one stores a permit when nobody is waiting yet
            self.force_notify.notify_one();
        } else {
            self.notify.notify_one();
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn is_forced(&self) -> bool {
        self.forced.load(Ordering::SeqCst)
    }

    /// Resolve once shutdown has been requested
    pub async fn wait(&self) {
        if self.is_requested() {
            return;
        }
        self.notify.notified().await;
    }

    /// Resolve once shutdown has been forced
    pub async fn wait_forced(&self) {
        if self.is_forced() {
            return;
        }
        self.force_notify.notified().await;
    }
}

/// Spawn a task that waits for Ctrl+C, prints the shutdown notice and
/// triggers `shutdown`. A second Ctrl+C forces the stop.
pub fn start_signal_handler(shutdown: Arc<ShutdownSignal>) {
    tokio::spawn(async move {
        for press in 0..2 {
            if let Err(e) = tokio::signal::ctrl_c().await {
                logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
                return;
            }
            if press == 0 {
                logger::log_shutdown_started();
            } else {
                logger::log_forced_shutdown();
            }
            shutdown.trigger();
        }
    });
}
