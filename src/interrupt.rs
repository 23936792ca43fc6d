//! Ctrl-C handling: cancel the request in flight, or leave when idle.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::{futures::Notified, Notify};

#[derive(Debug, Default)]
pub struct Interrupt {
    in_flight: AtomicBool,
    notify: Notify,
}

impl Interrupt {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Resolves when [`Interrupt::trigger`] cancels the current request.
    /// Create it before marking the request in flight so no trigger is missed.
    pub fn cancelled(&self) -> Notified<'_> {
        self.notify.notified()
    }

    /// Marks a request as in flight until the guard drops.
    pub fn in_flight(&self) -> InFlight<'_> {
        self.in_flight.store(true, Ordering::SeqCst);
        InFlight(self)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Cancels the request in flight. Returns false when there was none.
    pub fn trigger(&self) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        self.notify.notify_waiters();
        true
    }
}

pub struct InFlight<'a>(&'a Interrupt);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Spawns the Ctrl-C listener. Outside a request, Ctrl-C exits with status 130.
pub fn listen_for_ctrl_c(interrupt: Arc<Interrupt>) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                return;
            }
            if interrupt.trigger() {
                tracing::debug!("cancelled request on Ctrl-C");
            } else {
                println!();
                std::process::exit(130);
            }
        }
    });
}
