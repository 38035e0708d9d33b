//! When to run the next organizer cycle
//!
//! The organizer runs one cycle to completion and then asks its trigger
//! whether to go again. Production uses `IntervalTrigger` (poll interval or
//! shutdown signal); tests use `CountedTrigger`.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

pub trait Trigger {
    /// Block until the next cycle is due. `false` means stop.
    fn wait_next(&mut self) -> bool;
}

/// Fires every `interval` until a shutdown message arrives or every
/// `ShutdownHandle` has been dropped.
pub struct IntervalTrigger {
    interval: Duration,
    shutdown: Receiver<()>,
}

/// Cloneable sender half used by signal handlers
#[derive(Clone)]
pub struct ShutdownHandle(Sender<()>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.0.send(());
    }
}

impl IntervalTrigger {
    pub fn new(interval: Duration) -> (Self, ShutdownHandle) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                interval,
                shutdown: rx,
            },
            ShutdownHandle(tx),
        )
    }
}

impl Trigger for IntervalTrigger {
    fn wait_next(&mut self) -> bool {
        match self.shutdown.recv_timeout(self.interval) {
            Err(RecvTimeoutError::Timeout) => true,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

/// Allows a fixed number of additional cycles, then stops
#[derive(Debug, Clone)]
pub struct CountedTrigger {
    remaining: usize,
}

impl CountedTrigger {
    pub fn new(extra_cycles: usize) -> Self {
        Self {
            remaining: extra_cycles,
        }
    }

    /// Run exactly one cycle
    pub fn once() -> Self {
        Self::new(0)
    }
}

impl Trigger for CountedTrigger {
    fn wait_next(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
