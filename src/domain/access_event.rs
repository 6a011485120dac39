//! Access event model and the sender used to enqueue it.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, warn};

/// A successful resolution waiting to be counted.
///
/// Passed from the redirect path to the background worker through a bounded
/// channel, so the redirect response never waits on the counter update.
///
/// # Usage Flow
///
/// 1. Created by [`AccessTracker::track`] after a code resolves
/// 2. Sent to the channel without awaiting
/// 3. Processed by [`crate::domain::access_worker::run_access_worker`]
/// 4. Applied as an atomic increment on the record store
#[derive(Debug, Clone, PartialEq)]
pub struct AccessEvent {
    pub code: String,
}

impl AccessEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Sending half of the access event queue.
///
/// Cheap to clone; every clone feeds the same worker. The queue closes once
/// all trackers are dropped, which lets the worker drain and exit.
#[derive(Debug, Clone)]
pub struct AccessTracker {
    sender: mpsc::Sender<AccessEvent>,
}

impl AccessTracker {
    /// Creates a tracker and the receiver the worker consumes.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<AccessEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Enqueues an access for `code` without blocking the caller.
    ///
    /// The queue stays bounded: when it is full the event is dropped and a
    /// warning is logged. Returns `false` if the event was not queued.
    pub fn track(&self, code: &str) -> bool {
        match self.sender.try_send(AccessEvent::new(code)) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "Access queue full, increment dropped");
                false
            }
            Err(TrySendError::Closed(event)) => {
                error!(code = %event.code, "Access queue closed, increment lost");
                false
            }
        }
    }

    /// Returns true if the worker side of the queue has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Currently free slots in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Total slots in the queue.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}
