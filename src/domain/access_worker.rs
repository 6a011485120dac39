//! Background worker applying access count increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Retries after the first failed attempt.
const MAX_RETRIES: usize = 3;

/// Consumes access events until every [`crate::domain::access_event::AccessTracker`] is dropped.
///
/// Events are applied one at a time in arrival order. The loop only ends once
/// the queue is closed and empty, so awaiting this future after dropping the
/// trackers flushes all pending counts.
pub async fn run_access_worker<R>(mut rx: mpsc::Receiver<AccessEvent>, repository: Arc<R>)
where
    R: UrlRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        record_access(repository.as_ref(), &event).await;
    }

    info!("Access worker stopped");
}

/// Applies one increment, retrying transient storage faults with backoff.
///
/// Returns true if the counter was incremented. A record deleted between the
/// redirect and the increment is not an error and is only logged at debug.
pub async fn record_access<R>(repository: &R, event: &AccessEvent) -> bool
where
    R: UrlRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || repository.increment_access_count(&event.code),
        |e: &AppError| {
            let transient = e.is_transient();
            if transient {
                warn!(code = %event.code, error = %e, "Access increment failed, retrying");
            }
            transient
        },
    )
    .await;

    match result {
        Ok(true) => true,
        Ok(false) => {
            debug!(code = %event.code, "Record gone before access was counted");
            false
        }
        Err(e) => {
            error!(code = %event.code, error = %e, "Dropping access increment");
            false
        }
    }
}
