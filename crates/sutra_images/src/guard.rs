//! Deadline and cancellation guard for backend calls.

use std::future::Future;
use std::time::Duration;
use sutra_error::{ImageError, ImageErrorKind, Operation, SutraResult};
use tokio_util::sync::CancellationToken;

/// Run `call` unless `cancel` fires first or `deadline` elapses.
///
/// Cancellation is checked before the call is polled, so an already
/// cancelled token never starts the call.
pub(crate) async fn guarded<T, F>(
    operation: Operation,
    deadline: Duration,
    cancel: &CancellationToken,
    call: F,
) -> SutraResult<T>
where
    F: Future<Output = SutraResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            Err(ImageError::new(ImageErrorKind::Cancelled(operation)).into())
        }
        outcome = tokio::time::timeout(deadline, call) => match outcome {
            Ok(result) => result,
            Err(_) => Err(ImageError::new(ImageErrorKind::TimedOut {
                operation,
                after_ms: deadline.as_millis() as u64,
            })
            .into()),
        },
    }
}
