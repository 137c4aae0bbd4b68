//! Callback-to-future bridge
//!
//! Native geocoders report completion by invoking a callback once. A
//! [`Completion`] is that callback; the matching [`Pending`] is what the
//! caller awaits.
//!
//! Contract:
//! - The first `complete`/`succeed`/`fail` call delivers; later calls return
//!   `false` and are ignored.
//! - Dropping every clone of a `Completion` without delivering resolves the
//!   awaiter with [`GeocodeFailure::Abandoned`].
//! - If the awaiter is gone (cancelled or timed out) a late delivery returns
//!   `false` and is discarded.

use crate::geocoder::{GeocodeFailure, NativeError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

type Delivery<T> = Result<T, NativeError>;

/// Create a linked completion/awaiter pair
pub fn channel<T>() -> (Completion<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Completion {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        Pending { rx },
    )
}

/// Start a callback-style native call and await its single completion
///
/// `start` receives the completion handle; returning `Err` models a native
/// call that throws before it ever schedules the callback.
pub async fn call_native<T, F>(timeout: Option<Duration>, start: F) -> Result<T, GeocodeFailure>
where
    F: FnOnce(Completion<T>) -> Result<(), NativeError>,
{
    let (completion, pending) = channel();
    start(completion).map_err(GeocodeFailure::Native)?;
    pending.wait(timeout).await
}

/// The single-shot callback handed to a native service
pub struct Completion<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<Delivery<T>>>>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("delivered", &self.lock().is_none())
            .finish()
    }
}

impl<T> Completion<T> {
    // A panic while holding the lock cannot leave the slot half-written.
    fn lock(&self) -> MutexGuard<'_, Option<oneshot::Sender<Delivery<T>>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Deliver a result; returns `true` if an awaiter received it
    pub fn complete(&self, result: Result<T, NativeError>) -> bool {
        let Some(sender) = self.lock().take() else {
            debug!("Ignoring repeated native completion");
            return false;
        };

        if sender.send(result).is_err() {
            debug!("Native completion arrived after the caller went away");
            return false;
        }
        true
    }

    /// Deliver a success payload
    pub fn succeed(&self, value: T) -> bool {
        self.complete(Ok(value))
    }

    /// Deliver a native error
    pub fn fail(&self, error: NativeError) -> bool {
        self.complete(Err(error))
    }

    /// Whether delivering now would be pointless
    ///
    /// True once a result was delivered or the awaiter was dropped. Natives
    /// may poll this to stop work early.
    pub fn is_cancelled(&self) -> bool {
        match self.lock().as_ref() {
            Some(sender) => sender.is_closed(),
            None => true,
        }
    }
}

/// The awaiting half of a [`Completion`]
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Delivery<T>>,
}

impl<T> Pending<T> {
    /// Wait for the native completion, optionally bounded by `timeout`
    pub async fn wait(self, timeout: Option<Duration>) -> Result<T, GeocodeFailure> {
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.rx)
                .await
                .map_err(|_| GeocodeFailure::TimedOut(limit))?,
            None => self.rx.await,
        };

        match received {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(GeocodeFailure::Native(error)),
            Err(_) => Err(GeocodeFailure::Abandoned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_is_delivered() {
        let (completion, pending) = channel::<Vec<u32>>();
        assert!(completion.succeed(vec![1, 2, 3]));
        assert_eq!(pending.wait(None).await, Ok(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_error_is_delivered() {
        let (completion, pending) = channel::<()>();
        assert!(completion.fail(NativeError::new("network unavailable")));
        assert_eq!(
            pending.wait(None).await,
            Err(GeocodeFailure::Native(NativeError::new("network unavailable")))
        );
    }

    #[tokio::test]
    async fn test_only_first_delivery_wins() {
        let (completion, pending) = channel::<&str>();
        let second = completion.clone();

        assert!(completion.succeed("first"));
        assert!(!second.succeed("second"));
        assert!(!second.fail(NativeError::new("late error")));
        assert!(completion.is_cancelled());

        assert_eq!(pending.wait(None).await, Ok("first"));
    }

    #[tokio::test]
    async fn test_dropped_completion_is_abandoned() {
        let (completion, pending) = channel::<()>();
        drop(completion);
        assert_eq!(pending.wait(None).await, Err(GeocodeFailure::Abandoned));
    }

    #[tokio::test]
    async fn test_timeout_when_never_completed() {
        let (completion, pending) = channel::<()>();
        let limit = Duration::from_millis(20);

        assert_eq!(
            pending.wait(Some(limit)).await,
            Err(GeocodeFailure::TimedOut(limit))
        );
        // The awaiter is gone, so the native side sees a cancelled request.
        assert!(completion.is_cancelled());
        assert!(!completion.succeed(()));
    }

    #[tokio::test]
    async fn test_completion_from_another_thread() {
        let result = call_native(Some(Duration::from_secs(5)), |completion| {
            std::thread::spawn(move || {
                completion.succeed(42u8);
            });
            Ok(())
        })
        .await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_synchronous_native_error() {
        let result: Result<(), _> = call_native(None, |_completion| {
            Err(NativeError::new("IllegalArgumentException"))
        })
        .await;
        assert_eq!(
            result,
            Err(GeocodeFailure::Native(NativeError::new(
                "IllegalArgumentException"
            )))
        );
    }

    #[tokio::test]
    async fn test_late_completion_after_cancel_is_ignored() {
        let (completion, pending) = channel::<u32>();
        let waiter = tokio::spawn(pending.wait(None));

        tokio::task::yield_now().await;
        waiter.abort();
        assert!(waiter.await.unwrap_err().is_cancelled());

        assert!(completion.is_cancelled());
        assert!(!completion.succeed(7));
        assert!(!completion.succeed(8));
    }
}
