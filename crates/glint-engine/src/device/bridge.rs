//! One-shot bridge from driver callbacks to blocking callers.
//!
//! wgpu delivers buffer-map completion through a callback that only fires while
//! the device's event queue is being pumped. [`Completion`] turns that into a
//! blocking wait with an explicit deadline: the callback side resolves a shared
//! slot, the waiting side spins a caller-supplied pump until the slot fills or
//! the deadline passes.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// The asynchronous operation did not complete within its budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeTimeout {
    /// How long the caller waited before giving up.
    pub waited: Duration,
}

impl fmt::Display for BridgeTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "asynchronous operation did not complete within {:?}",
            self.waited
        )
    }
}

impl std::error::Error for BridgeTimeout {}

/// One-shot completion slot.
///
/// Create a [`Completion`], hand a [`Resolver`] to the driver callback, then
/// call [`wait_with`] to block until the callback fires.
///
/// [`wait_with`]: Completion::wait_with
pub struct Completion<T> {
    slot: Arc<Mutex<Option<T>>>,
}

/// Callback-side half of a [`Completion`].
///
/// Cloneable so it can be moved into `Send + 'static` driver callbacks.
/// The first resolution wins; later calls are ignored.
pub struct Resolver<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Resolver<T> {
    /// Resolves the completion. A second call is a no-op.
    pub fn resolve(&self, value: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

impl<T> Completion<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the callback-side half.
    pub fn resolver(&self) -> Resolver<T> {
        Resolver {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Takes the value if the callback has already fired.
    pub fn try_take(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Blocks until the completion resolves, invoking `pump` between checks.
    ///
    /// `pump` is expected to drive whatever dispatches the callback (typically
    /// `device.poll`). The callback may fire inside the issuing call itself, in
    /// which case this returns without pumping at all.
    pub fn wait_with(
        self,
        timeout: Duration,
        mut pump: impl FnMut(),
    ) -> Result<T, BridgeTimeout> {
        let start = Instant::now();
        loop {
            if let Some(value) = self.try_take() {
                return Ok(value);
            }
            if start.elapsed() >= timeout {
                return Err(BridgeTimeout { waited: timeout });
            }
            pump();
            std::hint::spin_loop();
        }
    }
}

impl<T> Default for Completion<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchronous_resolution_returns_without_pumping() {
        let completion = Completion::new();
        completion.resolver().resolve(7u32);

        let mut pumped = 0;
        let value = completion
            .wait_with(Duration::from_secs(1), || pumped += 1)
            .expect("already resolved");

        assert_eq!(value, 7);
        assert_eq!(pumped, 0);
    }

    #[test]
    fn resolution_from_the_pump_is_observed() {
        let completion = Completion::new();
        let resolver = completion.resolver();

        let mut pumped = 0;
        let value = completion
            .wait_with(Duration::from_secs(1), move || {
                pumped += 1;
                if pumped == 3 {
                    resolver.resolve("done");
                }
            })
            .expect("resolved on third pump");

        assert_eq!(value, "done");
    }

    #[test]
    fn absent_completion_times_out() {
        let completion: Completion<()> = Completion::new();
        let err = completion
            .wait_with(Duration::from_millis(10), || {})
            .expect_err("never resolved");
        assert_eq!(err.waited, Duration::from_millis(10));
    }

    #[test]
    fn first_resolution_wins() {
        let completion = Completion::new();
        let resolver = completion.resolver();
        resolver.resolve(1u8);
        resolver.resolve(2u8);
        assert_eq!(completion.try_take(), Some(1));
        assert_eq!(completion.try_take(), None);
    }
}
