// ─── Async Load Gate ───
// One-shot completion signal: resolved once, observed by any number of waiters.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error};

use crate::core::error::{ShellError, ShellResult};

/// Released exactly once with the outcome of the version load.
///
/// Clones share the same signal. Waiters that arrive after resolution get the
/// stored outcome immediately.
#[derive(Debug, Clone)]
pub struct AsyncLoadGate {
    state: Arc<watch::Sender<Option<bool>>>,
}

impl AsyncLoadGate {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
        }
    }

    /// Wait for the gate to be resolved and return its outcome.
    pub async fn wait(&self) -> bool {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let outcome = match rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.unwrap_or(false),
            Err(_) => false,
        };
        outcome
    }

    /// Outcome if already resolved.
    pub fn peek(&self) -> Option<bool> {
        *self.state.borrow()
    }

    pub fn is_resolved(&self) -> bool {
        self.peek().is_some()
    }

    /// Release all waiters with `success`.
    ///
    /// # Panics
    ///
    /// A second call is a programming error: it panics in debug builds and
    /// returns [`ShellError::ContractViolation`] otherwise, leaving the first
    /// outcome in place.
    pub fn resolve(&self, success: bool) -> ShellResult<()> {
        let first = self.state.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(success);
            true
        });

        if !first {
            let message = format!(
                "load gate resolved twice (kept {:?}, rejected {})",
                self.peek(),
                success
            );
            error!("{}", message);
            if cfg!(debug_assertions) {
                panic!("{message}");
            }
            return Err(ShellError::ContractViolation(message));
        }

        debug!("Load gate resolved with success={}", success);
        Ok(())
    }
}

impl Default for AsyncLoadGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn waiters_registered_before_resolution_all_observe_outcome() {
        let gate = AsyncLoadGate::new();
        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.wait().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!gate.is_resolved());
        gate.resolve(true).unwrap();

        for waiter in waiters {
            assert!(waiter.await.unwrap());
        }
    }

    #[tokio::test]
    async fn late_waiter_sees_stored_outcome() {
        let gate = AsyncLoadGate::new();
        gate.resolve(false).unwrap();

        assert_eq!(gate.peek(), Some(false));
        assert!(!gate.wait().await);
        assert!(!gate.clone().wait().await);
    }

    #[tokio::test]
    async fn unresolved_gate_keeps_waiting() {
        let gate = AsyncLoadGate::new();
        let pending = tokio::time::timeout(Duration::from_millis(30), gate.wait()).await;
        assert!(pending.is_err());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "load gate resolved twice")]
    fn second_resolution_panics_in_debug_builds() {
        let gate = AsyncLoadGate::new();
        gate.resolve(true).unwrap();
        let _ = gate.resolve(false);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn second_resolution_is_rejected() {
        let gate = AsyncLoadGate::new();
        gate.resolve(true).unwrap();

        assert!(matches!(
            gate.resolve(false),
            Err(ShellError::ContractViolation(_))
        ));
        assert_eq!(gate.peek(), Some(true));
    }
}
