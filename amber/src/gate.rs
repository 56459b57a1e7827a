use std::sync::Arc;

use shared::{Error, Result};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::ports::StoreAdapter;

/// One-shot readiness check for the underlying store.
///
/// The first operation to arrive runs [`StoreAdapter::probe`]; every other
/// caller awaits that same in-flight probe, and the outcome is memoized
/// permanently. A store that fails after a successful probe surfaces as a
/// per-operation failure, never as a gate transition.
pub struct ReadinessGate {
    store: Arc<dyn StoreAdapter>,
    outcome: OnceCell<std::result::Result<(), String>>,
}

impl ReadinessGate {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            store,
            outcome: OnceCell::new(),
        }
    }

    /// Waits for the settled probe outcome, running the probe on first use.
    ///
    /// Returns `Error::Unavailable` with the captured reason when the gate
    /// settled unavailable.
    pub async fn ready(&self) -> Result<()> {
        let outcome = self
            .outcome
            .get_or_init(|| async {
                match self.store.probe().await {
                    Ok(()) => {
                        debug!("store probe succeeded");
                        Ok(())
                    }
                    Err(err) => {
                        warn!(error = %err, "store probe failed, cache is unavailable");
                        // Capture the bare reason; `ready` re-wraps it as
                        // Unavailable for every later caller.
                        Err(match err {
                            Error::Unavailable(reason) => reason,
                            other => other.to_string(),
                        })
                    }
                }
            })
            .await;

        outcome.clone().map_err(Error::Unavailable)
    }

    /// Whether the gate settled (or settles) ready.
    pub async fn is_ready(&self) -> bool {
        self.ready().await.is_ok()
    }
}
