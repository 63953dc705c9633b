//! Periodic inventory refresh.
//!
//! # Responsibilities
//! - Call `refresh_inventory()` on the player contract once at start
//! - Repeat the call every interval until shutdown
//! - Log and count each outcome; a failure never stops the schedule
//!
//! # Design Decisions
//! - Each attempt is awaited inside the loop, so attempts never overlap
//! - Missed ticks are delayed: an attempt that overruns the interval is
//!   followed immediately by the next one, then the regular cadence resumes
//! - A pending shutdown wins over a due tick

use std::time::Duration;

use starknet::core::types::Felt;
use tokio::time::{self, MissedTickBehavior};

use crate::blockchain::{ContractCall, ContractInvoker};
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;

/// Counts of what the loop did before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub attempts: u64,
    pub failures: u64,
}

/// Refreshes one player's inventory on a fixed schedule.
pub struct InventoryRefresher<I> {
    invoker: I,
    player: Felt,
    interval: Duration,
}

impl<I: ContractInvoker> InventoryRefresher<I> {
    pub fn new(invoker: I, player: Felt, interval: Duration) -> Self {
        Self {
            invoker,
            player,
            interval,
        }
    }

    /// Perform a single refresh. Returns whether it succeeded.
    pub async fn refresh_once(&self) -> bool {
        tracing::info!(contract = %self.player.to_hex_string(), "Refreshing inventory...");

        match self
            .invoker
            .invoke(ContractCall::refresh_inventory(self.player))
            .await
        {
            Ok(tx_hash) => {
                tracing::info!(tx_hash = %tx_hash, "Inventory refreshed successfully");
                metrics::record_refresh(true);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error refreshing inventory");
                metrics::record_refresh(false);
                false
            }
        }
    }

    /// Run until `shutdown` fires. The first refresh happens immediately.
    pub async fn run(self, mut shutdown: ShutdownListener) -> RefreshSummary {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            "Starting inventory refresh loop"
        );

        let mut summary = RefreshSummary::default();
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!(
                        attempts = summary.attempts,
                        failures = summary.failures,
                        "Refresh loop received shutdown signal, exiting"
                    );
                    break;
                }
                _ = ticker.tick() => {
                    summary.attempts += 1;
                    if !self.refresh_once().await {
                        summary.failures += 1;
                    }
                }
            }
        }

        summary
    }
}
