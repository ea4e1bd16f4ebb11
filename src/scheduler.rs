//! Fixed-rate tick scheduler.
//!
//! Drives [`AppService::tick`](crate::app::service::AppService::tick) at
//! the configured control-loop period instead of spinning. The controller's
//! own poll cadence is coarser and independent of this rate.
//!
//! ```text
//!   now ──▶ poll() ──┬── Due      → run one tick, deadline += period
//!                    └── Wait(ms) → sleep, then poll again
//! ```
//!
//! Deadlines advance by whole periods so the tick phase stays stable. When
//! the loop falls more than one period behind, the missed ticks are dropped
//! rather than run back to back, and counted as overruns.

use log::warn;

/// Result of [`TickScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Run a tick now.
    Due,
    /// Sleep this many milliseconds before polling again.
    Wait(u32),
}

pub struct TickScheduler {
    period_ms: u64,
    next_due_ms: u64,
    overruns: u64,
}

impl TickScheduler {
    /// The first tick is due immediately at `start_ms`. A zero period is
    /// treated as 1 ms.
    pub fn new(period_ms: u32, start_ms: u64) -> Self {
        Self {
            period_ms: u64::from(period_ms.max(1)),
            next_due_ms: start_ms,
            overruns: 0,
        }
    }

    pub fn poll(&mut self, now_ms: u64) -> TickDecision {
        if now_ms < self.next_due_ms {
            let wait = (self.next_due_ms - now_ms).min(u64::from(u32::MAX));
            return TickDecision::Wait(wait as u32);
        }

        let behind = now_ms - self.next_due_ms;
        let skipped = behind / self.period_ms;
        if skipped > 0 {
            self.overruns += skipped;
            warn!(
                "Tick overrun: {} ms late, skipping {} tick(s)",
                behind, skipped
            );
        }
        self.next_due_ms += (skipped + 1) * self.period_ms;
        TickDecision::Due
    }

    /// Ticks dropped because the loop fell behind.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }
}
