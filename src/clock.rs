//! Device clock: elapsed-time measurements against three references.
//!
//! The only input is the platform's monotonic millisecond counter. Boot time
//! normalises it; last-motion and last-check timestamps are kept as integer
//! milliseconds since boot, and every threshold comparison is done on those
//! integers. Seconds (`f64`) are derived only for reporting. Counter
//! wrap-around is not handled (49 days on a 32-bit counter, never on the
//! 64-bit ESP timer).

/// Whole seconds as milliseconds, for threshold comparisons.
pub const fn secs_to_ms(secs: u32) -> u64 {
    secs as u64 * 1000
}

/// Reference timestamps owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceClock {
    boot_ms: u64,
    /// Milliseconds since boot at the last motion (or manual-on) event.
    last_motion_ms: u64,
    /// Milliseconds since boot at the last convergence check.
    last_check_ms: u64,
}

impl DeviceClock {
    /// Capture the boot reference. The only constructor, so no elapsed-time
    /// query can run before the boot time is known.
    pub fn boot(now_ms: u64) -> Self {
        Self {
            boot_ms: now_ms,
            last_motion_ms: 0,
            last_check_ms: 0,
        }
    }

    /// Milliseconds elapsed since [`boot`](Self::boot).
    ///
    /// A counter value earlier than the boot reference reads as zero.
    pub fn ms_since_boot(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.boot_ms)
    }

    /// Milliseconds between `reference_ms` (since boot) and now; zero if the
    /// reference lies in the future.
    pub fn ms_since(&self, reference_ms: u64, now_ms: u64) -> u64 {
        self.ms_since_boot(now_ms).saturating_sub(reference_ms)
    }

    pub fn ms_since_motion(&self, now_ms: u64) -> u64 {
        self.ms_since(self.last_motion_ms, now_ms)
    }

    pub fn ms_since_check(&self, now_ms: u64) -> u64 {
        self.ms_since(self.last_check_ms, now_ms)
    }

    /// Seconds elapsed since boot.
    pub fn seconds_since_boot(&self, now_ms: u64) -> f64 {
        to_secs(self.ms_since_boot(now_ms))
    }

    /// Seconds between `reference` (seconds since boot) and now.
    pub fn seconds_since(&self, reference: f64, now_ms: u64) -> f64 {
        self.seconds_since_boot(now_ms) - reference
    }

    pub fn secs_since_motion(&self, now_ms: u64) -> f64 {
        to_secs(self.ms_since_motion(now_ms))
    }

    pub fn secs_since_check(&self, now_ms: u64) -> f64 {
        to_secs(self.ms_since_check(now_ms))
    }

    pub fn mark_motion(&mut self, now_ms: u64) {
        self.last_motion_ms = self.ms_since_boot(now_ms);
    }

    pub fn mark_check(&mut self, now_ms: u64) {
        self.last_check_ms = self.ms_since_boot(now_ms);
    }

    pub fn last_motion_secs(&self) -> f64 {
        to_secs(self.last_motion_ms)
    }

    pub fn last_check_secs(&self) -> f64 {
        to_secs(self.last_check_ms)
    }
}

fn to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
