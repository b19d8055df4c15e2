//! # Inactivity monitor: forced logout after an idle period
//!
//! [`InactivityMonitor`] is a small state machine driven entirely by the
//! reducer:
//!
//! | Phase | Meaning | Leaves via |
//! |-------|---------|------------|
//! | `Inert` | No session to watch (startup, after logout) | [`arm`](InactivityMonitor::arm) |
//! | `Armed` | Counting down from the last interaction | [`check`](InactivityMonitor::check) reaching the threshold, [`disarm`](InactivityMonitor::disarm) |
//! | `Expired` | Logout has fired | [`arm`](InactivityMonitor::arm) |
//!
//! Interaction signals only move the "last activity" timestamp; no timer is
//! restarted per event. A single pending check per arming sleeps until the
//! earliest possible expiry, then either fires or schedules the remainder.
//! Every `arm`/`disarm` bumps a generation, so checks scheduled by an older
//! arming resolve to [`IdleCheck::Stale`] and do nothing.

use std::time::Duration;

/// Milliseconds since the Unix epoch.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Inert,
    Armed { last_activity: Millis },
    Expired,
}

/// Outcome of a scheduled idle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleCheck {
    /// The check belongs to an older arming, or the monitor is not armed.
    Stale,
    /// Activity happened since; check again after this many milliseconds.
    Remaining(Millis),
    /// Threshold reached. Returned once per arming.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InactivityMonitor {
    threshold: Millis,
    phase: Phase,
    generation: u64,
}

impl InactivityMonitor {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold: u64::try_from(threshold.as_millis()).unwrap_or(u64::MAX),
            phase: Phase::Inert,
            generation: 0,
        }
    }

    pub fn threshold(&self) -> Millis {
        self.threshold
    }

    /// A zero threshold disables the monitor entirely.
    pub fn is_enabled(&self) -> bool {
        self.threshold > 0
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.phase, Phase::Armed { .. })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start watching from `now`. Returns the generation the first check must
    /// carry, or `None` when the monitor is disabled.
    pub fn arm(&mut self, now: Millis) -> Option<u64> {
        if !self.is_enabled() {
            return None;
        }
        self.generation += 1;
        self.phase = Phase::Armed { last_activity: now };
        Some(self.generation)
    }

    /// Stop watching. Pending checks become no-ops.
    pub fn disarm(&mut self) {
        self.generation += 1;
        self.phase = Phase::Inert;
    }

    /// Pointer move, key press, click or scroll. Ignored unless armed.
    pub fn record_activity(&mut self, now: Millis) {
        if let Phase::Armed { last_activity } = &mut self.phase {
            *last_activity = (*last_activity).max(now);
        }
    }

    /// Evaluate a check scheduled with `generation`.
    pub fn check(&mut self, generation: u64, now: Millis) -> IdleCheck {
        if generation != self.generation {
            return IdleCheck::Stale;
        }
        match self.phase {
            Phase::Armed { last_activity } => {
                let deadline = last_activity.saturating_add(self.threshold);
                if now >= deadline {
                    self.phase = Phase::Expired;
                    IdleCheck::Expired
                } else {
                    IdleCheck::Remaining(deadline - now)
                }
            }
            Phase::Inert | Phase::Expired => IdleCheck::Stale,
        }
    }
}

/// Current wall-clock time.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> Millis {
    js_sys::Date::now() as Millis
}

/// Current wall-clock time.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> Millis {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Platform sleep used by scheduled checks.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
