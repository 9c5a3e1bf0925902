//! # UI Timers
//!
//! Deferred view effects (hide the notification, finish a fade-out) kept in
//! deadline order and drained on the UI thread.
//!
//! ```text
//!  open_cart()   close_cart(t)            advance(t + 300ms)
//!      │              │                          │
//!      ▼              ▼                          ▼
//!   Shown ───────► Hiding ── FinishPanelHide ─► Hidden
//!                    ▲
//!                    └─ reopened, or closed again, before the deadline?
//!                       the effect's generation is stale and advance()
//!                       ignores it
//! ```
//!
//! Timers are never cancelled. Each effect carries enough context for the
//! controller to tell whether it still applies when it comes due.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A view change scheduled for later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Hide the "added to cart" flash if no newer add re-showed it.
    HideNotification { generation: u64 },

    /// Complete the cart panel fade-out started by close number `generation`.
    FinishPanelHide { generation: u64 },

    /// Complete a product zoom modal fade-out.
    FinishModalHide { product_id: String, generation: u64 },
}

/// Deadline-ordered effects. Ties fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Instant, u64), UiEffect>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    /// Schedules `effect` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, effect: UiEffect) {
        let deadline = now + delay;
        self.entries.insert((deadline, self.seq), effect);
        self.seq += 1;
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns every effect due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<UiEffect> {
        let later = self.entries.split_off(&(now, u64::MAX));
        let due = std::mem::replace(&mut self.entries, later);
        due.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
