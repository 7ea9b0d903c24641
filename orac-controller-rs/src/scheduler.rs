//! The single shared, rearmable deadline.
//!
//! Auto-repeat and coalesced redraws share one timer. Any call that arms
//! it overwrites the previous deadline, so a burst of inbound changes
//! collapses into one redraw at the next tick.

use embassy_time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RenderScheduler {
    deadline: Option<Instant>,
    redraw_pending: bool,
    suppressed: u32,
    redraw_delay: Duration,
}

impl RenderScheduler {
    pub fn new(redraw_delay: Duration) -> Self {
        Self {
            deadline: None,
            redraw_pending: false,
            suppressed: 0,
            redraw_delay,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed > 0
    }

    /// Last write wins.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Request a coalesced full redraw.
    ///
    /// While updates are suppressed the redraw is only remembered; the
    /// pending deadline stays as it is so a held button keeps repeating.
    pub fn schedule_redraw(&mut self, now: Instant) {
        self.redraw_pending = true;
        if self.suppressed == 0 {
            self.arm(now, self.redraw_delay);
        }
    }

    pub fn disable_updates(&mut self) {
        self.suppressed = self.suppressed.saturating_add(1);
    }

    /// Unbalanced calls are ignored.
    pub fn enable_updates(&mut self, now: Instant) {
        if self.suppressed == 0 {
            return;
        }
        self.suppressed -= 1;
        if self.suppressed == 0 && self.redraw_pending {
            self.arm(now, self.redraw_delay);
        }
    }

    pub fn reset_suppression(&mut self, now: Instant) {
        self.suppressed = 1;
        self.enable_updates(now);
    }

    /// Drop the pending deadline, which stops auto-repeat.
    ///
    /// Unlike a bare timer reset this does not discard an owed redraw: if
    /// one is pending and updates are live, the deadline is re-armed one
    /// redraw delay from `now`. Otherwise a release arriving inside the
    /// coalescing window would leave protocol changes unpainted.
    pub fn cancel(&mut self, now: Instant) {
        self.deadline = None;
        if self.redraw_pending && self.suppressed == 0 {
            self.arm(now, self.redraw_delay);
        }
    }

    /// Consume the deadline if it has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Claim the owed redraw, unless updates are suppressed.
    pub fn take_redraw(&mut self) -> bool {
        if self.redraw_pending && self.suppressed == 0 {
            self.redraw_pending = false;
            true
        } else {
            false
        }
    }

    /// A full frame went out; nothing is owed any more.
    pub fn mark_rendered(&mut self) {
        self.redraw_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> RenderScheduler {
        RenderScheduler::new(Duration::from_millis(100))
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    // ── Coalescing ───────────────────────────────────────────────────

    #[test]
    fn burst_collapses_into_last_deadline() {
        let mut s = scheduler();
        s.schedule_redraw(at(0));
        s.schedule_redraw(at(30));
        s.schedule_redraw(at(60));
        assert_eq!(s.deadline(), Some(at(160)));
        assert!(!s.expire(at(150)));
        assert!(s.expire(at(160)));
        assert!(s.take_redraw());
        assert!(!s.take_redraw());
        assert_eq!(s.deadline(), None);
    }

    #[test]
    fn arm_overwrites_redraw_deadline() {
        let mut s = scheduler();
        s.schedule_redraw(at(0));
        s.arm(at(10), Duration::from_millis(300));
        assert_eq!(s.deadline(), Some(at(310)));
        assert!(s.redraw_pending());
    }

    #[test]
    fn cancel_keeps_owed_redraw() {
        let mut s = scheduler();
        s.arm(at(0), Duration::from_millis(300));
        s.cancel(at(5));
        assert_eq!(s.deadline(), None);

        s.schedule_redraw(at(10));
        s.arm(at(20), Duration::from_millis(300));
        s.cancel(at(25));
        assert_eq!(s.deadline(), Some(at(125)));
    }

    // ── Suppression ──────────────────────────────────────────────────

    #[test]
    fn suppressed_redraw_fires_after_enable() {
        let mut s = scheduler();
        s.disable_updates();
        s.schedule_redraw(at(0));
        assert_eq!(s.deadline(), None);
        assert!(!s.take_redraw());

        s.enable_updates(at(50));
        assert_eq!(s.deadline(), Some(at(150)));
        assert!(s.take_redraw());
    }

    #[test]
    fn nested_suppression_balances() {
        let mut s = scheduler();
        s.disable_updates();
        s.disable_updates();
        s.schedule_redraw(at(0));
        s.enable_updates(at(1));
        assert!(s.is_suppressed());
        assert_eq!(s.deadline(), None);
        s.enable_updates(at(2));
        assert!(!s.is_suppressed());
        assert_eq!(s.deadline(), Some(at(102)));
    }

    #[test]
    fn extra_enable_is_ignored() {
        let mut s = scheduler();
        s.enable_updates(at(0));
        s.disable_updates();
        assert!(s.is_suppressed());
        s.enable_updates(at(0));
        assert!(!s.is_suppressed());
    }

    #[test]
    fn suppression_keeps_repeat_deadline() {
        let mut s = scheduler();
        s.arm(at(0), Duration::from_millis(300));
        s.disable_updates();
        s.schedule_redraw(at(10));
        assert_eq!(s.deadline(), Some(at(300)));
    }

    #[test]
    fn reset_suppression_releases_owed_redraw() {
        let mut s = scheduler();
        s.disable_updates();
        s.disable_updates();
        s.schedule_redraw(at(0));
        s.reset_suppression(at(40));
        assert!(!s.is_suppressed());
        assert_eq!(s.deadline(), Some(at(140)));
    }
}
