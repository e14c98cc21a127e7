#![forbid(unsafe_code)]

//! Debounce and throttle state machines.
//!
//! Both primitives coalesce repeated trigger requests into at most one
//! firing per time window, with an optional immediate ("leading")
//! firing. There is no hidden timer thread: callers pass an explicit
//! `now` to [`trigger`](Debouncer::trigger) and pump
//! [`poll`](Debouncer::poll) from their event loop, which keeps every
//! firing decision deterministic and testable.
//!
//! The pending state is a single slot — one deadline for a debounce,
//! one trailing flag per window for a throttle. A new request either
//! resets the slot (debounce) or coalesces into it (throttle); nothing
//! ever queues more than one future firing.
//!
//! # Invariants
//!
//! 1. After [`cancel`](Debouncer::cancel), no firing occurs for the
//!    cancelled occurrence; later triggers schedule fresh ones.
//! 2. A debounce fires exactly once per settled burst, `delay` after
//!    the last trigger in the burst.
//! 3. A throttle fires at most once per `delay` window.
//! 4. Dropping a runner discards its pending firing (the callback in an
//!    effect wrapper can never run after the wrapper is gone).

use web_time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

/// Trailing-edge debounce: fires once `delay` has elapsed with no
/// further trigger.
///
/// With `leading`, the very first trigger after construction fires
/// immediately ([`trigger`](Self::trigger) returns `true`) and no
/// trailing fire is scheduled for that occurrence.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    leading: bool,
    first_run: bool,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given settle delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            leading: false,
            first_run: true,
            deadline: None,
        }
    }

    /// Enable or disable the leading-edge firing.
    #[must_use]
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Record a trigger at `now`.
    ///
    /// Returns `true` when the leading edge fires (first trigger with
    /// `leading` enabled); otherwise (re)schedules the single pending
    /// deadline to `now + delay` and returns `false`.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.first_run {
            self.first_run = false;
            if self.leading {
                return true;
            }
        }
        self.deadline = Some(now + self.delay);
        false
    }

    /// Check the pending deadline. Returns `true` exactly when the
    /// trailing edge fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Clear the pending firing, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a trailing fire is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

/// Windowed throttle: at most one firing per `delay` window.
///
/// The first trigger of a window fires immediately when `leading` is
/// enabled; triggers inside an active window coalesce into a single
/// trailing fire at the window boundary, observed via
/// [`poll`](Self::poll). A trailing fire opens the next window, so a
/// continuous trigger stream fires once per `delay`.
#[derive(Debug, Clone)]
pub struct Throttler {
    delay: Duration,
    leading: bool,
    window_start: Option<Instant>,
    trailing_pending: bool,
}

impl Throttler {
    /// Create a throttler with the given window length.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            leading: false,
            window_start: None,
            trailing_pending: false,
        }
    }

    /// Enable or disable the leading-edge firing.
    #[must_use]
    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    /// Record a trigger at `now`. Returns `true` when a firing is due
    /// immediately.
    ///
    /// If the previous window expired with an unpolled trailing fire
    /// owed, that fire is delivered from here and the new trigger
    /// coalesces into the window it opens.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if let Some(start) = self.window_start {
            if now < start + self.delay {
                self.trailing_pending = true;
                return false;
            }
            if self.trailing_pending {
                // Owed trailing fire from the expired window.
                self.window_start = Some(now);
                return true;
            }
            self.window_start = None;
        }

        self.window_start = Some(now);
        if self.leading {
            true
        } else {
            self.trailing_pending = true;
            false
        }
    }

    /// Check the window boundary. Returns `true` exactly when the
    /// trailing edge fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(start) = self.window_start else {
            return false;
        };
        let boundary = start + self.delay;
        if now < boundary {
            return false;
        }
        if self.trailing_pending {
            self.trailing_pending = false;
            self.window_start = Some(boundary);
            true
        } else {
            self.window_start = None;
            false
        }
    }

    /// Clear the pending firing and close the active window.
    pub fn cancel(&mut self) {
        self.window_start = None;
        self.trailing_pending = false;
    }

    /// Whether a trailing fire is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.trailing_pending
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Minimal pass/hold window check.
///
/// `try_pass` answers "may an event be processed now?" at most once per
/// interval. Consumers that coalesce held events keep their own
/// latest-wins slot alongside the gate.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    interval: Duration,
    last_pass: Option<Instant>,
}

impl ThrottleGate {
    /// Create a gate with the given minimum interval between passes.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: None,
        }
    }

    /// Whether an event at `now` may pass. A pass closes the gate for
    /// the next `interval`.
    pub fn try_pass(&mut self, now: Instant) -> bool {
        let open = self
            .last_pass
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if open {
            self.last_pass = Some(now);
        }
        open
    }

    /// Reopen the gate immediately.
    pub fn reset(&mut self) {
        self.last_pass = None;
    }
}

// ---------------------------------------------------------------------------
// Callback-owning wrappers
// ---------------------------------------------------------------------------

/// A debounced callback.
///
/// Owns the callback, so teardown is structural: once the wrapper is
/// dropped the callback can never run again. [`cancel`](Self::cancel)
/// clears the pending occurrence without consuming the wrapper.
pub struct DebouncedEffect {
    machine: Debouncer,
    callback: Box<dyn FnMut()>,
}

impl DebouncedEffect {
    /// Wrap `callback` with a debounce of `delay`.
    #[must_use]
    pub fn new(delay: Duration, callback: impl FnMut() + 'static) -> Self {
        Self {
            machine: Debouncer::new(delay),
            callback: Box::new(callback),
        }
    }

    /// Enable or disable the leading-edge firing.
    #[must_use]
    pub fn leading(mut self, leading: bool) -> Self {
        self.machine = self.machine.leading(leading);
        self
    }

    /// Record a trigger; runs the callback when the leading edge fires.
    pub fn trigger(&mut self, now: Instant) {
        if self.machine.trigger(now) {
            (self.callback)();
        }
    }

    /// Pump the deadline; runs the callback when the trailing edge fires.
    pub fn poll(&mut self, now: Instant) {
        if self.machine.poll(now) {
            (self.callback)();
        }
    }

    /// Clear the pending firing. The callback will not run for the
    /// cancelled occurrence.
    pub fn cancel(&mut self) {
        self.machine.cancel();
    }

    /// Whether a trailing fire is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.machine.is_pending()
    }
}

/// A throttled callback. See [`DebouncedEffect`] for lifecycle notes.
pub struct ThrottledEffect {
    machine: Throttler,
    callback: Box<dyn FnMut()>,
}

impl ThrottledEffect {
    /// Wrap `callback` with a throttle window of `delay`.
    #[must_use]
    pub fn new(delay: Duration, callback: impl FnMut() + 'static) -> Self {
        Self {
            machine: Throttler::new(delay),
            callback: Box::new(callback),
        }
    }

    /// Enable or disable the leading-edge firing.
    #[must_use]
    pub fn leading(mut self, leading: bool) -> Self {
        self.machine = self.machine.leading(leading);
        self
    }

    /// Record a trigger; runs the callback when a firing is due now.
    pub fn trigger(&mut self, now: Instant) {
        if self.machine.trigger(now) {
            (self.callback)();
        }
    }

    /// Pump the window boundary; runs the callback on a trailing fire.
    pub fn poll(&mut self, now: Instant) {
        if self.machine.poll(now) {
            (self.callback)();
        }
    }

    /// Clear the pending firing and close the active window.
    pub fn cancel(&mut self) {
        self.machine.cancel();
    }

    /// Whether a trailing fire is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.machine.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn debounce_burst_fires_once_after_last_trigger() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(10));

        assert!(!debounce.trigger(t0));
        assert!(!debounce.trigger(t0 + ms(3)));
        assert!(!debounce.trigger(t0 + ms(6)));

        // Deadline is 10ms after the *last* trigger.
        assert!(!debounce.poll(t0 + ms(15)));
        assert!(debounce.poll(t0 + ms(16)));
        assert!(!debounce.poll(t0 + ms(30)), "fires exactly once");
    }

    #[test]
    fn debounce_leading_fires_first_trigger_immediately() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(10)).leading(true);

        assert!(debounce.trigger(t0));
        assert!(!debounce.is_pending(), "leading fire has no trailing");
        assert!(!debounce.poll(t0 + ms(20)));

        // Subsequent triggers are ordinary trailing debounces.
        assert!(!debounce.trigger(t0 + ms(30)));
        assert!(debounce.poll(t0 + ms(40)));
    }

    #[test]
    fn debounce_cancel_suppresses_pending_fire() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(10));

        debounce.trigger(t0);
        assert!(debounce.is_pending());
        debounce.cancel();
        assert!(!debounce.poll(t0 + ms(20)));
    }

    #[test]
    fn debounce_retrigger_after_cancel_schedules_fresh_fire() {
        let t0 = Instant::now();
        let mut debounce = Debouncer::new(ms(10));

        debounce.trigger(t0);
        debounce.cancel();
        debounce.trigger(t0 + ms(5));
        assert!(debounce.poll(t0 + ms(15)));
    }

    #[test]
    fn throttle_leading_burst_fires_leading_then_one_trailing() {
        let t0 = Instant::now();
        let mut throttle = Throttler::new(ms(10)).leading(true);

        assert!(throttle.trigger(t0), "leading fire");
        assert!(!throttle.trigger(t0 + ms(2)));
        assert!(!throttle.trigger(t0 + ms(4)));
        assert!(!throttle.trigger(t0 + ms(9)));

        assert!(!throttle.poll(t0 + ms(9)));
        assert!(throttle.poll(t0 + ms(10)), "one trailing fire at boundary");
        assert!(!throttle.poll(t0 + ms(19)));
    }

    #[test]
    fn throttle_without_leading_defers_first_fire_to_boundary() {
        let t0 = Instant::now();
        let mut throttle = Throttler::new(ms(10));

        assert!(!throttle.trigger(t0));
        assert!(throttle.poll(t0 + ms(10)));
        assert!(!throttle.poll(t0 + ms(25)));
    }

    #[test]
    fn throttle_idle_gap_starts_fresh_window() {
        let t0 = Instant::now();
        let mut throttle = Throttler::new(ms(10)).leading(true);

        assert!(throttle.trigger(t0));
        assert!(!throttle.poll(t0 + ms(15)), "no trailing without triggers");
        assert!(throttle.trigger(t0 + ms(25)), "new window fires leading");
    }

    #[test]
    fn throttle_owed_trailing_delivered_by_trigger() {
        let t0 = Instant::now();
        let mut throttle = Throttler::new(ms(10));

        assert!(!throttle.trigger(t0));
        // Window expired without a poll; the owed fire rides the next trigger.
        assert!(throttle.trigger(t0 + ms(15)));
        // That trigger coalesced into the new window.
        assert!(throttle.poll(t0 + ms(25)));
    }

    #[test]
    fn throttle_cancel_clears_pending() {
        let t0 = Instant::now();
        let mut throttle = Throttler::new(ms(10));

        throttle.trigger(t0);
        assert!(throttle.is_pending());
        throttle.cancel();
        assert!(!throttle.poll(t0 + ms(20)));
    }

    #[test]
    fn gate_passes_at_most_once_per_interval() {
        let t0 = Instant::now();
        let mut gate = ThrottleGate::new(ms(10));

        assert!(gate.try_pass(t0));
        assert!(!gate.try_pass(t0 + ms(5)));
        assert!(!gate.try_pass(t0 + ms(9)));
        assert!(gate.try_pass(t0 + ms(10)));
    }

    #[test]
    fn gate_reset_reopens_immediately() {
        let t0 = Instant::now();
        let mut gate = ThrottleGate::new(ms(10));

        assert!(gate.try_pass(t0));
        gate.reset();
        assert!(gate.try_pass(t0 + ms(1)));
    }

    #[test]
    fn debounced_effect_runs_callback_once_per_burst() {
        let t0 = Instant::now();
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        let mut effect =
            DebouncedEffect::new(ms(10), move || count_clone.set(count_clone.get() + 1));

        effect.trigger(t0);
        effect.trigger(t0 + ms(3));
        effect.poll(t0 + ms(12));
        assert_eq!(count.get(), 0);
        effect.poll(t0 + ms(13));
        assert_eq!(count.get(), 1);
        effect.poll(t0 + ms(30));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn debounced_effect_cancel_prevents_invocation() {
        let t0 = Instant::now();
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        let mut effect =
            DebouncedEffect::new(ms(10), move || count_clone.set(count_clone.get() + 1));

        effect.trigger(t0);
        effect.cancel();
        effect.poll(t0 + ms(20));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn throttled_effect_leading_fires_immediately_then_coalesces() {
        let t0 = Instant::now();
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        let mut effect = ThrottledEffect::new(ms(10), move || count_clone.set(count_clone.get() + 1))
            .leading(true);

        effect.trigger(t0);
        assert_eq!(count.get(), 1);

        effect.trigger(t0 + ms(2));
        effect.trigger(t0 + ms(4));
        assert_eq!(count.get(), 1);

        effect.poll(t0 + ms(10));
        assert_eq!(count.get(), 2, "burst coalesces into one trailing fire");
    }

    #[test]
    fn dropped_effect_never_fires() {
        let t0 = Instant::now();
        let count = Rc::new(Cell::new(0));

        let count_clone = Rc::clone(&count);
        let mut effect =
            DebouncedEffect::new(ms(10), move || count_clone.set(count_clone.get() + 1));
        effect.trigger(t0);
        drop(effect);

        // Nothing left to poll: the pending occurrence died with the wrapper.
        assert_eq!(count.get(), 0);
    }
}
