//! Timers.
//!
//! An animator never touches a global timer API directly. It asks a
//! [`Scheduler`] to run a callback after a delay and holds on to the returned
//! timer. The timer is the cancellation token: dropping it cancels the
//! callback if it hasn't fired yet.
//!
//! [`ManualClock`] is a virtual-time scheduler that only moves when told to,
//! which makes the animation fully deterministic for server side rendering
//! and tests. The browser scheduler lives in [`crate::web`].
use std::collections::BTreeMap;

use crate::{
    error::Error,
    sync::{Shared, WeakShared},
};

/// The two kinds of timer an animator keeps, at most one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Drives the next keystroke (or the first one after a dwell).
    Typing,
    /// Toggles the trailing cursor.
    Blink,
}

/// Schedules callbacks to run after a delay.
pub trait Scheduler: Clone + 'static {
    /// A pending callback. Dropping it cancels the callback.
    type Timer: 'static;

    /// Run `f` once, roughly `millis` milliseconds from now.
    ///
    /// Implementations must never call `f` before returning.
    fn schedule(
        &self,
        kind: TimerKind,
        millis: u32,
        f: impl FnOnce() + 'static,
    ) -> Result<Self::Timer, Error>;
}

struct Pending {
    kind: TimerKind,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_id: u64,
    // Keyed by (deadline, id) so iteration order is firing order.
    pending: BTreeMap<(u64, u64), Pending>,
}

impl ClockState {
    fn pop_due(&mut self, until: Option<u64>) -> Option<Pending> {
        let key = *self.pending.keys().next()?;
        if until.is_some_and(|until| key.0 > until) {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }
}

/// A scheduler over virtual time.
///
/// Time only moves with [`ManualClock::advance`] and [`ManualClock::run_next`].
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Shared<ClockState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds of virtual time elapsed since the clock was created.
    pub fn now(&self) -> u64 {
        self.state.get().now
    }

    /// The number of callbacks waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.get().pending.len()
    }

    /// The kinds of the waiting callbacks, in firing order.
    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        self.state
            .get()
            .pending
            .values()
            .map(|pending| pending.kind)
            .collect()
    }

    /// Deadline of the next callback to fire, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.state.get().pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Move time forward by `millis`, firing every callback that comes due
    /// along the way, in deadline order.
    ///
    /// Callbacks scheduled while advancing fire too, if they fall within the
    /// window. Returns the number of callbacks fired.
    pub fn advance(&self, millis: u64) -> usize {
        let until = self.now() + millis;
        let mut fired = 0;
        loop {
            // The borrow must end before the callback runs, callbacks schedule.
            let next = self.state.get_mut().pop_due(Some(until));
            let Some(pending) = next else {
                break;
            };
            log::trace!("firing {:?} timer at {}", pending.kind, self.now());
            (pending.callback)();
            fired += 1;
        }
        self.state.get_mut().now = until;
        fired
    }

    /// Jump to the earliest pending callback and fire it.
    ///
    /// Returns the kind of timer that fired, or `None` if nothing was pending.
    pub fn run_next(&self) -> Option<TimerKind> {
        let pending = self.state.get_mut().pop_due(None)?;
        log::trace!("firing {:?} timer at {}", pending.kind, self.now());
        let kind = pending.kind;
        (pending.callback)();
        Some(kind)
    }
}

/// A callback pending on a [`ManualClock`].
pub struct ManualTimer {
    key: (u64, u64),
    kind: TimerKind,
    state: WeakShared<ClockState>,
}

impl ManualTimer {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Virtual time at which the callback fires.
    pub fn deadline(&self) -> u64 {
        self.key.0
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let removed = state.get_mut().pending.remove(&self.key);
            drop(removed);
        }
    }
}

impl Scheduler for ManualClock {
    type Timer = ManualTimer;

    fn schedule(
        &self,
        kind: TimerKind,
        millis: u32,
        f: impl FnOnce() + 'static,
    ) -> Result<ManualTimer, Error> {
        let mut state = self.state.get_mut();
        let key = (state.now + u64::from(millis), state.next_id);
        state.next_id += 1;
        state.pending.insert(
            key,
            Pending {
                kind,
                callback: Box::new(f),
            },
        );
        Ok(ManualTimer {
            key,
            kind,
            state: self.state.downgrade(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let clock = ManualClock::new();
        let log = Shared::new(Vec::new());
        let _b = clock
            .schedule(TimerKind::Blink, 20, {
                let log = log.clone();
                move || log.get_mut().push("blink")
            })
            .unwrap();
        let _a = clock
            .schedule(TimerKind::Typing, 10, {
                let log = log.clone();
                move || log.get_mut().push("typing")
            })
            .unwrap();
        assert_eq!(vec![TimerKind::Typing, TimerKind::Blink], clock.pending_kinds());
        assert_eq!(0, clock.advance(9));
        assert_eq!(1, clock.advance(1));
        assert_eq!(vec!["typing"], *log.get());
        assert_eq!(10, clock.now());
        assert_eq!(Some(TimerKind::Blink), clock.run_next());
        assert_eq!(20, clock.now());
        assert_eq!(vec!["typing", "blink"], *log.get());
        assert_eq!(None, clock.run_next());
    }

    #[test]
    fn dropping_the_timer_cancels() {
        let clock = ManualClock::new();
        let fired = Shared::new(false);
        let timer = clock
            .schedule(TimerKind::Typing, 10, {
                let fired = fired.clone();
                move || {
                    fired.set(true);
                }
            })
            .unwrap();
        assert_eq!(10, timer.deadline());
        assert_eq!(1, clock.pending());
        drop(timer);
        assert_eq!(0, clock.pending());
        clock.advance(100);
        assert!(!*fired.get());
    }

    #[test]
    fn callbacks_can_schedule_within_the_window() {
        let clock = ManualClock::new();
        let hits = Shared::new(Vec::<u64>::new());
        let timers: Shared<Vec<ManualTimer>> = Shared::default();
        let first = clock
            .schedule(TimerKind::Typing, 5, {
                let clock = clock.clone();
                let hits = hits.clone();
                let timers = timers.clone();
                move || {
                    hits.get_mut().push(clock.now());
                    let hits = hits.clone();
                    let inner = clock.clone();
                    let timer = clock
                        .schedule(TimerKind::Typing, 5, move || hits.get_mut().push(inner.now()))
                        .unwrap();
                    timers.get_mut().push(timer);
                }
            })
            .unwrap();
        assert_eq!(2, clock.advance(10));
        assert_eq!(vec![5, 10], *hits.get());
        drop(first);
    }
}
