//! The placeholder animation: model and logic.
//!
//! A [`Placeholder`] owns everything about one bound input: the hints, the
//! typing and blink counters and its two timers. There is no state shared
//! between placeholders, so any number of inputs can animate at once.
//!
//! ```text
//!  Suspended --attach/reconfigure/blur--> Typing <--> Dwelling
//!      ^                                    |            |
//!      +---------------focus----------------+------------+
//!
//!  any --detach--> Detached
//! ```
use futures_lite::future;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    hints::{HintList, PlaceholderConfig, Timing},
    sync::{Shared, WeakShared},
    time::{Scheduler, TimerKind},
    view::{FocusChange, PlaceholderInput},
};

/// Where an animator is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing is scheduled and the placeholder is empty.
    Suspended,
    /// Keystrokes are being scheduled.
    Typing,
    /// A hint is fully typed, the cursor blinks until the next one starts.
    Dwelling,
    /// The animator was torn down and will never write again.
    Detached,
}

/// A snapshot of an animator's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimatorState {
    pub phase: Phase,
    pub hint_index: usize,
    pub type_index: usize,
    pub blink_count: u8,
    pub typing_pending: bool,
    pub blink_pending: bool,
}

struct Animator<E, S: Scheduler> {
    input: E,
    scheduler: S,
    hints: HintList,
    cursor: char,
    timing: Timing,
    rng: SmallRng,
    hint_index: usize,
    type_index: usize,
    blink_count: u8,
    phase: Phase,
    typing: Option<S::Timer>,
    blink: Option<S::Timer>,
    detached: (async_channel::Sender<()>, async_channel::Receiver<()>),
}

fn rng_for(config: &PlaceholderConfig) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

impl<E: PlaceholderInput, S: Scheduler> Animator<E, S> {
    fn install(&mut self, config: PlaceholderConfig) {
        if config.seed.is_some() {
            self.rng = rng_for(&config);
        }
        self.hints = config.hints;
        self.cursor = config.cursor;
        self.timing = config.timing;
    }

    fn cancel_timers(&mut self) {
        self.typing = None;
        self.blink = None;
    }

    fn keystroke_delay(&mut self) -> u32 {
        let Timing {
            keystroke_min: min,
            keystroke_max: max,
            ..
        } = self.timing;
        if max <= min {
            min
        } else {
            self.rng.gen_range(min..max)
        }
    }

    /// Schedule a typing step, replacing any pending one.
    ///
    /// Returns `false` if nothing was scheduled.
    fn schedule_typing(&mut self, this: &WeakShared<Self>, millis: u32) -> bool {
        self.typing = None;
        if self.hints.is_empty() {
            log::debug!("no placeholder hints, staying idle");
            return false;
        }
        let this = this.clone();
        let scheduled = self.scheduler.schedule(TimerKind::Typing, millis, move || {
            if let Some(inner) = this.upgrade() {
                Placeholder { inner }.type_step();
            }
        });
        match scheduled {
            Ok(timer) => {
                self.typing = Some(timer);
                true
            }
            Err(err) => {
                log::error!("{err}");
                false
            }
        }
    }

    /// Schedule a blink step, replacing any pending one.
    fn schedule_blink(&mut self, this: &WeakShared<Self>, millis: u32) {
        self.blink = None;
        let this = this.clone();
        let scheduled = self.scheduler.schedule(TimerKind::Blink, millis, move || {
            if let Some(inner) = this.upgrade() {
                Placeholder { inner }.blink_step();
            }
        });
        match scheduled {
            Ok(timer) => self.blink = Some(timer),
            Err(err) => log::error!("{err}"),
        }
    }

    /// Clear the placeholder and start typing after the start delay.
    fn restart(&mut self, this: &WeakShared<Self>) {
        self.input.set_placeholder("");
        let start = self.timing.start;
        self.phase = if self.schedule_typing(this, start) {
            Phase::Typing
        } else {
            Phase::Suspended
        };
    }

    fn state(&self) -> AnimatorState {
        AnimatorState {
            phase: self.phase,
            hint_index: self.hint_index,
            type_index: self.type_index,
            blink_count: self.blink_count,
            typing_pending: self.typing.is_some(),
            blink_pending: self.blink.is_some(),
        }
    }
}

/// An animated placeholder bound to one input.
///
/// Cloning gives another handle to the same animator.
pub struct Placeholder<E, S: Scheduler> {
    inner: Shared<Animator<E, S>>,
}

impl<E, S: Scheduler> Clone for Placeholder<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: PlaceholderInput, S: Scheduler> Placeholder<E, S> {
    /// Bind a new animator to `input`.
    ///
    /// Clears the placeholder and schedules the first keystroke after
    /// [`Timing::start`]. Focus and blur only take effect while
    /// [`Placeholder::run`] is being polled, or when the host calls
    /// [`Placeholder::suspend`] and [`Placeholder::resume`] itself.
    pub fn attach(input: E, scheduler: S, config: PlaceholderConfig) -> Self {
        let rng = rng_for(&config);
        let animator = Animator {
            input,
            scheduler,
            hints: config.hints,
            cursor: config.cursor,
            timing: config.timing,
            rng,
            hint_index: 0,
            type_index: 0,
            blink_count: 0,
            phase: Phase::Suspended,
            typing: None,
            blink: None,
            detached: async_channel::bounded(1),
        };
        let placeholder = Placeholder {
            inner: Shared::new(animator),
        };
        {
            let this = placeholder.inner.downgrade();
            let mut animator = placeholder.inner.get_mut();
            log::debug!(
                "attaching placeholder with {} hint(s)",
                animator.hints.len()
            );
            animator.restart(&this);
        }
        placeholder
    }

    /// Replace the configuration, discarding any animation in flight.
    pub fn reconfigure(&self, config: PlaceholderConfig) {
        let this = self.inner.downgrade();
        let mut animator = self.inner.get_mut();
        if animator.phase == Phase::Detached {
            log::warn!("cannot reconfigure a detached placeholder");
            return;
        }
        log::debug!("reconfiguring placeholder with {} hint(s)", config.hints.len());
        animator.cancel_timers();
        animator.hint_index = 0;
        animator.type_index = 0;
        animator.blink_count = 0;
        animator.install(config);
        animator.restart(&this);
    }

    /// Stop the animation and clear the placeholder, eg on focus.
    ///
    /// The current hint is kept, so resuming picks up where it left off.
    pub fn suspend(&self) {
        let mut animator = self.inner.get_mut();
        if animator.phase == Phase::Detached {
            return;
        }
        log::trace!("suspending placeholder");
        animator.cancel_timers();
        animator.input.set_placeholder("");
        animator.type_index = 0;
        animator.blink_count = 0;
        animator.phase = Phase::Suspended;
    }

    /// Restart the animation after [`Timing::start`], eg on blur.
    ///
    /// Does nothing while the input holds a value.
    pub fn resume(&self) {
        let this = self.inner.downgrade();
        let mut animator = self.inner.get_mut();
        if animator.phase == Phase::Detached {
            return;
        }
        if !animator.input.value().is_empty() {
            log::trace!("input has a value, not resuming placeholder");
            return;
        }
        log::trace!("resuming placeholder");
        let start = animator.timing.start;
        if animator.schedule_typing(&this, start) {
            animator.phase = Phase::Typing;
        }
    }

    /// Tear the animator down: cancel both timers, clear the placeholder and
    /// end [`Placeholder::run`].
    ///
    /// After this the animator never writes to its input again.
    pub fn detach(&self) {
        let mut animator = self.inner.get_mut();
        if animator.phase == Phase::Detached {
            return;
        }
        log::debug!("detaching placeholder");
        animator.cancel_timers();
        animator.input.set_placeholder("");
        animator.phase = Phase::Detached;
        animator.detached.0.close();
    }

    fn type_step(&self) {
        let this = self.inner.downgrade();
        let mut guard = self.inner.get_mut();
        let animator = &mut *guard;
        if animator.phase == Phase::Detached {
            return;
        }
        animator.cancel_timers();

        let Some(hint) = animator.hints.get(animator.hint_index) else {
            animator.phase = Phase::Suspended;
            return;
        };
        let len = hint.chars().count();
        animator.type_index = (animator.type_index + 1).min(len);
        let mut visible: String = hint.chars().take(animator.type_index).collect();
        if animator.type_index < len {
            visible.push(animator.cursor);
        }
        animator.input.set_placeholder(&visible);

        let mut delay = animator.keystroke_delay();
        if animator.type_index == len {
            log::trace!("typed '{visible}', dwelling");
            delay = animator.timing.dwell;
            animator.type_index = 0;
            animator.hint_index = animator.hints.next_index(animator.hint_index);
            animator.blink_count = 0;
            animator.phase = Phase::Dwelling;
            if animator.timing.blinks > 0 {
                let blink = animator.timing.blink;
                animator.schedule_blink(&this, blink);
            }
        } else {
            animator.phase = Phase::Typing;
        }
        animator.schedule_typing(&this, delay);
    }

    fn blink_step(&self) {
        let this = self.inner.downgrade();
        let mut guard = self.inner.get_mut();
        let animator = &mut *guard;
        if animator.phase == Phase::Detached {
            return;
        }
        animator.blink = None;

        let mut text = animator.input.placeholder();
        if text.ends_with(animator.cursor) {
            text.pop();
        } else {
            text.push(animator.cursor);
        }
        animator.input.set_placeholder(&text);
        animator.blink_count = animator.blink_count.saturating_add(1);

        if animator.blink_count < animator.timing.blinks {
            let blink = animator.timing.blink;
            animator.schedule_blink(&this, blink);
        }
    }

    /// Feed the input's focus changes into the animator until it is detached.
    pub async fn run(&self) {
        let (input, detached) = {
            let animator = self.inner.get();
            (animator.input.clone(), animator.detached.1.clone())
        };
        loop {
            let change = future::or(async { Some(input.next_focus_change().await) }, async {
                // Nothing is ever sent, this only returns once the channel closes.
                let _ = detached.recv().await;
                None
            })
            .await;
            match change {
                Some(FocusChange::Focus) => self.suspend(),
                Some(FocusChange::Blur) => self.resume(),
                None => {
                    log::debug!("placeholder detached, leaving the run loop");
                    return;
                }
            }
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.inner.get().state()
    }

    pub fn is_detached(&self) -> bool {
        self.inner.get().phase == Phase::Detached
    }

    /// The input this animator is bound to.
    pub fn input(&self) -> E {
        self.inner.get().input.clone()
    }

    pub fn hints(&self) -> HintList {
        self.inner.get().hints.clone()
    }

    pub fn cursor(&self) -> char {
        self.inner.get().cursor
    }

    pub fn timing(&self) -> Timing {
        self.inner.get().timing
    }
}
