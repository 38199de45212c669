//! Character-by-character reveal animation.
//!
//! A [`Typewriter`] does not own a timer. The caller feeds it elapsed time
//! through [`Typewriter::advance`], which keeps the animation deterministic
//! under test and lets the owner cancel it simply by dropping it.

use std::time::Duration;

/// When a typewriter may begin revealing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDelay {
    /// Start once this much time has been fed in.
    After(Duration),
    /// Never start until [`Typewriter::release`] is called.
    Gated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Running,
    Complete,
}

/// Reveals a fixed target string one character per interval.
#[derive(Debug, Clone)]
pub struct Typewriter {
    target: String,
    char_count: usize,
    interval: Duration,
    start: StartDelay,
    phase: Phase,
    waited: Duration,
    running_for: Duration,
    shown: usize,
}

impl Typewriter {
    pub fn new(target: impl Into<String>, interval: Duration, start: StartDelay) -> Self {
        let target = target.into();
        let char_count = target.chars().count();
        Self {
            target,
            char_count,
            interval,
            start,
            phase: Phase::Waiting,
            waited: Duration::ZERO,
            running_for: Duration::ZERO,
            shown: 0,
        }
    }

    /// Lift a [`StartDelay::Gated`] start so the next `advance` begins typing.
    pub fn release(&mut self) {
        if self.start == StartDelay::Gated {
            self.start = StartDelay::After(Duration::ZERO);
        }
    }

    /// Feed `dt` of elapsed time.
    ///
    /// Returns `true` only on the call during which the full target became
    /// visible. Time left over after the start delay counts toward the reveal.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut dt = dt;

        if self.phase == Phase::Waiting {
            let delay = match self.start {
                StartDelay::Gated => return false,
                StartDelay::After(delay) => delay,
            };
            let remaining = delay.saturating_sub(self.waited);
            if dt < remaining {
                self.waited += dt;
                return false;
            }
            self.waited = delay;
            dt -= remaining;
            self.phase = Phase::Running;
        }

        if self.phase != Phase::Running {
            return false;
        }

        self.running_for += dt;
        self.shown = self.due_chars();

        if self.shown == self.char_count {
            self.phase = Phase::Complete;
            return true;
        }
        false
    }

    // first character lands at t = 0, then one more per full interval
    fn due_chars(&self) -> usize {
        if self.interval.is_zero() {
            return self.char_count;
        }
        let ticks = self.running_for.as_nanos() / self.interval.as_nanos();
        usize::try_from(ticks)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
            .min(self.char_count)
    }

    /// The prefix of the target currently on screen.
    pub fn revealed(&self) -> &str {
        let end = self
            .target
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(self.target.len());
        &self.target[..end]
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn revealed_chars(&self) -> usize {
        self.shown
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}
