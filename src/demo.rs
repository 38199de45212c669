//! The scripted question/answer loop shown before anyone interacts.

use std::time::Duration;

use tracing::debug;

use crate::typing::{StartDelay, Typewriter};

pub const DEMO_QUESTION: &str = "Why should we hire you?";

pub const DEMO_ANSWER: &str = "I don't just write code—I solve problems that matter.

€5M saved through automation at Hogarth Worldwide.
AI-powered legal infrastructure for Finland's Justice 4.0.
Currently building Raven: revolutionizing P2P logistics.

I bring deep technical skills paired with product thinking.";

/// Timing knobs for one demo cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoTimings {
    pub question_interval: Duration,
    pub question_delay: Duration,
    pub answer_interval: Duration,
    pub restart_pause: Duration,
    pub cursor_blink: Duration,
}

impl Default for DemoTimings {
    fn default() -> Self {
        Self {
            question_interval: Duration::from_millis(50),
            question_delay: Duration::from_millis(800),
            answer_interval: Duration::from_millis(20),
            restart_pause: Duration::from_secs(6),
            cursor_blink: Duration::from_millis(530),
        }
    }
}

/// What a call to [`DemoAnimation::advance`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSignal {
    Running,
    /// The answer finished and the restart pause ran out.
    CycleFinished,
}

/// Toggles visibility on a fixed period.
#[derive(Debug, Clone)]
pub struct CursorBlink {
    period: Duration,
    since_flip: Duration,
    visible: bool,
}

impl CursorBlink {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            since_flip: Duration::ZERO,
            visible: true,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.period.is_zero() {
            return;
        }
        let total = self.since_flip + dt;
        let flips = total.as_nanos() / self.period.as_nanos();
        if flips % 2 == 1 {
            self.visible = !self.visible;
        }
        let rem = total.as_nanos() % self.period.as_nanos();
        self.since_flip = Duration::from_nanos(u64::try_from(rem).unwrap_or(u64::MAX));
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// One run of the scripted demo. Replaying means building a new one.
#[derive(Debug, Clone)]
pub struct DemoAnimation {
    question: Typewriter,
    answer: Typewriter,
    cursor: CursorBlink,
    restart_in: Option<Duration>,
    timings: DemoTimings,
}

impl DemoAnimation {
    pub fn new(timings: DemoTimings) -> Self {
        Self::with_script(DEMO_QUESTION, DEMO_ANSWER, timings)
    }

    pub fn with_script(question: &str, answer: &str, timings: DemoTimings) -> Self {
        Self {
            question: Typewriter::new(
                question,
                timings.question_interval,
                StartDelay::After(timings.question_delay),
            ),
            answer: Typewriter::new(answer, timings.answer_interval, StartDelay::Gated),
            cursor: CursorBlink::new(timings.cursor_blink),
            restart_in: None,
            timings,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> DemoSignal {
        self.cursor.advance(dt);

        if let Some(remaining) = self.restart_in {
            if dt >= remaining {
                self.restart_in = Some(Duration::ZERO);
                return DemoSignal::CycleFinished;
            }
            self.restart_in = Some(remaining - dt);
            return DemoSignal::Running;
        }

        let answer_done = if self.question.advance(dt) {
            debug!("demo question typed, releasing answer");
            self.answer.release();
            self.answer.advance(Duration::ZERO)
        } else {
            self.answer.advance(dt)
        };

        if answer_done {
            debug!(pause_ms = self.timings.restart_pause.as_millis() as u64, "demo answer typed");
            self.restart_in = Some(self.timings.restart_pause);
        }
        DemoSignal::Running
    }

    pub fn question(&self) -> &Typewriter {
        &self.question
    }

    pub fn answer(&self) -> &Typewriter {
        &self.answer
    }

    /// Cursor trailing the question while it is being typed.
    pub fn question_cursor(&self) -> bool {
        !self.question.is_complete() && self.cursor.is_visible()
    }

    /// Cursor trailing the answer while it is being typed.
    pub fn answer_cursor(&self) -> bool {
        self.question.is_complete() && !self.answer.is_complete() && self.cursor.is_visible()
    }

    pub fn is_paused(&self) -> bool {
        self.restart_in.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fast() -> DemoTimings {
        DemoTimings {
            question_interval: ms(10),
            question_delay: ms(100),
            answer_interval: ms(5),
            restart_pause: ms(1000),
            cursor_blink: ms(530),
        }
    }

    #[test]
    fn test_answer_waits_for_question() {
        let mut demo = DemoAnimation::with_script("abc", "xyz", fast());
        demo.advance(ms(100));
        demo.advance(ms(10));
        assert_eq!(demo.question().revealed(), "ab");
        assert!(!demo.answer().has_started());
        assert_eq!(demo.answer().revealed(), "");
    }

    #[test]
    fn test_answer_starts_when_question_completes() {
        let mut demo = DemoAnimation::with_script("abc", "xyz", fast());
        demo.advance(ms(120));
        assert!(demo.question().is_complete());
        assert_eq!(demo.answer().revealed(), "x");

        demo.advance(ms(10));
        assert!(demo.answer().is_complete());
        assert!(demo.is_paused());
    }

    #[test]
    fn test_cycle_finishes_after_restart_pause() {
        let mut demo = DemoAnimation::with_script("a", "b", fast());
        assert_eq!(demo.advance(ms(100)), DemoSignal::Running);
        assert!(demo.answer().is_complete());

        assert_eq!(demo.advance(ms(999)), DemoSignal::Running);
        assert_eq!(demo.advance(ms(1)), DemoSignal::CycleFinished);
    }

    #[test]
    fn test_default_script_runs_to_completion() {
        let mut demo = DemoAnimation::new(DemoTimings::default());
        let mut finished = false;
        for _ in 0..2000 {
            if demo.advance(ms(16)) == DemoSignal::CycleFinished {
                finished = true;
                break;
            }
        }
        assert!(finished);
        assert_eq!(demo.question().revealed(), DEMO_QUESTION);
        assert_eq!(demo.answer().revealed(), DEMO_ANSWER);
    }

    #[test]
    fn test_demo_answer_text() {
        assert!(DEMO_ANSWER.starts_with("I don't just write code\u{2014}I solve problems that matter.\n\n"));
        assert!(DEMO_ANSWER.ends_with("\n\nI bring deep technical skills paired with product thinking."));
    }

    #[test]
    fn test_cursor_blinks_on_period() {
        let mut cursor = CursorBlink::new(ms(530));
        assert!(cursor.is_visible());
        cursor.advance(ms(529));
        assert!(cursor.is_visible());
        cursor.advance(ms(1));
        assert!(!cursor.is_visible());
        cursor.advance(ms(1060));
        assert!(!cursor.is_visible());
        cursor.advance(ms(530));
        assert!(cursor.is_visible());
    }

    #[test]
    fn test_cursor_tracks_active_typewriter() {
        let mut demo = DemoAnimation::with_script("ab", "cd", fast());
        demo.advance(ms(100));
        assert!(demo.question_cursor());
        assert!(!demo.answer_cursor());

        demo.advance(ms(10));
        assert!(!demo.question_cursor());
        assert!(demo.answer_cursor());
    }
}
