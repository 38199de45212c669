//! The conversational terminal widget: demo loop, input line, transcript and
//! the submission pipeline, independent of any rendering backend.
//!
//! The widget never spawns work itself. [`TerminalWidget::submit`] hands back
//! the text to resolve, and the host delivers the reply later through
//! [`TerminalWidget::deliver_reply`]. While a reply is pending, the input is
//! disabled and further submissions are ignored.

use std::time::Duration;

use tracing::{debug, info};

use crate::demo::{DemoAnimation, DemoSignal, DemoTimings};
use crate::mode::{BlurGuard, BlurOutcome, Mode};
use crate::transcript::{Role, Transcript};

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone)]
pub struct TerminalWidget {
    mode: Mode,
    demo: DemoAnimation,
    demo_epoch: u64,
    timings: DemoTimings,
    transcript: Transcript,
    input: String,
    cursor: usize,
    focused: bool,
    pending: bool,
}

impl TerminalWidget {
    pub fn new(timings: DemoTimings) -> Self {
        Self {
            mode: Mode::Demo,
            demo: DemoAnimation::new(timings),
            demo_epoch: 0,
            timings,
            transcript: Transcript::new(),
            input: String::new(),
            cursor: 0,
            focused: false,
            pending: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn demo(&self) -> &DemoAnimation {
        &self.demo
    }

    /// Bumped every time the demo starts over.
    pub fn demo_epoch(&self) -> u64 {
        self.demo_epoch
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn input_enabled(&self) -> bool {
        !self.pending
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Feed elapsed time to whatever is animating.
    pub fn tick(&mut self, dt: Duration) {
        if self.mode.is_demo() && self.demo.advance(dt) == DemoSignal::CycleFinished {
            self.restart_demo();
        }
    }

    fn restart_demo(&mut self) {
        self.demo_epoch += 1;
        self.demo = DemoAnimation::new(self.timings);
        debug!(epoch = self.demo_epoch, "demo restarted");
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = self.mode.label(), to = mode.label(), "mode change");
            self.mode = mode;
        }
    }

    pub fn focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.set_mode(self.mode.on_focus());
    }

    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        self.focused = false;

        let guard = BlurGuard {
            transcript_empty: self.transcript.is_empty(),
            input_blank: self.input.trim().is_empty(),
        };
        match self.mode.on_blur(guard) {
            BlurOutcome::ResumeDemo => {
                self.set_mode(Mode::Demo);
                self.restart_demo();
            }
            BlurOutcome::Keep(mode) => self.set_mode(mode),
        }
    }

    /// Run the submission pipeline up to the point of resolving.
    ///
    /// Returns the text to hand to the resolver, or `None` when the input is
    /// blank or a reply is already pending. A rejected submit changes nothing.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        self.set_mode(self.mode.on_submit());

        let question = self.input.trim().to_string();
        self.transcript.push(Role::User, question.clone());
        self.input.clear();
        self.cursor = 0;
        self.pending = true;

        info!(turn = self.transcript.len(), "question submitted");
        Some(question)
    }

    /// Append the resolved reply and re-enable input.
    ///
    /// Returns `false` if nothing was pending.
    pub fn deliver_reply(&mut self, reply: impl Into<String>) -> bool {
        if !self.pending {
            return false;
        }
        self.transcript.push(Role::Assistant, reply);
        self.pending = false;
        info!(turn = self.transcript.len(), "reply delivered");
        true
    }

    /// Drop a pending reply without appending anything.
    pub fn abandon_reply(&mut self) {
        self.pending = false;
    }

    // Input editing. All of these are ignored while a reply is pending.

    pub fn insert_char(&mut self, c: char) {
        if !self.input_enabled() {
            return;
        }
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if !self.input_enabled() || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.remove(byte_pos);
    }

    pub fn delete(&mut self) {
        if !self.input_enabled() {
            return;
        }
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        self.cursor = (self.cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

impl Default for TerminalWidget {
    fn default() -> Self {
        Self::new(DemoTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{DEMO_ANSWER, DEMO_QUESTION};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn type_text(widget: &mut TerminalWidget, text: &str) {
        for c in text.chars() {
            widget.insert_char(c);
        }
    }

    #[test]
    fn test_whitespace_submit_is_ignored() {
        let mut widget = TerminalWidget::default();
        type_text(&mut widget, "   ");
        assert_eq!(widget.submit(), None);
        assert!(widget.transcript().is_empty());
        assert_eq!(widget.mode(), Mode::Demo);
        assert!(!widget.is_pending());
    }

    #[test]
    fn test_submit_switches_to_live_and_clears_input() {
        let mut widget = TerminalWidget::default();
        type_text(&mut widget, "  tell me about Raven ");
        let question = widget.submit();

        assert_eq!(question.as_deref(), Some("tell me about Raven"));
        assert_eq!(widget.mode(), Mode::Live);
        assert_eq!(widget.input(), "");
        assert_eq!(widget.cursor(), 0);
        assert!(widget.is_pending());
        assert_eq!(widget.transcript().len(), 1);
        assert_eq!(widget.transcript().messages()[0].role(), Role::User);
        assert_eq!(widget.transcript().messages()[0].content(), "tell me about Raven");
    }

    #[test]
    fn test_second_submit_while_pending_is_noop() {
        let mut widget = TerminalWidget::default();
        type_text(&mut widget, "first");
        assert!(widget.submit().is_some());

        // input is disabled, typing does nothing
        type_text(&mut widget, "second");
        assert_eq!(widget.input(), "");
        assert_eq!(widget.submit(), None);
        assert_eq!(widget.transcript().len(), 1);

        assert!(widget.deliver_reply("answer"));
        type_text(&mut widget, "second");
        assert_eq!(widget.submit().as_deref(), Some("second"));
    }

    #[test]
    fn test_transcript_alternates_user_assistant() {
        let mut widget = TerminalWidget::default();
        let questions = ["why hire you", "your stack?", "anything else"];

        for q in questions {
            type_text(&mut widget, q);
            let text = widget.submit().unwrap();
            widget.deliver_reply(format!("re: {text}"));
        }

        let messages = widget.transcript().messages();
        assert_eq!(messages.len(), 2 * questions.len());
        for (i, pair) in messages.chunks(2).enumerate() {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[0].content(), questions[i]);
            assert_eq!(pair[1].role(), Role::Assistant);
            assert_eq!(pair[1].content(), format!("re: {}", questions[i]));
        }
    }

    #[test]
    fn test_deliver_without_pending_is_ignored() {
        let mut widget = TerminalWidget::default();
        assert!(!widget.deliver_reply("stray"));
        assert!(widget.transcript().is_empty());
    }

    #[test]
    fn test_abandon_reply_reenables_input() {
        let mut widget = TerminalWidget::default();
        type_text(&mut widget, "hello");
        widget.submit();
        widget.abandon_reply();
        assert!(!widget.is_pending());
        assert_eq!(widget.transcript().len(), 1);
    }

    #[test]
    fn test_focus_enters_live() {
        let mut widget = TerminalWidget::default();
        widget.focus();
        assert!(widget.is_focused());
        assert_eq!(widget.mode(), Mode::Live);
    }

    #[test]
    fn test_blur_with_empty_state_resumes_demo() {
        let mut widget = TerminalWidget::default();
        widget.focus();
        widget.blur();
        assert_eq!(widget.mode(), Mode::Demo);
        assert_eq!(widget.demo_epoch(), 1);
    }

    #[test]
    fn test_blur_with_draft_stays_live() {
        let mut widget = TerminalWidget::default();
        widget.focus();
        type_text(&mut widget, "half a thought");
        widget.blur();
        assert_eq!(widget.mode(), Mode::Live);
        assert_eq!(widget.demo_epoch(), 0);
    }

    #[test]
    fn test_blur_after_conversation_stays_live() {
        let mut widget = TerminalWidget::default();
        widget.focus();
        type_text(&mut widget, "hi");
        widget.submit();
        widget.deliver_reply("hello");
        widget.blur();
        assert_eq!(widget.mode(), Mode::Live);
    }

    #[test]
    fn test_blur_without_focus_is_noop() {
        let mut widget = TerminalWidget::default();
        widget.blur();
        assert_eq!(widget.demo_epoch(), 0);
    }

    #[test]
    fn test_demo_restarts_after_pause() {
        let mut widget = TerminalWidget::default();
        let mut last_epoch = widget.demo_epoch();
        let mut saw_full = false;

        for _ in 0..2000 {
            widget.tick(ms(16));
            if widget.demo().answer().revealed() == DEMO_ANSWER {
                saw_full = true;
                assert_eq!(widget.demo().question().revealed(), DEMO_QUESTION);
            }
            if widget.demo_epoch() != last_epoch {
                last_epoch = widget.demo_epoch();
                break;
            }
        }

        assert!(saw_full);
        assert_eq!(last_epoch, 1);
        assert_eq!(widget.demo().question().revealed(), "");
        assert_eq!(widget.demo().answer().revealed(), "");
    }

    #[test]
    fn test_demo_frozen_while_live() {
        let mut widget = TerminalWidget::default();
        widget.focus();
        widget.tick(Duration::from_secs(60));
        assert_eq!(widget.demo().question().revealed(), "");
        assert_eq!(widget.demo_epoch(), 0);
    }

    #[test]
    fn test_utf8_editing() {
        let mut widget = TerminalWidget::default();
        type_text(&mut widget, "€5M");
        widget.cursor_left();
        widget.backspace();
        assert_eq!(widget.input(), "€M");
        widget.cursor_home();
        widget.delete();
        assert_eq!(widget.input(), "M");
        widget.cursor_end();
        widget.insert_char('!');
        assert_eq!(widget.input(), "M!");
    }
}
