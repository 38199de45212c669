//! Demo/live switch.

/// Which face of the widget is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Scripted animation, no user input yet.
    #[default]
    Demo,
    /// Interactive chat.
    Live,
}

/// Conditions checked when the input loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurGuard {
    pub transcript_empty: bool,
    pub input_blank: bool,
}

impl BlurGuard {
    pub fn allows_demo(&self) -> bool {
        self.transcript_empty && self.input_blank
    }
}

/// Result of a blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurOutcome {
    /// Go back to the demo with a fresh replay epoch.
    ResumeDemo,
    /// Nothing changes.
    Keep(Mode),
}

impl Mode {
    pub fn on_focus(self) -> Mode {
        Mode::Live
    }

    pub fn on_submit(self) -> Mode {
        Mode::Live
    }

    pub fn on_blur(self, guard: BlurGuard) -> BlurOutcome {
        if guard.allows_demo() {
            BlurOutcome::ResumeDemo
        } else {
            BlurOutcome::Keep(self)
        }
    }

    pub fn is_demo(self) -> bool {
        self == Mode::Demo
    }

    pub fn is_live(self) -> bool {
        self == Mode::Live
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Demo => "DEMO",
            Mode::Live => "LIVE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(transcript_empty: bool, input_blank: bool) -> BlurGuard {
        BlurGuard {
            transcript_empty,
            input_blank,
        }
    }

    #[test]
    fn test_starts_in_demo() {
        assert_eq!(Mode::default(), Mode::Demo);
    }

    #[test]
    fn test_focus_and_submit_enter_live() {
        assert_eq!(Mode::Demo.on_focus(), Mode::Live);
        assert_eq!(Mode::Live.on_focus(), Mode::Live);
        assert_eq!(Mode::Demo.on_submit(), Mode::Live);
    }

    #[test]
    fn test_blur_resumes_demo_only_when_both_empty() {
        assert_eq!(Mode::Live.on_blur(guard(true, true)), BlurOutcome::ResumeDemo);
        assert_eq!(Mode::Live.on_blur(guard(false, true)), BlurOutcome::Keep(Mode::Live));
        assert_eq!(Mode::Live.on_blur(guard(true, false)), BlurOutcome::Keep(Mode::Live));
        assert_eq!(Mode::Live.on_blur(guard(false, false)), BlurOutcome::Keep(Mode::Live));
    }

    #[test]
    fn test_exactly_one_mode_holds() {
        for mode in [Mode::Demo, Mode::Live] {
            assert_ne!(mode.is_demo(), mode.is_live());
        }
    }
}
