use std::time::{Duration, Instant};

use ratatui::style::{Color, Style};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use folio::{CannedResponder, Config, Profile, SocialLinks, TerminalWidget};

/// Dots in the typing indicator advance at this pace.
const INDICATOR_FRAME: Duration = Duration::from_millis(300);

pub struct App {
    // Core state
    pub should_quit: bool,
    pub widget: TerminalWidget,

    // Reply in flight
    pub reply_task: Option<JoinHandle<String>>,
    responder: CannedResponder,

    // Presentation
    pub profile: Profile,
    pub links: SocialLinks,
    pub accent: Style,

    // Chat scroll state
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
    indicator_elapsed: Duration,
    last_tick: Instant,
}

impl App {
    pub fn new(config: &Config, accent_override: Option<&str>, start_live: bool) -> Self {
        let accent_name = accent_override.or(config.accent.as_deref());
        let accent = parse_accent(accent_name);

        let mut widget = TerminalWidget::new(config.demo.timings());
        if start_live {
            widget.focus();
        }

        Self {
            should_quit: false,
            widget,

            reply_task: None,
            responder: config.responder(),

            profile: config.profile.clone(),
            links: config.links.clone(),
            accent,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,
            indicator_elapsed: Duration::ZERO,
            last_tick: Instant::now(),
        }
    }

    /// Advance animations by the wall time since the previous tick.
    pub fn on_tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(dt);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.widget.tick(dt);

        if self.widget.is_pending() {
            self.indicator_elapsed += dt;
            while self.indicator_elapsed >= INDICATOR_FRAME {
                self.indicator_elapsed -= INDICATOR_FRAME;
                self.animation_frame = (self.animation_frame + 1) % 3;
            }
        } else {
            self.indicator_elapsed = Duration::ZERO;
            self.animation_frame = 0;
        }
    }

    /// Submit the current input and start resolving a reply in the background.
    pub fn submit(&mut self) {
        let Some(question) = self.widget.submit() else {
            return;
        };

        let responder = self.responder.clone();
        self.reply_task = Some(tokio::spawn(async move {
            responder.resolve(&question).await
        }));

        // Scroll to bottom so the typing indicator is visible
        self.scroll_chat_to_bottom();
    }

    /// Deliver the reply if the background task has finished.
    pub async fn poll_reply(&mut self) {
        let finished = self
            .reply_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        let Some(task) = self.reply_task.take() else {
            return;
        };
        match task.await {
            Ok(reply) => {
                self.widget.deliver_reply(reply);
            }
            Err(err) => {
                warn!(error = %err, "reply task did not complete");
                self.widget.abandon_reply();
            }
        }
        self.scroll_chat_to_bottom();
    }

    /// Something is scrolled out of view above the chat.
    pub fn has_top_shade(&self) -> bool {
        self.widget.mode().is_live() && self.chat_scroll > 0
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max = self.total_chat_lines().saturating_sub(self.visible_chat_height());
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_chat_to_bottom(&mut self) {
        let total_lines = self.total_chat_lines();
        let visible_height = self.visible_chat_height();

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        }
        debug!(scroll = self.chat_scroll, total_lines, "chat scrolled to bottom");
    }

    fn visible_chat_height(&self) -> u16 {
        if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        }
    }

    /// Rendered line count of the transcript, matching the layout in `ui`.
    fn total_chat_lines(&self) -> u16 {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.widget.transcript().messages() {
            total_lines = total_lines.saturating_add(1); // Role line
            for line in msg.content().lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                let wrapped = char_count.div_ceil(wrap_width).max(1);
                total_lines = total_lines.saturating_add(wrapped as u16);
            }
            total_lines = total_lines.saturating_add(1); // Blank line after message
        }

        if self.widget.is_pending() {
            total_lines = total_lines.saturating_add(2); // Role line + dots
        }

        total_lines
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // A reply resolving after teardown has nowhere to go
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}

fn parse_accent(name: Option<&str>) -> Style {
    let color = name
        .and_then(|n| match n.parse::<Color>() {
            Ok(color) => Some(color),
            Err(_) => {
                warn!(accent = n, "unknown accent colour, using default");
                None
            }
        })
        .unwrap_or(Color::Cyan);
    Style::default().fg(color)
}
