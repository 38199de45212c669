use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap, block::Title},
};
use folio::{Mode, Role};
use crate::app::App;

const PLACEHOLDER: &str = "Ask me anything...";
const CURSOR: &str = "▌";
const COLUMN_WIDTH: u16 = 72;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: hero header, body, input, footer
    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let body_area = centered_column(body_area, COLUMN_WIDTH);
    match app.widget.mode() {
        Mode::Demo => render_demo(app, frame, body_area),
        Mode::Live => render_chat(app, frame, body_area),
    }

    render_input(app, frame, centered_column(input_area, COLUMN_WIDTH));
    render_footer(app, frame, footer_area);
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title_spaced = app
        .profile
        .title
        .to_uppercase()
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(Span::styled(
            app.profile.name.clone(),
            app.accent.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(title_spaced, Style::default().fg(Color::DarkGray))),
    ];

    let header = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn render_demo(app: &App, frame: &mut Frame, area: Rect) {
    let demo = app.widget.demo();
    let mut lines: Vec<Line> = Vec::new();

    let question = demo.question().revealed();
    if !question.is_empty() {
        let mut spans = vec![Span::styled(
            question.to_string(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )];
        if demo.question_cursor() {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Gray)));
        }
        lines.push(Line::from(spans).alignment(Alignment::Right));
        lines.push(Line::default());
    }

    let answer = demo.answer().revealed();
    if demo.question().is_complete() && !answer.is_empty() {
        let answer_lines: Vec<&str> = answer.split('\n').collect();
        let last = answer_lines.len() - 1;
        for (i, text) in answer_lines.into_iter().enumerate() {
            let mut spans = vec![Span::raw(text.to_string())];
            if i == last && demo.answer_cursor() {
                spans.push(Span::styled(CURSOR, Style::default().fg(Color::Gray)));
            }
            lines.push(Line::from(spans));
        }
    }

    // Vertically centre the script in the body
    let content_height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - content_height) / 2;
    let demo_area = Rect::new(area.x, top, area.width, area.height - (top - area.y));

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, demo_area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations
    app.chat_height = area.height;
    app.chat_width = area.width;

    let transcript = app.widget.transcript();

    let mut lines: Vec<Line> = Vec::new();

    for msg in transcript.messages() {
        match msg.role() {
            Role::User => {
                lines.push(
                    Line::from(Span::styled("You:", app.accent.add_modifier(Modifier::BOLD)))
                        .alignment(Alignment::Right),
                );
                lines.push(Line::from(msg.content().to_string()).alignment(Alignment::Right));
                lines.push(Line::default());
            }
            Role::Assistant => {
                lines.push(Line::from(Span::styled(
                    format!("{}:", app.profile.name),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content().lines() {
                    lines.push(Line::from(line.to_string()));
                }
                lines.push(Line::default());
            }
        }
    }

    if app.widget.is_pending() {
        lines.push(Line::from(Span::styled(
            format!("{}:", app.profile.name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // One to three dots, advanced by the tick
        let dots = "●".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            dots,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, area);

    if app.has_top_shade() && area.height > 0 {
        let shade_area = Rect::new(area.x, area.y, area.width, 1);
        let shade = Paragraph::new("▲ more above")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
        frame.render_widget(shade, shade_area);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let widget = &app.widget;
    let enabled = widget.input_enabled();

    let border_style = if !enabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if widget.is_focused() {
        app.accent
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let send_style = if widget.can_submit() {
        app.accent.add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Title::from(Span::styled(" ↵ ", send_style)).alignment(Alignment::Right));

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = widget.cursor();

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if widget.input().is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        // Get the visible slice of the input
        let visible_text: String = widget
            .input()
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        let style = if enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(visible_text).style(style)
    };

    frame.render_widget(input.block(input_block), area);

    // Show cursor when editing
    if widget.is_focused() && enabled {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.widget.mode() {
        Mode::Demo => Style::default().bg(Color::Blue).fg(Color::White),
        Mode::Live => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![Span::styled(format!(" {} ", app.widget.mode().label()), mode_style)];

    let hints: &[(&str, &str)] = if app.widget.is_focused() {
        &[("Enter", "send"), ("Esc", "leave input"), ("↑/↓", "scroll"), ("^C", "quit")]
    } else {
        &[("i", "ask"), ("j/k", "scroll"), ("g/G", "top/bottom"), ("q", "quit")]
    };
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!(" {label} "), label_style));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(app.links.github.clone(), Style::default().fg(Color::DarkGray)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(app.links.email.clone(), Style::default().fg(Color::DarkGray)).italic());

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
